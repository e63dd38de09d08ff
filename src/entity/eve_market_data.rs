//! EVE-Marketdata service, read in object notation

use super::join_ids;
use crate::error::RequestResult;
use crate::model::eve_market_data::{ItemOrders, OrderType};
use crate::request::{ApiRequest, RequestHandler};
use serde::{Deserialize, Serialize};

const ITEM_ORDERS: &str = "/api/item_orders2.json";

/// Filters for EVE-Marketdata calls; empty lists are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EveMarketDataOptions {
    pub type_ids: Vec<i64>,
    pub region_ids: Vec<i64>,
    pub solarsystem_ids: Vec<i64>,
    pub station_ids: Vec<i64>,
}

impl EveMarketDataOptions {
    /// Options for the given item types
    pub fn for_types(type_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            type_ids: type_ids.into_iter().collect(),
            ..Self::default()
        }
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        [
            ("type_ids", &self.type_ids),
            ("region_ids", &self.region_ids),
            ("solarsystem_ids", &self.solarsystem_ids),
            ("station_ids", &self.station_ids),
        ]
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .fold(request, |r, (key, ids)| r.param(key, join_ids(ids)))
    }
}

/// EVE-Marketdata calls; the service identifies callers by character name
#[derive(Debug, Clone)]
pub struct EveMarketData {
    handler: RequestHandler,
    base: String,
    char_name: String,
}

impl EveMarketData {
    pub(crate) fn new(
        handler: RequestHandler,
        base: impl Into<String>,
        char_name: impl Into<String>,
    ) -> Self {
        Self {
            handler,
            base: base.into(),
            char_name: char_name.into(),
        }
    }

    /// Current orders for the selected items
    pub async fn item_orders(
        &self,
        options: &EveMarketDataOptions,
        order_type: OrderType,
    ) -> RequestResult<ItemOrders> {
        let request = options.apply(
            ApiRequest::new(&self.base, ITEM_ORDERS)
                .param("char_name", &self.char_name)
                .param("buysell", order_type.as_param()),
        );
        self.handler.request(&request).await
    }
}
