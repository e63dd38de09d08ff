//! EVE-Central market service

use crate::error::{RequestError, RequestResult};
use crate::model::eve_central::{MarketStat, Quicklook};
use crate::request::{ApiRequest, RequestHandler};
use serde::{Deserialize, Serialize};

const MARKET_STAT: &str = "/api/marketstat";
const QUICKLOOK: &str = "/api/quicklook";

/// Filters shared by the EVE-Central calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EveCentralOptions {
    /// Item types to report on
    pub type_ids: Vec<i64>,
    /// Restrict to these regions
    pub regions: Vec<i64>,
    /// Restrict to one solar system
    pub system: Option<i64>,
    /// Only orders reported within this many hours
    pub hours: Option<u32>,
    /// Ignore orders below this quantity
    pub min_quantity: Option<u32>,
}

impl EveCentralOptions {
    /// Options for the given item types
    pub fn for_types(type_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            type_ids: type_ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a region filter
    #[must_use]
    pub fn region(mut self, region_id: i64) -> Self {
        self.regions.push(region_id);
        self
    }

    fn apply(&self, request: ApiRequest, hours_key: &str, min_quantity_key: &str) -> ApiRequest {
        let request = self
            .type_ids
            .iter()
            .fold(request, |r, id| r.param("typeid", id));
        self.regions
            .iter()
            .fold(request, |r, id| r.param("regionlimit", id))
            .opt_param("usesystem", self.system)
            .opt_param(hours_key, self.hours)
            .opt_param(min_quantity_key, self.min_quantity)
    }
}

/// EVE-Central calls; always decoded as XML
#[derive(Debug, Clone)]
pub struct EveCentral {
    handler: RequestHandler,
    base: String,
}

impl EveCentral {
    pub(crate) fn new(handler: RequestHandler, base: impl Into<String>) -> Self {
        Self {
            handler,
            base: base.into(),
        }
    }

    /// Aggregate buy, sell and overall statistics per item type
    pub async fn market_stat(&self, options: &EveCentralOptions) -> RequestResult<MarketStat> {
        let request = options.apply(ApiRequest::new(&self.base, MARKET_STAT), "hours", "minQ");
        self.handler.request(&request).await
    }

    /// Individual orders for the first item type in `options`
    pub async fn quicklook(&self, options: &EveCentralOptions) -> RequestResult<Quicklook> {
        let request = options.apply(ApiRequest::new(&self.base, QUICKLOOK), "sethours", "setminQ");
        self.handler.request(&request).await
    }

    /// Orders for one item type in systems along the route between two systems
    pub async fn quicklook_path(
        &self,
        from: &str,
        to: &str,
        type_id: i64,
        options: &EveCentralOptions,
    ) -> RequestResult<Quicklook> {
        let path = format!("{QUICKLOOK}/onpath/from/{from}/to/{to}/fortype/{type_id}");
        let filters = EveCentralOptions {
            type_ids: Vec::new(),
            ..options.clone()
        };
        let request = filters.apply(ApiRequest::new(&self.base, path), "sethours", "setminQ");
        self.handler.request(&request).await
    }

    /// Price history is not offered
    pub async fn history(&self) -> RequestResult<()> {
        Err(RequestError::not_supported("EVE-Central history"))
    }
}
