//! Calls scoped to one character

use super::{first_page, game_path, join_ids};
use crate::error::RequestResult;
use crate::model::character::{ContractBids, MarketOrders, NotificationTexts, WalletTransactions};
use crate::model::ApiResponse;
use crate::pagination::Page;
use crate::request::{ApiRequest, RequestHandler};
use crate::types::ApiKey;

const MARKET_ORDERS: &str = "/char/MarketOrders";
const WALLET_TRANSACTIONS: &str = "/char/WalletTransactions";
const CONTRACT_BIDS: &str = "/char/ContractBids";
const NOTIFICATION_TEXTS: &str = "/char/NotificationTexts";

/// Game API calls for one character of an API key
#[derive(Debug, Clone)]
pub struct Character {
    handler: RequestHandler,
    base: String,
    key: ApiKey,
    character_id: i64,
}

impl Character {
    pub(crate) fn new(
        handler: RequestHandler,
        base: impl Into<String>,
        key: ApiKey,
        character_id: i64,
    ) -> Self {
        Self {
            handler,
            base: base.into(),
            key,
            character_id,
        }
    }

    /// The key used for every call
    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    pub fn character_id(&self) -> i64 {
        self.character_id
    }

    fn call(&self, endpoint: &str) -> ApiRequest {
        ApiRequest::new(&self.base, game_path(&self.handler, endpoint))
            .credential(&self.key)
            .param("characterID", self.character_id)
    }

    /// Open and recently closed market orders, or a single order by id
    pub async fn market_orders(
        &self,
        order_id: Option<i64>,
    ) -> RequestResult<ApiResponse<MarketOrders>> {
        self.handler
            .request(&self.call(MARKET_ORDERS).opt_param("orderID", order_id))
            .await
    }

    /// Most recent wallet transactions; walk further back with `older`
    pub async fn wallet_transactions(&self, count: u32) -> RequestResult<Page<WalletTransactions>> {
        first_page(&self.handler, self.call(WALLET_TRANSACTIONS), count).await
    }

    /// Bids placed on the character's recent auctions
    pub async fn contract_bids(&self) -> RequestResult<ApiResponse<ContractBids>> {
        self.handler.request(&self.call(CONTRACT_BIDS)).await
    }

    /// Bodies of the given notifications
    pub async fn notification_texts(
        &self,
        ids: &[i64],
    ) -> RequestResult<ApiResponse<NotificationTexts>> {
        self.handler
            .request(&self.call(NOTIFICATION_TEXTS).param("IDs", join_ids(ids)))
            .await
    }
}
