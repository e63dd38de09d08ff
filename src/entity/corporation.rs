//! Calls scoped to a corporation key

use super::{first_page, game_path};
use crate::error::RequestResult;
use crate::model::corporation::{MarketOrders, WalletJournal, WalletTransactions};
use crate::model::ApiResponse;
use crate::pagination::Page;
use crate::request::{ApiRequest, RequestHandler};
use crate::types::ApiKey;

const MARKET_ORDERS: &str = "/corp/MarketOrders";
const WALLET_TRANSACTIONS: &str = "/corp/WalletTransactions";
const WALLET_JOURNAL: &str = "/corp/WalletJournal";

/// Master wallet division
pub const DEFAULT_DIVISION: i32 = 1000;

/// Game API calls for a corporation.
///
/// The key identifies the corporation to the server; the id is kept for
/// callers and never sent.
#[derive(Debug, Clone)]
pub struct Corporation {
    handler: RequestHandler,
    base: String,
    key: ApiKey,
    corporation_id: i64,
}

impl Corporation {
    pub(crate) fn new(
        handler: RequestHandler,
        base: impl Into<String>,
        key: ApiKey,
        corporation_id: i64,
    ) -> Self {
        Self {
            handler,
            base: base.into(),
            key,
            corporation_id,
        }
    }

    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    pub fn corporation_id(&self) -> i64 {
        self.corporation_id
    }

    fn call(&self, endpoint: &str) -> ApiRequest {
        ApiRequest::new(&self.base, game_path(&self.handler, endpoint)).credential(&self.key)
    }

    /// Corporation market orders, or a single order by id
    pub async fn market_orders(
        &self,
        order_id: Option<i64>,
    ) -> RequestResult<ApiResponse<MarketOrders>> {
        self.handler
            .request(&self.call(MARKET_ORDERS).opt_param("orderID", order_id))
            .await
    }

    /// Wallet transactions of one division; the division stays bound to
    /// every older page
    pub async fn wallet_transactions(
        &self,
        division: i32,
        count: u32,
    ) -> RequestResult<Page<WalletTransactions>> {
        let template = self.call(WALLET_TRANSACTIONS).param("accountKey", division);
        first_page(&self.handler, template, count).await
    }

    /// Journal entries of one division
    pub async fn wallet_journal(
        &self,
        division: i32,
        count: u32,
    ) -> RequestResult<Page<WalletJournal>> {
        let template = self.call(WALLET_JOURNAL).param("accountKey", division);
        first_page(&self.handler, template, count).await
    }
}
