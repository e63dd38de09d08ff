//! Calls that need no credential

use super::game_path;
use crate::error::RequestResult;
use crate::model::core::{CallList, ServerStatus};
use crate::model::ApiResponse;
use crate::request::{ApiRequest, RequestHandler};

const SERVER_STATUS: &str = "/server/ServerStatus";
const CALL_LIST: &str = "/api/CallList";

/// Server-wide game API calls
#[derive(Debug, Clone)]
pub struct Core {
    handler: RequestHandler,
    base: String,
}

impl Core {
    pub(crate) fn new(handler: RequestHandler, base: impl Into<String>) -> Self {
        Self {
            handler,
            base: base.into(),
        }
    }

    /// Whether the server is up and how many players are online
    pub async fn server_status(&self) -> RequestResult<ApiResponse<ServerStatus>> {
        let request = ApiRequest::new(&self.base, game_path(&self.handler, SERVER_STATUS));
        self.handler.request(&request).await
    }

    /// Access-mask groups and the calls in each
    pub async fn call_list(&self) -> RequestResult<ApiResponse<CallList>> {
        let request = ApiRequest::new(&self.base, game_path(&self.handler, CALL_LIST));
        self.handler.request(&request).await
    }
}
