//! Endpoint façades
//!
//! Each façade binds a request handler, a base URL and (where needed) a
//! credential, and exposes one method per endpoint. Walkable endpoints
//! return a [`Page`](crate::pagination::Page) whose fetch is bound to the
//! endpoint and its fixed parameters.

mod character;
mod core;
mod corporation;
mod eve_central;
mod eve_market_data;

pub use self::core::Core;
pub use character::Character;
pub use corporation::{Corporation, DEFAULT_DIVISION};
pub use eve_central::{EveCentral, EveCentralOptions};
pub use eve_market_data::{EveMarketData, EveMarketDataOptions};

use crate::decode::FromNode;
use crate::error::RequestResult;
use crate::model::ApiResponse;
use crate::pagination::{Fetch, Page, WalkCursor};
use crate::request::{ApiRequest, RequestHandler};
use futures::FutureExt;
use std::sync::Arc;

/// Fetch the first page of a walkable endpoint and bind its fetch.
///
/// `template` already carries the endpoint's fixed parameters; every page
/// adds `rowCount`, and pages after the first add `fromID`.
async fn first_page<T>(
    handler: &RequestHandler,
    template: ApiRequest,
    count: u32,
) -> RequestResult<Page<T>>
where
    T: FromNode + Send + 'static,
{
    let response = handler
        .request::<ApiResponse<T>>(&template.clone().param("rowCount", count))
        .await?;
    Ok(Page::new(response, bound_fetch(handler.clone(), template)))
}

fn bound_fetch<T>(handler: RequestHandler, template: ApiRequest) -> Fetch<T>
where
    T: FromNode + Send + 'static,
{
    Arc::new(move |cursor: WalkCursor| {
        let handler = handler.clone();
        let request = template
            .clone()
            .param("rowCount", cursor.count)
            .param("fromID", cursor.from_id);
        async move { handler.request::<ApiResponse<T>>(&request).await }.boxed()
    })
}

/// Game API path for `endpoint` in the handler's payload format,
/// e.g. `/server/ServerStatus.xml.aspx`
fn game_path(handler: &RequestHandler, endpoint: &str) -> String {
    format!("{endpoint}.{}.aspx", handler.serializer().format().as_str())
}

/// Comma-separated id list, as list parameters are written
fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}
