//! Page walking
//!
//! Each page carries the fetch it was produced by, fixed at creation. Pages
//! produced by walking share one session that remembers every cursor issued.

use super::types::{WalkCursor, Walkable};
use crate::error::RequestError;
use crate::model::ApiResponse;
use futures::future::BoxFuture;
use futures::stream::{self, Stream};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Bound fetch: the endpoint plus its fixed parameters, waiting for a cursor
pub type Fetch<T> = Arc<
    dyn Fn(WalkCursor) -> BoxFuture<'static, Result<ApiResponse<T>, RequestError>> + Send + Sync,
>;

/// One page of a walkable endpoint
pub struct Page<T> {
    response: ApiResponse<T>,
    fetch: Fetch<T>,
    issued: Arc<Mutex<HashSet<i64>>>,
}

impl<T> Page<T> {
    /// Start a new walking session from a first response
    pub fn new(response: ApiResponse<T>, fetch: Fetch<T>) -> Self {
        Self {
            response,
            fetch,
            issued: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The response held by this page
    pub fn response(&self) -> &ApiResponse<T> {
        &self.response
    }

    /// Consume the page, dropping its fetch
    pub fn into_response(self) -> ApiResponse<T> {
        self.response
    }
}

impl<T: Walkable> Page<T> {
    /// Cursor the next `older` call would use
    pub fn cursor(&self) -> Option<i64> {
        self.response.result.cursor()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.cursor().is_none()
    }

    /// Fetch the next page past this one's extreme record.
    ///
    /// Fails with `EmptyPage` when there is no record to take a cursor from,
    /// and with `RepeatedCursor` when the session already requested it. A
    /// failed fetch releases its cursor so the call can be retried.
    pub async fn older(&self, count: u32) -> Result<Page<T>, RequestError> {
        let cursor = self.cursor().ok_or(RequestError::EmptyPage)?;

        if !self.issued.lock().await.insert(cursor) {
            return Err(RequestError::RepeatedCursor { cursor });
        }

        debug!(cursor, count, "Walking to older page");
        match (self.fetch)(WalkCursor {
            from_id: cursor,
            count,
        })
        .await
        {
            Ok(response) => Ok(Page {
                response,
                fetch: Arc::clone(&self.fetch),
                issued: Arc::clone(&self.issued),
            }),
            Err(e) => {
                self.issued.lock().await.remove(&cursor);
                Err(e)
            }
        }
    }
}

impl<T> Page<T>
where
    T: Walkable + Clone + Send + Sync + 'static,
{
    /// Walk older pages one after another.
    ///
    /// The stream ends at the first empty page or after yielding an error.
    /// Dropping it between pages abandons the session without side effects.
    pub fn walk_older(self, count: u32) -> impl Stream<Item = Result<Page<T>, RequestError>> + Send {
        stream::unfold(Some(self), move |state| async move {
            let page = state?;
            match page.older(count).await {
                Ok(next) if next.is_empty() => None,
                Ok(next) => Some((Ok(next.clone()), Some(next))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl<T> Deref for Page<T> {
    type Target = ApiResponse<T>;

    fn deref(&self) -> &ApiResponse<T> {
        &self.response
    }
}

impl<T: Clone> Clone for Page<T> {
    fn clone(&self) -> Self {
        Self {
            response: self.response.clone(),
            fetch: Arc::clone(&self.fetch),
            issued: Arc::clone(&self.issued),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}
