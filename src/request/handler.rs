//! Request handler implementation

use super::types::ApiRequest;
use crate::cache::ExpirationRegistry;
use crate::decode::{FromNode, Serializer};
use crate::error::{RequestError, RequestResult, TransportError};
use crate::http::{Transport, TransportRequest, TransportResponse};
use crate::model::{ApiError, CachedResult};
use crate::types::CachePolicy;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues requests through a transport and decodes them with a serializer.
///
/// Clones share the transport and the registry.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    transport: Arc<dyn Transport>,
    serializer: Arc<dyn Serializer>,
    registry: ExpirationRegistry,
}

impl RequestHandler {
    /// Create a new handler
    pub fn new(
        transport: Arc<dyn Transport>,
        serializer: Arc<dyn Serializer>,
        registry: ExpirationRegistry,
    ) -> Self {
        Self {
            transport,
            serializer,
            registry,
        }
    }

    /// Same transport and registry, different payload format
    #[must_use]
    pub fn with_serializer(&self, serializer: Arc<dyn Serializer>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            serializer,
            registry: self.registry.clone(),
        }
    }

    /// The shared expiration registry
    pub fn registry(&self) -> &ExpirationRegistry {
        &self.registry
    }

    /// The active serializer
    pub fn serializer(&self) -> &Arc<dyn Serializer> {
        &self.serializer
    }

    /// Perform one call and decode its result.
    ///
    /// The cache hint is `PreferCache` only while the registry holds a future
    /// expiration for the call's identity. Successful results that declare an
    /// expiration update the registry, which is then saved on a best-effort
    /// basis.
    pub async fn request<T>(&self, request: &ApiRequest) -> RequestResult<T>
    where
        T: FromNode + CachedResult,
    {
        let identity = request.identity();
        let cache_policy = if self.registry.is_fresh(&identity, Utc::now()).await {
            CachePolicy::PreferCache
        } else {
            CachePolicy::ForceReload
        };
        debug!(identity = %identity, ?cache_policy, "Issuing request");

        let response = self
            .transport
            .perform(TransportRequest::new(request.url(), request.all_params()).with_policy(cache_policy))
            .await?;

        if !response.is_success() {
            return Err(self.classify_failure(response));
        }

        let document = self.serializer.parse(&response.body)?;
        if let Some(error) = ApiError::detect(&document)? {
            return Err(RequestError::Rejected {
                code: error.code,
                text: error.text,
                cause: None,
            });
        }
        let value = T::from_node(&document)?;

        if let Some(expires) = value.cached_until() {
            debug!(identity = %identity, %expires, from_cache = response.from_cache, "Recording expiration");
            self.registry.upsert(identity, expires).await;
            self.persist().await;
        }

        Ok(value)
    }

    /// Map a non-2xx response to `Rejected` when it carries an error document,
    /// to `Transport` otherwise
    fn classify_failure(&self, response: TransportResponse) -> RequestError {
        let rejection = match response.body.trim() {
            "" => None,
            body => self
                .serializer
                .parse(body)
                .ok()
                .and_then(|document| ApiError::detect(&document).ok().flatten()),
        };
        let cause = TransportError::status(response.status, response.body);

        match rejection {
            Some(error) => {
                debug!(status = response.status, code = error.code, "Request rejected");
                RequestError::Rejected {
                    code: error.code,
                    text: error.text,
                    cause: Some(cause),
                }
            }
            None => RequestError::Transport { cause },
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.registry.save().await {
            warn!(error = %e, "Failed to persist cache registry");
        }
    }
}
