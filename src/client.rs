//! Client session
//!
//! [`EveLib`] owns the configuration, one transport and one expiration
//! registry, and hands out façades that all share them.

use crate::cache::ExpirationRegistry;
use crate::config::ClientConfig;
use crate::decode::{serializer_for, Format};
use crate::entity::{Character, Core, Corporation, EveCentral, EveMarketData};
use crate::error::Result;
use crate::http::{HttpTransport, Transport};
use crate::request::RequestHandler;
use crate::types::ApiKey;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entry point to every service
#[derive(Debug, Clone)]
pub struct EveLib {
    config: ClientConfig,
    handler: RequestHandler,
}

impl EveLib {
    /// Open a session over HTTP.
    ///
    /// A configured registry file is loaded if present. If it cannot be read
    /// the session starts with an empty registry backed by the same file.
    pub async fn open(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(config.transport_config())?;
        let registry = open_registry(&config).await;
        Ok(Self::with_parts(config, Arc::new(transport), registry))
    }

    /// Build a session from an existing transport and registry
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        registry: ExpirationRegistry,
    ) -> Self {
        let handler = RequestHandler::new(transport, serializer_for(config.format), registry);
        Self { config, handler }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The registry shared by every façade of this session
    pub fn registry(&self) -> &ExpirationRegistry {
        self.handler.registry()
    }

    /// Server status and call list
    pub fn core(&self) -> Core {
        Core::new(self.handler.clone(), &self.config.api_url)
    }

    /// Calls for one character of `key`
    pub fn character(&self, key: ApiKey, character_id: i64) -> Character {
        Character::new(self.handler.clone(), &self.config.api_url, key, character_id)
    }

    /// Calls for the corporation behind `key`
    pub fn corporation(&self, key: ApiKey, corporation_id: i64) -> Corporation {
        Corporation::new(self.handler.clone(), &self.config.api_url, key, corporation_id)
    }

    /// EVE-Central market data, always read as XML
    pub fn eve_central(&self) -> EveCentral {
        EveCentral::new(
            self.handler.with_serializer(serializer_for(Format::Xml)),
            &self.config.eve_central_url,
        )
    }

    /// EVE-Marketdata market data, always read as JSON
    pub fn eve_market_data(&self) -> EveMarketData {
        EveMarketData::new(
            self.handler.with_serializer(serializer_for(Format::Json)),
            &self.config.eve_market_data_url,
            &self.config.market_data_char_name,
        )
    }

    /// Persist the registry now
    pub async fn save_registry(&self) -> Result<()> {
        self.handler.registry().save().await
    }
}

async fn open_registry(config: &ClientConfig) -> ExpirationRegistry {
    let Some(path) = &config.cache.registry_file else {
        return ExpirationRegistry::in_memory();
    };

    match ExpirationRegistry::open(path, config.cache.io_timeout()).await {
        Ok(registry) => {
            debug!(path = %path.display(), entries = registry.len().await, "Opened cache registry");
            registry
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load cache registry, starting empty");
            ExpirationRegistry::persistent(path).with_io_timeout(config.cache.io_timeout())
        }
    }
}
