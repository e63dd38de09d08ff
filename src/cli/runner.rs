//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, KeyArgs};
use crate::client::EveLib;
use crate::config::ClientConfig;
use crate::entity::EveCentralOptions;
use crate::error::Result;
use futures::StreamExt;
use serde::Serialize;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let eve = EveLib::open(self.load_config()?).await?;

        match &self.cli.command {
            Commands::ServerStatus => self.output(&eve.core().server_status().await?),
            Commands::CallList => self.output(&eve.core().call_list().await?),
            Commands::MarketOrders {
                key,
                character_id,
                order_id,
            } => self.output(
                &eve.character(key.api_key(), *character_id)
                    .market_orders(*order_id)
                    .await?,
            ),
            Commands::WalletTransactions {
                key,
                character_id,
                count,
                pages,
            } => {
                self.wallet_transactions(&eve, key, *character_id, *count, *pages)
                    .await
            }
            Commands::MarketStat {
                type_ids,
                regions,
                hours,
            } => {
                let options = EveCentralOptions {
                    type_ids: type_ids.clone(),
                    regions: regions.clone(),
                    hours: *hours,
                    ..EveCentralOptions::default()
                };
                self.output(&eve.eve_central().market_stat(&options).await?)
            }
        }
    }

    /// Configuration file (or defaults) with command-line overrides applied
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(path) = &self.cli.cache_file {
            config.cache.registry_file = Some(path.clone());
        }
        if let Some(format) = self.cli.format {
            config.format = format.into();
        }
        config.validate()?;
        Ok(config)
    }

    async fn wallet_transactions(
        &self,
        eve: &EveLib,
        key: &KeyArgs,
        character_id: i64,
        count: u32,
        pages: u32,
    ) -> Result<()> {
        if pages == 0 {
            return Ok(());
        }
        let first = eve
            .character(key.api_key(), character_id)
            .wallet_transactions(count)
            .await?;
        self.output(first.response())?;

        let remaining = (pages - 1) as usize;
        let mut older = std::pin::pin!(first.walk_older(count).take(remaining));
        let mut fetched = 1;
        while let Some(page) = older.next().await {
            self.output(page?.response())?;
            fetched += 1;
        }
        info!(pages = fetched, "Wallet walk finished");
        Ok(())
    }

    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
