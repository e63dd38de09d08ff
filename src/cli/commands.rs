//! CLI commands and argument parsing

use crate::decode::Format;
use crate::types::ApiKey;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the EVE Online API and market services
#[derive(Parser, Debug)]
#[command(name = "evelib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache registry file, overriding the configuration
    #[arg(long, global = true)]
    pub cache_file: Option<PathBuf>,

    /// Payload format requested from the game API
    #[arg(short, long, global = true)]
    pub format: Option<PayloadFormat>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show server status
    ServerStatus,

    /// List API calls and their access-mask groups
    CallList,

    /// Show a character's market orders
    MarketOrders {
        #[command(flatten)]
        key: KeyArgs,

        /// Character to query
        #[arg(long)]
        character_id: i64,

        /// Only this order
        #[arg(long)]
        order_id: Option<i64>,
    },

    /// Show a character's wallet transactions, newest first
    WalletTransactions {
        #[command(flatten)]
        key: KeyArgs,

        /// Character to query
        #[arg(long)]
        character_id: i64,

        /// Rows per page
        #[arg(long, default_value = "50")]
        count: u32,

        /// Number of pages to fetch, walking backwards
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Show EVE-Central statistics for item types
    MarketStat {
        /// Item type id (repeatable)
        #[arg(long = "type-id", required = true)]
        type_ids: Vec<i64>,

        /// Region id (repeatable)
        #[arg(long = "region")]
        regions: Vec<i64>,

        /// Only orders reported within this many hours
        #[arg(long)]
        hours: Option<u32>,
    },
}

/// API key arguments
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// API key id
    #[arg(long)]
    pub key_id: i64,

    /// API key verification code
    #[arg(long)]
    pub v_code: String,
}

impl KeyArgs {
    pub fn api_key(&self) -> ApiKey {
        ApiKey::new(self.key_id, self.v_code.clone())
    }
}

/// Payload format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PayloadFormat {
    Xml,
    Json,
}

impl From<PayloadFormat> for Format {
    fn from(format: PayloadFormat) -> Self {
        match format {
            PayloadFormat::Xml => Format::Xml,
            PayloadFormat::Json => Format::Json,
        }
    }
}
