//! CLI module
//!
//! Command-line interface over an `EveLib` session.
//!
//! # Commands
//!
//! - `server-status` - Server status and online player count
//! - `call-list` - Access-mask groups and calls
//! - `market-orders` - A character's market orders
//! - `wallet-transactions` - A character's wallet, walking back page by page
//! - `market-stat` - EVE-Central price statistics

mod commands;
mod runner;

pub use commands::{Cli, Commands, KeyArgs, PayloadFormat};
pub use runner::Runner;
