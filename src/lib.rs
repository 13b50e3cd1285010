//! sankey-gen - budget flow diagrams from a transaction ledger
//!
//! This library turns a ledger CSV export into SankeyMatic input: how the
//! income of a reporting window splits into spending categories and
//! savings.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration loading and path resolution
//! - `error`: Custom error types
//! - `models`: Transactions, date windows, category sums and flow lines
//! - `services`: Ledger import, filtering and summarizing
//! - `reports`: Income, expense and savings flows, and the full report
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use sankey_gen::config::{Config, ConfigPaths};
//!
//! let config = Config::load(&ConfigPaths::default())?;
//! let written = sankey_gen::reports::run(&config)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{SankeyError, SankeyResult};
