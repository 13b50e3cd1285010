//! Configuration module for sankey-gen
//!
//! This module provides configuration management including:
//! - Configuration file resolution with a sample fallback
//! - The typed report configuration

pub mod paths;
pub mod settings;

pub use paths::ConfigPaths;
pub use settings::{CategoryGroup, Config, IncomeSourceKind};
