//! Path management for sankey-gen
//!
//! ## Configuration Resolution Order
//!
//! 1. `--config` flag or `SANKEY_GEN_CONFIG` environment variable (must exist)
//! 2. `config.yaml` in the working directory
//! 3. `config-sample.yaml` in the working directory

use std::path::{Path, PathBuf};

/// Primary configuration file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Configuration used when the primary file does not exist
pub const SAMPLE_CONFIG_FILE: &str = "config-sample.yaml";

/// Ledger location used unless `paths.use_custom_input` is set
pub const DEFAULT_INPUT_FILE: &str = "data/transactions.csv";

/// Diagram location used unless `paths.use_custom_output` is set
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Candidate locations for the configuration file
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    explicit: Option<PathBuf>,
    primary: PathBuf,
    fallback: PathBuf,
}

impl ConfigPaths {
    /// Default candidates relative to the working directory
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            primary: PathBuf::from(CONFIG_FILE),
            fallback: PathBuf::from(SAMPLE_CONFIG_FILE),
        }
    }

    /// Candidates inside a specific directory (useful for testing)
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            explicit: None,
            primary: dir.join(CONFIG_FILE),
            fallback: dir.join(SAMPLE_CONFIG_FILE),
        }
    }

    /// Force a specific configuration file
    pub fn set_explicit(&mut self, path: PathBuf) {
        self.explicit = Some(path);
    }

    pub fn explicit(&self) -> Option<&Path> {
        self.explicit.as_deref()
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    pub fn fallback(&self) -> &Path {
        &self.fallback
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
