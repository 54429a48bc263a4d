//! Optional TOML settings file.
//!
//! ```toml
//! log_level = "info"
//! log_file = "paycheck.log"
//! format = "table"   # table | csv | json
//! breakdown = false
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::report::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub breakdown: bool,
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
