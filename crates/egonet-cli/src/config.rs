//! `egonet.toml` project configuration.
//!
//! ```toml
//! [decompose]
//! depth = 1
//! max_components = 100
//! prefix = "component_"
//!
//! [output]
//! dir = "components"
//! ```
//!
//! Command-line flags take precedence over values from the file.

use std::fs;
use std::path::Path;

use egonet_graph::DecomposeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "egonet.toml";

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory components are written to.
    pub dir: Option<String>,
}

/// Contents of `egonet.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Decomposition parameters.
    pub decompose: DecomposeConfig,
    /// Output settings.
    pub output: OutputConfig,
}

impl ProjectConfig {
    /// Parse configuration text.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load an explicit config file, or `egonet.toml` from the current
    /// directory if present, or fall back to defaults.
    pub fn load(explicit: Option<&str>) -> CliResult<Self> {
        match explicit {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    CliError::Config(format!("cannot read {}: {}", path, e))
                })?;
                debug!("Loaded configuration from {}", path);
                Self::from_toml(&text)
            }
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    debug!("Loaded configuration from {}", CONFIG_FILE);
                    Self::from_toml(&fs::read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
