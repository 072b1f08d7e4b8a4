use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// JSON file holding the raw activity records
    pub data_path: Option<String>,
    /// Input poll interval of the terminal front end
    pub tick_ms: u64,
    pub limits: PanelLimits,
    pub observability: ObservabilityConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            tick_ms: 100,
            limits: PanelLimits::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// How many rows each ranking panel keeps after sorting by count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLimits {
    pub activity_types: usize,
    pub operatives: usize,
    pub location_types: usize,
    pub subjects: usize,
    pub locations: usize,
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self {
            activity_types: 12,
            operatives: 10,
            location_types: 10,
            subjects: 15,
            locations: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_file: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: "tui-dash.log".to_string(),
        }
    }
}

/// Layered load: built-in defaults, then the optional file at `path`, then
/// `TUI_DASH__*` environment variables.
pub fn load_config(path: &str) -> Result<DashboardConfig> {
    let config = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(Environment::with_prefix("TUI_DASH").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}
