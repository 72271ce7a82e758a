//! Output and logging settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how expression maps are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default: expressionmaps
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: PathBuf,

    /// Default: expressionmap
    #[serde(default = "OutputConfig::default_extension")]
    pub extension: String,

    /// Variants to write per instrument.
    /// Default: ["directional", "attribute"]
    #[serde(default = "OutputConfig::default_variants")]
    pub variants: Vec<String>,
}

impl OutputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("expressionmaps")
    }

    fn default_extension() -> String {
        "expressionmap".to_string()
    }

    fn default_variants() -> Vec<String> {
        vec!["directional".to_string(), "attribute".to_string()]
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            extension: Self::default_extension(),
            variants: Self::default_variants(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    /// Default: info
    #[serde(default = "LoggingConfig::default_log_level")]
    pub log_level: String,
}

impl LoggingConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
