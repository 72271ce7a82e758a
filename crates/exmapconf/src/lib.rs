//! Layered configuration for exmap.
//!
//! Settings describe the sample library being scanned (marker, container
//! extension, extra instruments), how articulations are classified and
//! ordered, and where expression maps are written.
//!
//! # Usage
//!
//! ```rust,no_run
//! use exmapconf::ExmapConfig;
//!
//! let config = ExmapConfig::load().expect("Failed to load config");
//! println!("Marker: {}", config.library.marker);
//! println!("Output: {}", config.output.dir.display());
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/exmap/config.toml` (system)
//! 2. `~/.config/exmap/config.toml` (user)
//! 3. `./exmap.toml` (local override) or the path given with `--config`
//! 4. Environment variables (`EXMAP_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [library]
//! marker = "_Iconica_SP_"
//! marker_case_insensitive = true
//! extension = "vstsound"
//! instruments = ["Bass Flute"]
//!
//! [ordering]
//! policy = "curated"
//! preferred = ["Legato", "Sustain", "Long"]
//!
//! [classify.phrases]
//! Chop = "short"
//!
//! [output]
//! dir = "~/Documents/Expression Maps"
//! extension = "expressionmap"
//! variants = ["directional", "attribute"]
//!
//! [logging]
//! log_level = "info"
//! ```

pub mod library;
pub mod loader;
pub mod output;

pub use library::{ClassifyConfig, LibraryConfig, OrderingConfig, OrderingPolicyKind};
pub use loader::{discover_config_files_with_override, ConfigSources};
pub use output::{LoggingConfig, OutputConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Complete exmap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExmapConfig {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub ordering: OrderingConfig,

    #[serde(default)]
    pub classify: ClassifyConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExmapConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/exmap/config.toml`
    /// 3. `~/.config/exmap/config.toml`
    /// 4. `./exmap.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with `config_path` standing in for `./exmap.toml`.
    ///
    /// System and user configs still load first. A `config_path` that does
    /// not exist is an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut merged = toml::Table::new();

        for path in loader::discover_config_files_with_override(config_path) {
            let table = loader::load_table(&path)?;
            loader::merge_tables(&mut merged, table);
            sources.files.push(path);
        }

        let origin = sources
            .files
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("<defaults>"));
        let mut config = loader::from_table(merged, &origin)?;

        loader::apply_env_overrides(&mut config, &mut sources)?;

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# exmap configuration\n\n");

        output.push_str("[library]\n");
        output.push_str(&format!("marker = {}\n", quoted(&self.library.marker)));
        output.push_str(&format!(
            "marker_case_insensitive = {}\n",
            self.library.marker_case_insensitive
        ));
        output.push_str(&format!("extension = {}\n", quoted(&self.library.extension)));
        output.push_str(&format!(
            "instruments = {}\n",
            string_array(&self.library.instruments)
        ));

        output.push_str("\n[ordering]\n");
        output.push_str(&format!("policy = \"{}\"\n", self.ordering.policy.as_str()));
        output.push_str(&format!(
            "preferred = {}\n",
            string_array(&self.ordering.preferred)
        ));

        output.push_str("\n[classify.phrases]\n");
        for (phrase, category) in &self.classify.phrases {
            output.push_str(&format!("{} = {}\n", quoted(phrase), quoted(category)));
        }

        output.push_str("\n[output]\n");
        output.push_str(&format!(
            "dir = {}\n",
            quoted(&self.output.dir.display().to_string())
        ));
        output.push_str(&format!("extension = {}\n", quoted(&self.output.extension)));
        output.push_str(&format!(
            "variants = {}\n",
            string_array(&self.output.variants)
        ));

        output.push_str("\n[logging]\n");
        output.push_str(&format!("log_level = {}\n", quoted(&self.logging.log_level)));

        output
    }
}

fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

fn string_array(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| quoted(s)).collect();
    format!("[{}]", inner.join(", "))
}
