//! Config file discovery, loading, and environment variable overlay.

use crate::library::OrderingPolicyKind;
use crate::{ConfigError, ExmapConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// A CLI path replaces the local `./exmap.toml` and is returned even when
/// missing, so that loading reports it instead of silently using defaults.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/exmap/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("exmap/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("exmap.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file into a raw table.
pub fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file over the compiled defaults.
pub fn load_from_file(path: &Path) -> Result<ExmapConfig, ConfigError> {
    let table = load_table(path)?;
    from_table(table, path)
}

/// Deep-merge `overlay` into `base`. Nested tables merge key by key;
/// any other value (arrays included) replaces the base value.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Turn a merged table into a config. Missing keys take their defaults.
pub fn from_table(table: toml::Table, path: &Path) -> Result<ExmapConfig, ConfigError> {
    let mut config = toml::Value::Table(table)
        .try_into::<ExmapConfig>()
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(dir) = config.output.dir.to_str().map(expand_path) {
        config.output.dir = dir;
    }

    Ok(config)
}

#[cfg(test)]
pub(crate) fn parse_toml(contents: &str, path: &Path) -> Result<ExmapConfig, ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    from_table(table, path)
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(
    config: &mut ExmapConfig,
    sources: &mut ConfigSources,
) -> Result<(), ConfigError> {
    apply_overrides_from(config, sources, |key| env::var(key).ok())
}

/// Apply overrides from any key lookup. `EXMAP_LOG_LEVEL` wins over `RUST_LOG`.
pub fn apply_overrides_from<F>(
    config: &mut ExmapConfig,
    sources: &mut ConfigSources,
    lookup: F,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("EXMAP_MARKER") {
        config.library.marker = v;
        sources.env_overrides.push("EXMAP_MARKER".to_string());
    }
    if let Some(v) = lookup("EXMAP_EXTENSION") {
        config.library.extension = v;
        sources.env_overrides.push("EXMAP_EXTENSION".to_string());
    }

    if let Some(v) = lookup("EXMAP_ORDERING") {
        config.ordering.policy =
            OrderingPolicyKind::parse(&v).ok_or_else(|| ConfigError::Invalid {
                key: "EXMAP_ORDERING".to_string(),
                value: v.clone(),
            })?;
        sources.env_overrides.push("EXMAP_ORDERING".to_string());
    }

    if let Some(v) = lookup("EXMAP_OUTPUT_DIR") {
        config.output.dir = expand_path(&v);
        sources.env_overrides.push("EXMAP_OUTPUT_DIR".to_string());
    }
    if let Some(v) = lookup("EXMAP_OUTPUT_EXTENSION") {
        config.output.extension = v;
        sources.env_overrides.push("EXMAP_OUTPUT_EXTENSION".to_string());
    }

    if let Some(v) = lookup("RUST_LOG") {
        config.logging.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
    if let Some(v) = lookup("EXMAP_LOG_LEVEL") {
        config.logging.log_level = v;
        sources.env_overrides.push("EXMAP_LOG_LEVEL".to_string());
    }

    Ok(())
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        match directories::BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(stripped),
            None => PathBuf::from(path),
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        // $VAR/rest/of/path
        match stripped.split_once('/') {
            Some((var_name, rest)) => env::var(var_name)
                .map(|value| PathBuf::from(value).join(rest))
                .unwrap_or_else(|_| PathBuf::from(path)),
            None => env::var(stripped)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(path)),
        }
    } else {
        PathBuf::from(path)
    }
}
