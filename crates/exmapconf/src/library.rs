//! Library settings: which files to read and how to interpret them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How sample filenames are recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Vendor/series marker, as a regex fragment.
    /// Default: _Iconica_SP_
    #[serde(default = "LibraryConfig::default_marker")]
    pub marker: String,

    /// Default: true
    #[serde(default = "LibraryConfig::default_marker_case_insensitive")]
    pub marker_case_insensitive: bool,

    /// Sample container extension, without the dot.
    /// Default: vstsound
    #[serde(default = "LibraryConfig::default_extension")]
    pub extension: String,

    /// Instrument names added to the built-in catalogue.
    #[serde(default)]
    pub instruments: Vec<String>,
}

impl LibraryConfig {
    fn default_marker() -> String {
        "_Iconica_SP_".to_string()
    }

    fn default_marker_case_insensitive() -> bool {
        true
    }

    fn default_extension() -> String {
        "vstsound".to_string()
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            marker: Self::default_marker(),
            marker_case_insensitive: Self::default_marker_case_insensitive(),
            extension: Self::default_extension(),
            instruments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicyKind {
    Curated,
    Lexicographic,
}

impl OrderingPolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingPolicyKind::Curated => "curated",
            OrderingPolicyKind::Lexicographic => "lexicographic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "curated" => Some(OrderingPolicyKind::Curated),
            "lexicographic" | "alphabetical" => Some(OrderingPolicyKind::Lexicographic),
            _ => None,
        }
    }
}

/// Slot ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Default: curated
    #[serde(default = "OrderingConfig::default_policy")]
    pub policy: OrderingPolicyKind,

    /// Names that lead the slot list under the curated policy.
    /// Default: ["Legato", "Sustain", "Long"]
    #[serde(default = "OrderingConfig::default_preferred")]
    pub preferred: Vec<String>,
}

impl OrderingConfig {
    fn default_policy() -> OrderingPolicyKind {
        OrderingPolicyKind::Curated
    }

    fn default_preferred() -> Vec<String> {
        vec!["Legato".to_string(), "Sustain".to_string(), "Long".to_string()]
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            policy: Self::default_policy(),
            preferred: Self::default_preferred(),
        }
    }
}

/// Extra classification phrases: phrase -> category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub phrases: BTreeMap<String, String>,
}
