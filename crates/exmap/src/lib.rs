//! Expression map generation from sample-library filenames.
//!
//! This crate recognises instrument and articulation names in sample
//! container filenames, classifies and orders the articulations, and
//! emits one host expression map per instrument and variant.
//!
//! # Example
//!
//! ```
//! use exmap::{Pipeline, PipelineConfig, Variant};
//!
//! let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
//! let result = pipeline
//!     .scan([
//!         "Iconica_Iconica_SP_Violins1_Staccato.vstsound",
//!         "Iconica_Iconica_SP_Violins1_Legato.vstsound",
//!     ])
//!     .unwrap();
//!
//! let doc = pipeline.build(&result.value, "Violins1", Variant::Directional).unwrap();
//! assert_eq!(doc.slots[0].name, "Legato");
//!
//! let xml = exmap::to_xml(&doc).unwrap();
//! assert!(xml.contains("Violins1 Expression Map (Directional)"));
//! ```

use std::path::PathBuf;

pub mod builder;
pub mod classify;
pub mod document;
pub mod feedback;
pub mod group;
pub mod lexicon;
pub mod matcher;
pub mod midi;
pub mod pipeline;
pub mod writer;

pub use classify::{
    ArticulationRecord, Category, CategoryTable, Classifier, OrderingPolicy, SortRank,
};
pub use document::{ExpressionMapDocument, Variant};
pub use feedback::{ScanResult, SkipReason, Skipped};
pub use group::{InstrumentGroup, InstrumentGroups, TriggeredArticulation};
pub use lexicon::{InstrumentEntry, Lexicon};
pub use matcher::{FilenameMatcher, MatcherConfig, ParsedSample};
pub use pipeline::{Pipeline, PipelineConfig};
pub use writer::{to_xml, DocumentWriter};

/// Errors from matching, building and writing expression maps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized filename {filename}: {reason}")]
    UnrecognizedFilename {
        filename: String,
        reason: SkipReason,
    },

    #[error("instrument not found: {0}")]
    InstrumentNotFound(String),

    #[error("instrument {0} has no articulations")]
    EmptyArticulationSet(String),

    #[error("instruments {first:?} and {second:?} share the match token {token:?}")]
    DuplicateToken {
        token: String,
        first: String,
        second: String,
    },

    #[error("invalid filename pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("unknown articulation category: {0}")]
    UnknownCategory(String),

    #[error("unknown map variant: {0}")]
    UnknownVariant(String),

    #[error("XML serialization failed: {0}")]
    Xml(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
