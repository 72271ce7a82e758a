//! Scan feedback: filenames that were skipped and why.
//!
//! A directory scan never stops on a bad filename. Each one is recorded
//! here and surfaced once the whole listing has been processed.

use serde::{Deserialize, Serialize};

/// Why a filename produced no sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The vendor/series marker does not appear in the name.
    MissingMarker,
    /// The marker was found but no lexicon instrument followed it.
    UnknownInstrument,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingMarker => "missing vendor marker",
            SkipReason::UnknownInstrument => "no known instrument after marker",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One skipped filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub filename: String,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(filename: impl Into<String>, reason: SkipReason) -> Self {
        Skipped {
            filename: filename.into(),
            reason,
        }
    }

    /// Convert into the error kind the rest of the crate reports with.
    pub fn into_error(self) -> crate::Error {
        crate::Error::UnrecognizedFilename {
            filename: self.filename,
            reason: self.reason,
        }
    }
}

/// Collector for skipped filenames during a scan
#[derive(Debug, Default)]
pub struct FeedbackCollector {
    skipped: Vec<Skipped>,
    ignored: usize,
}

impl FeedbackCollector {
    pub fn new() -> Self {
        FeedbackCollector::default()
    }

    pub fn skip(&mut self, filename: impl Into<String>, reason: SkipReason) {
        self.skipped.push(Skipped::new(filename, reason));
    }

    /// Count a file that was not a sample container at all.
    pub fn ignore(&mut self) {
        self.ignored += 1;
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn into_parts(self) -> (Vec<Skipped>, usize) {
        (self.skipped, self.ignored)
    }
}

/// Result of a scan with feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult<T> {
    pub value: T,
    pub skipped: Vec<Skipped>,
    /// Files silently passed over because of their extension.
    pub ignored: usize,
}

impl<T> ScanResult<T> {
    pub fn new(value: T, collector: FeedbackCollector) -> Self {
        let (skipped, ignored) = collector.into_parts();
        ScanResult {
            value,
            skipped,
            ignored,
        }
    }

    pub fn ok(value: T) -> Self {
        ScanResult {
            value,
            skipped: Vec::new(),
            ignored: 0,
        }
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> impl Iterator<Item = &Skipped> {
        self.skipped.iter().filter(move |s| s.reason == reason)
    }

    /// Skipped filenames as crate errors, for callers that report them that way.
    pub fn errors(&self) -> impl Iterator<Item = crate::Error> + '_ {
        self.skipped.iter().cloned().map(Skipped::into_error)
    }
}
