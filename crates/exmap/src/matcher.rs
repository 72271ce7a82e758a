//! Filename matcher: pulls `(instrument, articulation)` out of a sample
//! container filename.
//!
//! Names look like `<anything><marker><Instrument>_<Articulation_Words>.<ext>`,
//! for example `Iconica_Iconica_SP_Violins1_Legato_Slow.vstsound`.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::feedback::{FeedbackCollector, ScanResult, SkipReason};
use crate::lexicon::Lexicon;
use crate::Result;

pub const DEFAULT_MARKER: &str = "_Iconica_SP_";
pub const DEFAULT_CONTAINER_EXTENSION: &str = "vstsound";

/// Which files count as samples of the targeted library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Regex fragment locating the vendor/series marker.
    pub marker: String,
    pub marker_case_insensitive: bool,
    /// Container extension without the leading dot.
    pub extension: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            marker: DEFAULT_MARKER.to_string(),
            marker_case_insensitive: true,
            extension: DEFAULT_CONTAINER_EXTENSION.to_string(),
        }
    }
}

/// One matched filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSample {
    /// Lexicon match token, e.g. `Violins1`.
    pub instrument: String,
    /// Articulation with underscores turned into spaces, e.g. `Legato Slow`.
    pub articulation_raw: String,
    pub source_filename: String,
}

/// What the matcher made of a single filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(ParsedSample),
    /// Not a container file; not worth reporting.
    Ignored,
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub struct FilenameMatcher {
    extension: String,
    marker: Regex,
    instruments: Option<Regex>,
}

impl FilenameMatcher {
    pub fn new(lexicon: &Lexicon, config: &MatcherConfig) -> Result<Self> {
        let marker = RegexBuilder::new(&config.marker)
            .case_insensitive(config.marker_case_insensitive)
            .build()?;

        // Alternation order matters: the regex engine takes the first
        // alternative that succeeds, so longer tokens go first.
        let tokens = lexicon.tokens_longest_first();
        let instruments = if tokens.is_empty() {
            None
        } else {
            let alternation = tokens
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("^({alternation})_(.+)$"))?)
        };

        let extension = format!(".{}", config.extension.trim_start_matches('.'));

        Ok(FilenameMatcher {
            extension,
            marker,
            instruments,
        })
    }

    /// Match a single filename.
    pub fn match_filename(&self, filename: &str) -> MatchOutcome {
        let Some(stem) = self.strip_extension(filename) else {
            return MatchOutcome::Ignored;
        };

        let Some(marker) = self.marker.find(stem) else {
            return MatchOutcome::Skipped(SkipReason::MissingMarker);
        };

        let remainder = &stem[marker.end()..];
        let captures = self
            .instruments
            .as_ref()
            .and_then(|re| re.captures(remainder));

        match captures {
            Some(caps) => MatchOutcome::Matched(ParsedSample {
                instrument: caps[1].to_string(),
                articulation_raw: caps[2].replace('_', " "),
                source_filename: filename.to_string(),
            }),
            None => MatchOutcome::Skipped(SkipReason::UnknownInstrument),
        }
    }

    /// Match every filename in a listing.
    ///
    /// The listing is sorted first, so results never depend on the order
    /// the directory happened to return entries in.
    pub fn scan<I, S>(&self, filenames: I) -> ScanResult<Vec<ParsedSample>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = filenames
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        names.sort();

        let mut collector = FeedbackCollector::new();
        let mut samples = Vec::new();

        for name in names {
            match self.match_filename(&name) {
                MatchOutcome::Matched(sample) => samples.push(sample),
                MatchOutcome::Ignored => collector.ignore(),
                MatchOutcome::Skipped(reason) => {
                    match reason {
                        SkipReason::MissingMarker => debug!(filename = %name, "{}", reason),
                        SkipReason::UnknownInstrument => warn!(filename = %name, "{}", reason),
                    }
                    collector.skip(name, reason);
                }
            }
        }

        ScanResult::new(samples, collector)
    }

    fn strip_extension<'a>(&self, filename: &'a str) -> Option<&'a str> {
        let split = filename.len().checked_sub(self.extension.len())?;
        if split == 0 {
            return None;
        }
        let suffix = filename.get(split..)?;
        if suffix.eq_ignore_ascii_case(&self.extension) {
            filename.get(..split)
        } else {
            None
        }
    }
}
