//! Instrument lexicon: the catalogue of known instrument names and the
//! tokens used to find them inside sample filenames.
//!
//! Filenames join instrument and articulation with underscores, so a
//! multi-word instrument has to collapse into a single token that the
//! matcher can tell apart from the articulation that follows it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Instrument names shipped with the orchestral library this tool targets.
pub const DEFAULT_CATALOGUE: &[&str] = &[
    "Violins I",
    "Violins II",
    "Violas",
    "Celli",
    "Basses",
    "Piccolo",
    "Flute 1",
    "Flute 2",
    "Oboe 1",
    "Oboe 2",
    "English Horn",
    "Clarinet 1",
    "Clarinet 2",
    "Bass Clarinet",
    "Bassoon 1",
    "Bassoon 2",
    "Contra Bassoon",
    "Horn",
    "Horns",
    "Trumpet",
    "Trumpets",
    "Trombone",
    "Trombones",
    "Euphonium",
    "Tuba",
    "Bell Tree",
    "Castanets",
    "Celesta",
    "Chimes",
    "Cowbells",
    "Crotales",
    "Cymbal 18 Inch",
    "Cymbal 20 Inch",
    "Glockenspiel",
    "Harp",
    "Harp Pres De",
    "Marimba",
    "Piatti",
    "Snare 1",
    "Snare 2",
    "Snare 3",
    "Snare 4",
    "Tam Tam",
    "Tambourine 1",
    "Tambourine 2",
    "Timpani",
    "Toms",
    "Toms Timpani",
    "Triangle",
    "Vibraphone",
    "Vibraslap",
    "Gran Cassa",
    "Temple Blocks",
    "Wood Blocks",
    "Xylophone",
    "Congas",
    "Bongos",
];

/// One catalogue entry with its derived match token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentEntry {
    pub canonical_name: String,
    pub match_token: String,
}

impl InstrumentEntry {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        let canonical_name = canonical_name.into();
        let match_token = match_token(&canonical_name);
        InstrumentEntry {
            canonical_name,
            match_token,
        }
    }
}

/// Derive the filename token for an instrument name.
///
/// - `"Violins I"` -> `"Violins1"`, `"Violins II"` -> `"Violins2"`
/// - `"Flute 2"` -> `"Flute2"` (trailing digits glue onto the first word)
/// - `"Tam Tam"` -> `"Tam_Tam"`
/// - single words pass through
pub fn match_token(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();

    match parts.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [first, .., last] => match *last {
            "I" => format!("{first}1"),
            "II" => format!("{first}2"),
            digits if digits.chars().all(|c| c.is_ascii_digit()) => format!("{first}{digits}"),
            _ => parts.join("_"),
        },
    }
}

/// The immutable set of instruments the matcher recognises.
///
/// Built once and passed explicitly to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<InstrumentEntry>,
}

impl Lexicon {
    /// Build a lexicon, rejecting names that collapse onto the same token.
    ///
    /// Exact duplicate names are folded; empty names are ignored.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<InstrumentEntry> = Vec::new();
        let mut by_token: HashMap<String, usize> = HashMap::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            let entry = InstrumentEntry::new(name);
            if let Some(&idx) = by_token.get(&entry.match_token) {
                let existing = &entries[idx];
                if existing.canonical_name == entry.canonical_name {
                    continue;
                }
                return Err(Error::DuplicateToken {
                    token: entry.match_token,
                    first: existing.canonical_name.clone(),
                    second: entry.canonical_name,
                });
            }

            by_token.insert(entry.match_token.clone(), entries.len());
            entries.push(entry);
        }

        Ok(Lexicon { entries })
    }

    /// The built-in catalogue plus any extra names.
    pub fn with_extras<I, S>(extras: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = DEFAULT_CATALOGUE
            .iter()
            .map(|s| s.to_string())
            .chain(extras.into_iter().map(|s| s.as_ref().to_string()))
            .collect();
        Lexicon::new(names)
    }

    /// Entries in catalogue order.
    pub fn entries(&self) -> &[InstrumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a match token.
    pub fn by_token(&self, token: &str) -> Option<&InstrumentEntry> {
        self.entries.iter().find(|e| e.match_token == token)
    }

    /// Look up an entry by token or catalogue name, so `Violins I` and
    /// `Violins1` both find the same instrument.
    pub fn resolve(&self, name: &str) -> Option<&InstrumentEntry> {
        let name = name.trim();
        self.by_token(name)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.canonical_name.eq_ignore_ascii_case(name))
            })
            .or_else(|| self.by_token(&match_token(name)))
    }

    /// Tokens ordered longest first, ties broken lexicographically.
    ///
    /// This is the order the matcher's alternation must use so that
    /// `Horns` wins over `Horn` and `Toms_Timpani` over `Toms`.
    pub fn tokens_longest_first(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self
            .entries
            .iter()
            .map(|e| e.match_token.as_str())
            .collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            entries: DEFAULT_CATALOGUE
                .iter()
                .map(|name| InstrumentEntry::new(*name))
                .collect(),
        }
    }
}
