//! Articulation classification and display ordering.
//!
//! Each articulation name is mapped to a performance-technique [`Category`]
//! by looking for a known phrase inside it, and given a [`SortRank`] that
//! decides its slot position in the expression map.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Performance-technique category of an articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Long,
    Short,
    Ornament,
    Accent,
    Fx,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Long,
        Category::Short,
        Category::Ornament,
        Category::Accent,
        Category::Fx,
        Category::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Long => "long",
            Category::Short => "short",
            Category::Ornament => "ornament",
            Category::Accent => "accent",
            Category::Fx => "fx",
            Category::Unknown => "unknown",
        }
    }

    /// Technique label written into the expression map.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Long => "Long",
            Category::Short => "Short",
            Category::Ornament => "Ornament",
            Category::Accent => "Accent",
            Category::Fx => "FX",
            Category::Unknown => "Unknown",
        }
    }

    /// Host color index used for the slot.
    pub fn color(&self) -> u8 {
        match self {
            Category::Long => 1,
            Category::Short => 2,
            Category::Ornament => 3,
            Category::Accent => 4,
            Category::Fx => 5,
            Category::Unknown => 0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "long" => Ok(Category::Long),
            "short" => Ok(Category::Short),
            "ornament" => Ok(Category::Ornament),
            "accent" => Ok(Category::Accent),
            "fx" | "effect" | "effects" => Ok(Category::Fx),
            "unknown" => Ok(Category::Unknown),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Phrase table shipped by default, in table order.
const DEFAULT_PHRASES: &[(&str, Category)] = &[
    ("Legato", Category::Long),
    ("Sustain", Category::Long),
    ("Long", Category::Long),
    ("Tremolo", Category::Long),
    ("Sul Tasto", Category::Long),
    ("Sul Ponticello", Category::Long),
    ("Flautando", Category::Long),
    ("Con Sordino", Category::Long),
    ("Harmonics", Category::Long),
    ("Crescendo", Category::Long),
    ("Diminuendo", Category::Long),
    ("Swell", Category::Long),
    ("Vibrato", Category::Long),
    ("Roll", Category::Long),
    ("Let Ring", Category::Long),
    ("Staccato", Category::Short),
    ("Staccatissimo", Category::Short),
    ("Spiccato", Category::Short),
    ("Pizzicato", Category::Short),
    ("Short", Category::Short),
    ("Detache", Category::Short),
    ("Col Legno", Category::Short),
    ("Hit", Category::Short),
    ("Muted", Category::Short),
    ("Choke", Category::Short),
    ("Trill", Category::Ornament),
    ("Mordent", Category::Ornament),
    ("Grace", Category::Ornament),
    ("Turn", Category::Ornament),
    ("Run", Category::Ornament),
    ("Glissando", Category::Ornament),
    ("Portamento", Category::Ornament),
    ("Rip", Category::Ornament),
    ("Fall", Category::Ornament),
    ("Doit", Category::Ornament),
    ("Flam", Category::Ornament),
    ("Ruff", Category::Ornament),
    ("Marcato", Category::Accent),
    ("Sforzando", Category::Accent),
    ("Sfz", Category::Accent),
    ("Accent", Category::Accent),
    ("Tenuto", Category::Accent),
    ("Fortepiano", Category::Accent),
    ("Stab", Category::Accent),
    ("Rimshot", Category::Accent),
    ("Bartok", Category::Accent),
    ("FX", Category::Fx),
    ("Effects", Category::Fx),
    ("Flutter", Category::Fx),
    ("Growl", Category::Fx),
    ("Cluster", Category::Fx),
    ("Aleatoric", Category::Fx),
    ("Bend", Category::Fx),
    ("Scrape", Category::Fx),
    ("Col Legno Battuto", Category::Fx),
];

/// Articulation names that lead the slot list under the curated policy.
pub const DEFAULT_PREFERRED_ORDER: &[&str] = &["Legato", "Sustain", "Long"];

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Phrase {
    text: String,
    words: Vec<String>,
    category: Category,
}

impl Phrase {
    /// Word-aligned match. A text word may add a plural `s`/`es` to the
    /// phrase word ("Run" matches "Runs", never "Crunch" or "Runaway").
    fn matches(&self, text_words: &[String]) -> bool {
        if self.words.is_empty() || self.words.len() > text_words.len() {
            return false;
        }
        text_words.windows(self.words.len()).any(|window| {
            window
                .iter()
                .zip(&self.words)
                .all(|(text, phrase)| word_matches(text, phrase))
        })
    }
}

fn word_matches(text: &str, phrase: &str) -> bool {
    match text.strip_prefix(phrase) {
        Some(rest) => matches!(rest, "" | "s" | "es"),
        None => false,
    }
}

/// Immutable phrase -> category table.
///
/// Lookup tries phrases longest first (by character count); phrases of the
/// same length keep table order. So "Col Legno Battuto" is tried before
/// "Col Legno", and "Staccato Legato" resolves to Short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    scan: Vec<Phrase>,
}

impl CategoryTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: Into<String>,
    {
        let mut scan: Vec<Phrase> = entries
            .into_iter()
            .map(|(text, category)| {
                let text = text.into();
                Phrase {
                    words: words(&text),
                    text,
                    category,
                }
            })
            .collect();
        scan.sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));
        CategoryTable { scan }
    }

    /// The default table plus extra entries.
    ///
    /// Extras come first, so they win equal-length ties, and an extra that
    /// names a default phrase replaces it.
    pub fn with_extras<I, S>(extras: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: Into<String>,
    {
        let extras: Vec<(String, Category)> =
            extras.into_iter().map(|(p, c)| (p.into(), c)).collect();
        let overridden: Vec<Vec<String>> = extras.iter().map(|(p, _)| words(p)).collect();

        let defaults = DEFAULT_PHRASES
            .iter()
            .filter(|(p, _)| !overridden.contains(&words(p)))
            .map(|(p, c)| (p.to_string(), *c));

        CategoryTable::new(extras.into_iter().chain(defaults))
    }

    /// Phrases in the order lookup tries them.
    pub fn scan_order(&self) -> impl Iterator<Item = (&str, Category)> {
        self.scan.iter().map(|p| (p.text.as_str(), p.category))
    }

    pub fn lookup(&self, text: &str) -> Category {
        let text_words = words(text);
        self.scan
            .iter()
            .find(|p| p.matches(&text_words))
            .map(|p| p.category)
            .unwrap_or(Category::Unknown)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable::new(DEFAULT_PHRASES.iter().map(|(p, c)| (*p, *c)))
    }
}

/// How articulations are ordered before trigger numbers are handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Listed names first, in list order; everything else alphabetically.
    Curated(Vec<String>),
    /// Case-insensitive alphabetical order only.
    Lexicographic,
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        OrderingPolicy::Curated(DEFAULT_PREFERRED_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

/// Total order key for an articulation.
///
/// Variant order is the tier: every `Curated` rank sorts before every
/// `Alphabetical` one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortRank {
    Curated(usize),
    Alphabetical { folded: String, name: String },
}

impl SortRank {
    pub fn tier(&self) -> u8 {
        match self {
            SortRank::Curated(_) => 0,
            SortRank::Alphabetical { .. } => 1,
        }
    }
}

/// A classified articulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticulationRecord {
    pub name: String,
    pub category: Category,
    pub sort_rank: SortRank,
}

/// Classifier over an explicit table and ordering policy.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: CategoryTable,
    ordering: OrderingPolicy,
    preferred_folded: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(CategoryTable::default(), OrderingPolicy::default())
    }
}

impl Classifier {
    pub fn new(table: CategoryTable, ordering: OrderingPolicy) -> Self {
        let preferred_folded = match &ordering {
            OrderingPolicy::Curated(list) => list.iter().map(|s| s.trim().to_lowercase()).collect(),
            OrderingPolicy::Lexicographic => Vec::new(),
        };
        Classifier {
            table,
            ordering,
            preferred_folded,
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn ordering(&self) -> &OrderingPolicy {
        &self.ordering
    }

    pub fn category(&self, text: &str) -> Category {
        self.table.lookup(text)
    }

    pub fn sort_rank(&self, name: &str) -> SortRank {
        let folded = name.trim().to_lowercase();
        match self.preferred_folded.iter().position(|p| *p == folded) {
            Some(idx) => SortRank::Curated(idx),
            None => SortRank::Alphabetical {
                folded,
                name: name.to_string(),
            },
        }
    }

    pub fn classify(&self, name: &str) -> ArticulationRecord {
        ArticulationRecord {
            name: name.to_string(),
            category: self.category(name),
            sort_rank: self.sort_rank(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        let table = CategoryTable::default();
        assert_eq!(table.lookup("Legato"), Category::Long);
        assert_eq!(table.lookup("Staccato"), Category::Short);
        assert_eq!(table.lookup("Trills Major 2nd"), Category::Ornament);
        assert_eq!(table.lookup("Marcato"), Category::Accent);
        assert_eq!(table.lookup("FX Cluster"), Category::Fx);
        assert_eq!(table.lookup("Something Else"), Category::Unknown);
    }

    #[test]
    fn test_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(table.lookup("PIZZICATO"), Category::Short);
        assert_eq!(table.lookup("sul tasto"), Category::Long);
    }

    #[test]
    fn test_word_aligned_plural() {
        let table = CategoryTable::default();
        assert_eq!(table.lookup("Runs Fast"), Category::Ornament);
        assert_eq!(table.lookup("Crunch"), Category::Unknown);
    }

    #[test]
    fn test_only_plural_suffixes_match() {
        let table = CategoryTable::default();
        assert_eq!(table.lookup("Trills"), Category::Ornament);
        assert_eq!(table.lookup("Glissandoes"), Category::Ornament);
        assert_eq!(table.lookup("Ripple"), Category::Unknown);
        assert_eq!(table.lookup("Hitch"), Category::Unknown);
        assert_eq!(table.lookup("Turnaround"), Category::Unknown);
    }

    #[test]
    fn test_longest_phrase_first() {
        let table = CategoryTable::default();
        assert_eq!(table.lookup("Col Legno Battuto"), Category::Fx);
        assert_eq!(table.lookup("Col Legno Tratto"), Category::Short);
        assert_eq!(table.lookup("Legato Staccato"), Category::Short);
    }

    #[test]
    fn test_equal_length_keeps_table_order() {
        let table = CategoryTable::new([("Alpha", Category::Short), ("Bravo", Category::Long)]);
        assert_eq!(table.lookup("Bravo Alpha"), Category::Short);
        let order: Vec<_> = table.scan_order().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["Alpha", "Bravo"]);
    }

    #[test]
    fn test_extras_extend_table() {
        let table = CategoryTable::with_extras([("Chop", Category::Short)]);
        assert_eq!(table.lookup("Chops"), Category::Short);
        assert_eq!(table.lookup("Legato"), Category::Long);
    }

    #[test]
    fn test_extras_override_defaults() {
        let table =
            CategoryTable::with_extras([("Col Legno", Category::Fx), ("legato", Category::Short)]);
        assert_eq!(table.lookup("Col Legno"), Category::Fx);
        assert_eq!(table.lookup("Legato Slow"), Category::Short);
        assert_eq!(table.lookup("Col Legno Battuto"), Category::Fx);

        let legatos = table
            .scan_order()
            .filter(|(p, _)| p.eq_ignore_ascii_case("legato"))
            .count();
        assert_eq!(legatos, 1);
    }

    #[test]
    fn test_extras_win_equal_length_ties() {
        let table = CategoryTable::with_extras([("Swoop", Category::Fx)]);
        // "Swoop" and "Swell" are both five characters long
        assert_eq!(table.lookup("Swell Swoop"), Category::Fx);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Short".parse::<Category>().unwrap(), Category::Short);
        assert_eq!("effects".parse::<Category>().unwrap(), Category::Fx);
        assert!(matches!(
            "wobbly".parse::<Category>(),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_colors_distinct() {
        let mut colors: Vec<u8> = Category::ALL.iter().map(|c| c.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Category::ALL.len());
    }

    #[test]
    fn test_curated_before_alphabetical() {
        let classifier = Classifier::default();
        let mut ranks = vec![
            classifier.sort_rank("Accent"),
            classifier.sort_rank("Long"),
            classifier.sort_rank("legato"),
            classifier.sort_rank("Staccato"),
        ];
        ranks.sort();
        assert_eq!(ranks[0], SortRank::Curated(0));
        assert_eq!(ranks[1], SortRank::Curated(2));
        assert_eq!(ranks[2].tier(), 1);
        assert!(matches!(&ranks[2], SortRank::Alphabetical { name, .. } if name == "Accent"));
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let classifier = Classifier::new(CategoryTable::default(), OrderingPolicy::Lexicographic);
        assert!(classifier.sort_rank("alpha") < classifier.sort_rank("Beta"));
        assert!(classifier.sort_rank("Legato") > classifier.sort_rank("Accent"));
        assert_eq!(classifier.sort_rank("Legato").tier(), 1);
    }

    #[test]
    fn test_classify_is_pure() {
        let classifier = Classifier::default();
        let a = classifier.classify("Legato Slow");
        let b = classifier.classify("Legato Slow");
        assert_eq!(a, b);
        assert_eq!(a.category, Category::Long);
        assert_eq!(a.sort_rank.tier(), 1);
    }
}
