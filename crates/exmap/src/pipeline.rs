//! The whole filename-to-document pipeline behind one value.

use serde::{Deserialize, Serialize};

use crate::builder;
use crate::classify::{Category, CategoryTable, Classifier, OrderingPolicy};
use crate::document::{ExpressionMapDocument, Variant};
use crate::feedback::ScanResult;
use crate::group::InstrumentGroups;
use crate::lexicon::Lexicon;
use crate::matcher::{FilenameMatcher, MatcherConfig};
use crate::Result;

/// Everything that varies between sample libraries and ordering tastes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub matcher: MatcherConfig,
    /// Appended to the built-in catalogue.
    pub extra_instruments: Vec<String>,
    /// Appended to the built-in phrase table.
    pub extra_phrases: Vec<(String, Category)>,
    pub ordering: OrderingPolicy,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    lexicon: Lexicon,
    matcher: FilenameMatcher,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let lexicon = Lexicon::with_extras(&config.extra_instruments)?;
        let matcher = FilenameMatcher::new(&lexicon, &config.matcher)?;
        let table = CategoryTable::with_extras(config.extra_phrases.iter().cloned());
        let classifier = Classifier::new(table, config.ordering.clone());

        Ok(Pipeline {
            lexicon,
            matcher,
            classifier,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Match, group, sort and number a directory listing.
    ///
    /// Skipped filenames never interrupt the scan; they come back in
    /// [`ScanResult::skipped`].
    pub fn scan<I, S>(&self, filenames: I) -> Result<ScanResult<InstrumentGroups>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matched = self.matcher.scan(filenames);
        let groups =
            InstrumentGroups::from_samples(matched.value, &self.classifier, &self.lexicon)?;
        Ok(ScanResult {
            value: groups,
            skipped: matched.skipped,
            ignored: matched.ignored,
        })
    }

    pub fn build(
        &self,
        groups: &InstrumentGroups,
        instrument: &str,
        variant: Variant,
    ) -> Result<ExpressionMapDocument> {
        builder::build_for(groups, instrument, variant)
    }
}
