//! Grouping matched samples per instrument and handing out trigger numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{ArticulationRecord, Classifier};
use crate::lexicon::Lexicon;
use crate::matcher::ParsedSample;
use crate::midi::ChannelPort;
use crate::{Error, Result};

/// An articulation with its position in the instrument's slot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredArticulation {
    #[serde(flatten)]
    pub record: ArticulationRecord,
    /// 0-based, contiguous within the instrument.
    pub trigger: u32,
    pub source_filename: String,
}

impl TriggeredArticulation {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn channel_port(&self) -> ChannelPort {
        ChannelPort::for_index(self.trigger)
    }
}

/// All articulations of one instrument, sorted, with triggers assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentGroup {
    /// Match token, also used for document and file names.
    pub instrument: String,
    /// Catalogue name, e.g. `Violins I` for `Violins1`.
    pub display_name: String,
    pub articulations: Vec<TriggeredArticulation>,
}

impl InstrumentGroup {
    /// Classify, sort and number a set of articulations.
    ///
    /// Fails with `EmptyArticulationSet` when there is nothing to number;
    /// groups only come into being on a match, so that means a bug upstream.
    pub fn build(
        instrument: impl Into<String>,
        display_name: impl Into<String>,
        samples: impl IntoIterator<Item = ParsedSample>,
        classifier: &Classifier,
    ) -> Result<Self> {
        let instrument = instrument.into();
        let mut classified: Vec<(ArticulationRecord, String)> = samples
            .into_iter()
            .map(|s| (classifier.classify(&s.articulation_raw), s.source_filename))
            .collect();

        if classified.is_empty() {
            return Err(Error::EmptyArticulationSet(instrument));
        }

        classified.sort_by(|a, b| a.0.sort_rank.cmp(&b.0.sort_rank));

        let articulations = classified
            .into_iter()
            .enumerate()
            .map(|(idx, (record, source_filename))| TriggeredArticulation {
                record,
                trigger: idx as u32,
                source_filename,
            })
            .collect();

        Ok(InstrumentGroup {
            instrument,
            display_name: display_name.into(),
            articulations,
        })
    }

    pub fn len(&self) -> usize {
        self.articulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articulations.is_empty()
    }

    pub fn articulation(&self, name: &str) -> Option<&TriggeredArticulation> {
        self.articulations.iter().find(|a| a.name() == name)
    }
}

/// Accumulates samples until the whole listing has been seen.
///
/// Sorting needs the complete set for an instrument, so nothing is
/// ordered until [`InstrumentGrouper::finish`].
#[derive(Debug)]
pub struct InstrumentGrouper<'a> {
    classifier: &'a Classifier,
    buckets: BTreeMap<String, BTreeMap<String, ParsedSample>>,
}

impl<'a> InstrumentGrouper<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        InstrumentGrouper {
            classifier,
            buckets: BTreeMap::new(),
        }
    }

    /// Add a sample. A repeated articulation name for the same instrument
    /// replaces the earlier sample: one name, one trigger slot.
    pub fn add(&mut self, sample: ParsedSample) {
        let bucket = self.buckets.entry(sample.instrument.clone()).or_default();
        if let Some(previous) = bucket.insert(sample.articulation_raw.clone(), sample) {
            tracing::debug!(
                filename = %previous.source_filename,
                articulation = %previous.articulation_raw,
                "articulation superseded by a later file"
            );
        }
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = ParsedSample>) {
        for sample in samples {
            self.add(sample);
        }
    }

    pub fn finish(self, lexicon: &Lexicon) -> Result<InstrumentGroups> {
        let mut groups = BTreeMap::new();
        for (instrument, bucket) in self.buckets {
            let display_name = lexicon
                .by_token(&instrument)
                .map(|e| e.canonical_name.clone())
                .unwrap_or_else(|| instrument.clone());
            let group = InstrumentGroup::build(
                instrument.clone(),
                display_name,
                bucket.into_values(),
                self.classifier,
            )?;
            groups.insert(instrument, group);
        }
        Ok(InstrumentGroups { groups })
    }
}

/// Every instrument observed in one run, keyed by match token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentGroups {
    groups: BTreeMap<String, InstrumentGroup>,
}

impl InstrumentGroups {
    pub fn from_samples(
        samples: impl IntoIterator<Item = ParsedSample>,
        classifier: &Classifier,
        lexicon: &Lexicon,
    ) -> Result<Self> {
        let mut grouper = InstrumentGrouper::new(classifier);
        grouper.extend(samples);
        grouper.finish(lexicon)
    }

    pub fn get(&self, instrument: &str) -> Result<&InstrumentGroup> {
        self.groups
            .get(instrument)
            .ok_or_else(|| Error::InstrumentNotFound(instrument.to_string()))
    }

    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstrumentGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total articulations across every instrument.
    pub fn articulation_count(&self) -> usize {
        self.groups.values().map(InstrumentGroup::len).sum()
    }
}
