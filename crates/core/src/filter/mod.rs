use serde::{Deserialize, Serialize};

use crate::BeatRecord;

/// Inclusive tempo interval. A range with `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmRange {
    pub min: u16,
    pub max: u16,
}

impl BpmRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, bpm: u16) -> bool {
        self.min <= bpm && bpm <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Tag selection: either the sentinel that matches everything or one tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Maps a UI label to a filter, treating `all_label` as the sentinel.
    pub fn from_label(label: &str, all_label: &str) -> Self {
        if label == all_label {
            Self::All
        } else {
            Self::Tag(label.to_string())
        }
    }

    pub fn matches(&self, record: &BeatRecord) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => record.tags.iter().any(|t| t == tag),
        }
    }
}

/// Current combination of search text, tag and tempo range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub tag: TagFilter,
    pub bpm: BpmRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            tag: TagFilter::All,
            bpm: BpmRange::new(60, 180),
        }
    }
}

impl FilterCriteria {
    /// Tests a single record against all three predicates.
    pub fn matches(&self, record: &BeatRecord) -> bool {
        let needle = normalise_query(&self.query);
        matches_text(record, &needle) && self.tag.matches(record) && self.bpm.contains(record.bpm)
    }
}

/// Stable filter over `catalog`: keeps catalog order and never re-sorts.
pub fn filter<'a>(catalog: &'a [BeatRecord], criteria: &FilterCriteria) -> Vec<&'a BeatRecord> {
    let needle = normalise_query(&criteria.query);
    catalog
        .iter()
        .filter(|record| {
            matches_text(record, &needle)
                && criteria.tag.matches(record)
                && criteria.bpm.contains(record.bpm)
        })
        .collect()
}

fn normalise_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// `needle` must already be trimmed and lowercased.
fn matches_text(record: &BeatRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    searchable_text(record).contains(needle)
}

fn searchable_text(record: &BeatRecord) -> String {
    let fields = [record.title.as_str(), record.producer.as_str()];
    fields
        .into_iter()
        .chain(record.tags.iter().map(String::as_str))
        .chain(record.mood.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
