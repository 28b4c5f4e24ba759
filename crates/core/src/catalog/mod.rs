use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{BeatStoreError, Result};

/// Accepted tempo domain for catalog records.
pub const BPM_LIMITS: (u16, u16) = (1, 999);
const MAX_RATING: f32 = 5.0;

/// A purchasable beat. Records are immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatRecord {
    pub id: String,
    pub title: String,
    pub producer: String,
    pub bpm: u16,
    pub key: String,
    #[serde(default)]
    pub mood: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub rating: f32,
    #[serde(alias = "preview")]
    pub preview_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl BeatRecord {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(BeatStoreError::invalid(&self.id, "id must not be empty"));
        }
        if !(BPM_LIMITS.0..=BPM_LIMITS.1).contains(&self.bpm) {
            return Err(BeatStoreError::invalid(
                &self.id,
                format!(
                    "bpm {} outside {}..={}",
                    self.bpm, BPM_LIMITS.0, BPM_LIMITS.1
                ),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(BeatStoreError::invalid(
                &self.id,
                format!("price {} must be a non-negative amount", self.price),
            ));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(BeatStoreError::invalid(
                &self.id,
                format!("rating {} outside 0..=5", self.rating),
            ));
        }
        Ok(())
    }
}

/// Read-only collection of beats for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<BeatRecord>,
}

impl CatalogStore {
    /// Validates every record and the uniqueness of ids.
    pub fn new(records: Vec<BeatRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(BeatStoreError::DuplicateId(record.id.clone()));
            }
        }
        tracing::debug!(beats = records.len(), "catalog loaded");
        Ok(Self { records })
    }

    /// Parses a JSON array of beat records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<BeatRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Built-in catalog used until a real supplier is wired in.
    pub fn demo() -> Self {
        let records = vec![
            demo_beat(
                "b1",
                "Midnight Drive",
                92,
                "Am",
                &["Dark", "Trap"],
                &["Drill", "808", "Punchy"],
                29.0,
                4.8,
                "midnight-drive",
                "1511671782779-c97d3d27a1d4",
            ),
            demo_beat(
                "b2",
                "Sunset Bounce",
                140,
                "Gm",
                &["Bounce", "West Coast"],
                &["Groovy", "G-Funk", "Talkbox"],
                39.0,
                4.6,
                "sunset-bounce",
                "1550409175-6d2b2a6c83f7",
            ),
            demo_beat(
                "b3",
                "Cloud City",
                76,
                "Cm",
                &["Lofi", "Chill"],
                &["Lofi", "Jazz", "Mellow"],
                24.0,
                4.4,
                "cloud-city",
                "1546443046-ed1ce6ffd1dc",
            ),
            demo_beat(
                "b4",
                "Arena",
                160,
                "Em",
                &["Drill", "Epic"],
                &["Orchestre", "Hard", "Sub"],
                49.0,
                4.9,
                "arena",
                "1506157786151-b8491531f063",
            ),
        ];
        Self { records }
    }

    pub fn records(&self) -> &[BeatRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&BeatRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest and highest tempo present in the catalog.
    pub fn bpm_domain(&self) -> Option<(u16, u16)> {
        let min = self.records.iter().map(|record| record.bpm).min()?;
        let max = self.records.iter().map(|record| record.bpm).max()?;
        Some((min, max))
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_beat(
    id: &str,
    title: &str,
    bpm: u16,
    key: &str,
    mood: &[&str],
    tags: &[&str],
    price: f64,
    rating: f32,
    slug: &str,
    cover_photo: &str,
) -> BeatRecord {
    BeatRecord {
        id: id.to_string(),
        title: title.to_string(),
        producer: "Marion".to_string(),
        bpm,
        key: key.to_string(),
        mood: mood.iter().map(|m| m.to_string()).collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        price,
        rating,
        preview_uri: format!("/audio/{slug}.mp3"),
        cover: Some(format!(
            "https://images.unsplash.com/photo-{cover_photo}?q=80&w=1200&auto=format&fit=crop"
        )),
    }
}
