use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BpmRange, Result};

/// Label of the synthetic tag that matches every beat.
pub const DEFAULT_ALL_TAG: &str = "ALL";

/// Top-level configuration structure for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub all_tag_label: String,
    /// Domain of the BPM slider shown by the UI.
    pub bpm_bounds: BpmRange,
    pub default_bpm_range: BpmRange,
    /// Number of tag tabs (sentinel included) the UI renders.
    pub tab_limit: usize,
    pub currency: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            all_tag_label: DEFAULT_ALL_TAG.to_string(),
            bpm_bounds: BpmRange::new(60, 200),
            default_bpm_range: BpmRange::new(60, 180),
            tab_limit: 5,
            currency: "EUR".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
