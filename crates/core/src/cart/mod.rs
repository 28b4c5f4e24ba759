use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{BeatRecord, CatalogStore};

/// Quantity-aggregated cart keyed by beat id, in first-add order.
///
/// Ids are never checked against the catalog here. Resolution happens when
/// the cart is priced, so a stale id costs nothing instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    entries: IndexMap<String, u32>,
}

/// A cart entry resolved against the catalog, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub beat: &'a BeatRecord,
    pub quantity: u32,
    pub line_total: f64,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the quantity for `beat_id`, creating the entry at 1.
    pub fn add(&mut self, beat_id: &str) {
        let quantity = self.entries.entry(beat_id.to_string()).or_insert(0);
        *quantity = quantity.saturating_add(1);
        tracing::trace!(beat_id, quantity = *quantity, "cart add");
    }

    /// Drops the whole entry, whatever its quantity. Absent ids are ignored.
    pub fn remove(&mut self, beat_id: &str) {
        if self.entries.shift_remove(beat_id).is_some() {
            tracing::trace!(beat_id, "cart remove");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn quantity_of(&self, beat_id: &str) -> u32 {
        self.entries.get(beat_id).copied().unwrap_or(0)
    }

    /// Structural count: orphaned ids are included.
    pub fn total_item_count(&self) -> u32 {
        self.entries.values().sum()
    }

    /// Sum of `price * quantity` over entries that resolve in `catalog`.
    pub fn total_price(&self, catalog: &CatalogStore) -> f64 {
        self.entries
            .iter()
            .map(|(id, &quantity)| match catalog.get(id) {
                Some(beat) => beat.price * f64::from(quantity),
                None => {
                    tracing::debug!(beat_id = %id, "cart entry not in catalog, priced at zero");
                    0.0
                }
            })
            .sum()
    }

    /// Resolved entries for rendering. Orphaned ids are skipped.
    pub fn lines<'a>(&self, catalog: &'a CatalogStore) -> Vec<CartLine<'a>> {
        self.entries
            .iter()
            .filter_map(|(id, &quantity)| {
                catalog.get(id).map(|beat| CartLine {
                    beat,
                    quantity,
                    line_total: beat.price * f64::from(quantity),
                })
            })
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(id, &quantity)| (id.as_str(), quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct ids in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
