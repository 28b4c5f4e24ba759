use crate::{
    filter, BeatRecord, BpmRange, CartLedger, CartLine, CatalogStore, FilterCriteria,
    PlaybackController, PlaybackState, PlaybackTransition, StoreConfig, TagFilter, TagIndex,
};

/// Cart figures the UI shows in its badge and checkout sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    pub item_count: u32,
    pub total: f64,
}

/// One browsing session: the catalog plus the state the UI drives.
///
/// Every mutation returns the derived view that changed so the caller can
/// re-render straight away.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StoreConfig,
    catalog: CatalogStore,
    tags: TagIndex,
    criteria: FilterCriteria,
    cart: CartLedger,
    playback: PlaybackController,
}

impl Storefront {
    pub fn new(catalog: CatalogStore, config: StoreConfig) -> Self {
        let tags = TagIndex::build(catalog.records(), &config.all_tag_label);
        let criteria = FilterCriteria {
            bpm: config.default_bpm_range,
            ..FilterCriteria::default()
        };
        Self {
            config,
            catalog,
            tags,
            criteria,
            cart: CartLedger::new(),
            playback: PlaybackController::new(),
        }
    }

    pub fn set_query_text(&mut self, text: &str) -> Vec<&BeatRecord> {
        tracing::debug!(query = text, "query changed");
        self.criteria.query = text.to_string();
        self.visible()
    }

    /// Selects a tag by label; the configured sentinel label clears the tag filter.
    pub fn set_active_tag(&mut self, label: &str) -> Vec<&BeatRecord> {
        tracing::debug!(tag = label, "tag changed");
        self.criteria.tag = TagFilter::from_label(label, &self.config.all_tag_label);
        self.visible()
    }

    /// Ranges are taken as given; an inverted range simply shows nothing.
    pub fn set_bpm_range(&mut self, min: u16, max: u16) -> Vec<&BeatRecord> {
        tracing::debug!(min, max, "bpm range changed");
        self.criteria.bpm = BpmRange::new(min, max);
        self.visible()
    }

    pub fn add_to_cart(&mut self, beat_id: &str) -> CartSummary {
        self.cart.add(beat_id);
        tracing::debug!(beat_id, "added to cart");
        self.cart_summary()
    }

    pub fn remove_from_cart(&mut self, beat_id: &str) -> CartSummary {
        self.cart.remove(beat_id);
        tracing::debug!(beat_id, "removed from cart");
        self.cart_summary()
    }

    pub fn clear_cart(&mut self) -> CartSummary {
        self.cart.clear();
        self.cart_summary()
    }

    pub fn toggle_playback(&mut self, beat_id: &str) -> PlaybackTransition {
        self.playback.toggle(beat_id)
    }

    pub fn visible(&self) -> Vec<&BeatRecord> {
        filter(self.catalog.records(), &self.criteria)
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.cart.total_item_count(),
            total: self.cart.total_price(&self.catalog),
        }
    }

    pub fn cart_lines(&self) -> Vec<CartLine<'_>> {
        self.cart.lines(&self.catalog)
    }

    pub fn playback(&self) -> &PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self, beat_id: &str) -> bool {
        self.playback.is_playing(beat_id)
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Labels rendered as tabs, capped by the configured limit.
    pub fn tag_tabs(&self) -> &[String] {
        self.tags.tabs(self.config.tab_limit)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(records: Vec<&BeatRecord>) -> Vec<String> {
        records.into_iter().map(|record| record.id.clone()).collect()
    }

    fn demo() -> Storefront {
        Storefront::new(CatalogStore::demo(), StoreConfig::default())
    }

    #[test]
    fn starts_with_default_range_and_all_tag() {
        let store = demo();

        assert_eq!(store.criteria().tag, TagFilter::All);
        assert_eq!(store.criteria().bpm, BpmRange::new(60, 180));
        assert_eq!(ids(store.visible()), ["b1", "b2", "b3", "b4"]);
        assert_eq!(store.tag_tabs(), ["ALL", "Drill", "808", "Punchy", "Groovy"]);
    }

    #[test]
    fn ui_events_recompute_visible_list() {
        let mut store = demo();

        assert_eq!(ids(store.set_query_text("lofi")), ["b3"]);
        assert_eq!(ids(store.set_query_text("")), ["b1", "b2", "b3", "b4"]);
        assert_eq!(ids(store.set_active_tag("Groovy")), ["b2"]);
        assert!(store.set_bpm_range(60, 100).is_empty());
        assert_eq!(ids(store.set_active_tag("ALL")), ["b1", "b3"]);
        assert!(store.set_bpm_range(120, 90).is_empty());
    }

    #[test]
    fn custom_sentinel_label_clears_tag() {
        let config = StoreConfig {
            all_tag_label: "Tous".to_string(),
            ..StoreConfig::default()
        };
        let mut store = Storefront::new(CatalogStore::demo(), config);

        assert_eq!(store.tags().all_label(), "Tous");
        assert_eq!(ids(store.set_active_tag("Jazz")), ["b3"]);
        assert_eq!(store.set_active_tag("Tous").len(), 4);
    }

    #[test]
    fn cart_events_return_summary() {
        let mut store = demo();

        store.add_to_cart("b1");
        store.add_to_cart("b1");
        let summary = store.add_to_cart("b2");
        assert_eq!(summary, CartSummary { item_count: 3, total: 97.0 });

        let summary = store.add_to_cart("ghost");
        assert_eq!(summary, CartSummary { item_count: 4, total: 97.0 });
        assert_eq!(store.cart_lines().len(), 2);

        let summary = store.remove_from_cart("b1");
        assert_eq!(summary, CartSummary { item_count: 2, total: 39.0 });

        let summary = store.clear_cart();
        assert_eq!(summary, CartSummary { item_count: 0, total: 0.0 });
    }

    #[test]
    fn playback_events_supersede() {
        let mut store = demo();

        store.toggle_playback("b1");
        assert_eq!(store.playback(), &PlaybackState::Playing("b1".into()));

        store.toggle_playback("b2");
        assert_eq!(store.playback(), &PlaybackState::Playing("b2".into()));
        assert!(!store.is_playing("b1"));

        store.toggle_playback("b2");
        assert_eq!(store.playback(), &PlaybackState::Idle);
    }

    #[test]
    fn cart_and_playback_survive_filtering() {
        let mut store = demo();
        store.add_to_cart("b4");
        store.toggle_playback("b4");

        assert!(store.set_query_text("cloud").iter().all(|b| b.id != "b4"));
        assert_eq!(store.cart().quantity_of("b4"), 1);
        assert!(store.is_playing("b4"));
    }
}
