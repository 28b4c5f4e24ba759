use std::collections::HashSet;

use crate::BeatRecord;

/// Distinct filterable tags of a catalog, sentinel label first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIndex {
    labels: Vec<String>,
}

impl TagIndex {
    /// Collects tags in first-seen order. A tag spelled like the sentinel is
    /// folded into it.
    pub fn build(catalog: &[BeatRecord], all_label: &str) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(all_label);

        let mut labels = vec![all_label.to_string()];
        for tag in catalog.iter().flat_map(|record| record.tags.iter()) {
            if seen.insert(tag.as_str()) {
                labels.push(tag.clone());
            }
        }

        Self { labels }
    }

    /// All labels, sentinel included.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The sentinel label that matches every record.
    pub fn all_label(&self) -> &str {
        &self.labels[0]
    }

    /// The leading labels the UI renders as tabs.
    pub fn tabs(&self, limit: usize) -> &[String] {
        &self.labels[..limit.min(self.labels.len())]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: the sentinel is present even for an empty catalog.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::tests::beat;
    use crate::CatalogStore;

    #[test]
    fn sentinel_first_then_first_seen_order() {
        let catalog = vec![
            beat("a", 90, &["Drill", "808"], 1.0),
            beat("b", 100, &["Lofi", "Drill"], 1.0),
            beat("c", 110, &["808", "Jazz"], 1.0),
        ];

        let index = TagIndex::build(&catalog, "ALL");
        assert_eq!(index.labels(), ["ALL", "Drill", "808", "Lofi", "Jazz"]);
        assert_eq!(index.all_label(), "ALL");
    }

    #[test]
    fn sentinel_spelled_tag_is_merged() {
        let catalog = vec![beat("a", 90, &["ALL", "Trap"], 1.0)];

        let index = TagIndex::build(&catalog, "ALL");
        assert_eq!(index.labels(), ["ALL", "Trap"]);
    }

    #[test]
    fn empty_catalog_keeps_sentinel() {
        let index = TagIndex::build(&[], "Tous");
        assert_eq!(index.labels(), ["Tous"]);
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn tabs_are_capped() {
        let catalog = CatalogStore::demo();
        let index = TagIndex::build(catalog.records(), "ALL");

        assert_eq!(index.len(), 13);
        assert_eq!(index.tabs(5), ["ALL", "Drill", "808", "Punchy", "Groovy"]);
        assert_eq!(index.tabs(50).len(), 13);
        assert!(index.contains("Talkbox"));
        assert!(!index.contains("Trap"));
    }
}
