//! Aggregation over flattened pages.
//!
//! [`PageSummary`] condenses one page's descriptors; [`Inventory`] tallies
//! section kinds across many pages.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::descriptor::BlockDescriptor;

/// Number of example occurrences kept per inventory entry.
pub const INVENTORY_EXAMPLE_LIMIT: usize = 3;

/// Statistics for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Number of blocks.
    pub total_sections: usize,
    /// Number of distinct kinds.
    pub unique_types: usize,
    /// Occurrences per kind.
    pub type_counts: BTreeMap<String, usize>,
    /// Deepest nesting level; 0 for an empty page.
    pub max_depth: usize,
    /// Mean child count per block; 0.0 for an empty page.
    pub average_children: f64,
}

impl PageSummary {
    /// Summarize a page's descriptors.
    pub fn from_descriptors(descriptors: &[BlockDescriptor]) -> Self {
        let mut type_counts = BTreeMap::new();
        for d in descriptors {
            *type_counts.entry(d.kind.clone()).or_insert(0) += 1;
        }

        let max_depth = descriptors.iter().map(|d| d.depth).max().unwrap_or(0);
        let total_children: usize = descriptors.iter().map(|d| d.child_count).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_children = if descriptors.is_empty() {
            0.0
        } else {
            total_children as f64 / descriptors.len() as f64
        };

        Self {
            total_sections: descriptors.len(),
            unique_types: type_counts.len(),
            type_counts,
            max_depth,
            average_children,
        }
    }
}

/// One occurrence of a kind, kept for manual inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryExample {
    /// Page display name.
    pub page_name: String,
    /// Page URL, when known.
    pub page_url: Option<String>,
    /// Block id, when present.
    pub section_id: Option<String>,
}

/// Usage of one section kind across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    /// The section kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Total occurrences across all pages.
    pub count: usize,
    /// Distinct page names containing the kind, in encounter order.
    pub pages: Vec<String>,
    /// Up to [`INVENTORY_EXAMPLE_LIMIT`] occurrences.
    pub examples: Vec<InventoryExample>,
}

/// Cross-page section inventory, most used kinds first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Number of pages that were added.
    pub pages_analyzed: usize,
    /// Entries sorted by descending count; ties keep encounter order.
    pub entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Start an inventory.
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::default()
    }

    /// Look up the entry for a kind.
    pub fn get(&self, kind: &str) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }
}

/// Accumulates pages into an [`Inventory`].
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    tallies: Vec<Tally>,
    positions: HashMap<String, usize>,
    pages_analyzed: usize,
}

#[derive(Debug)]
struct Tally {
    entry: InventoryEntry,
    seen_pages: HashSet<String>,
}

impl Tally {
    fn new(kind: &str) -> Self {
        Self {
            entry: InventoryEntry {
                kind: kind.to_string(),
                count: 0,
                pages: Vec::new(),
                examples: Vec::new(),
            },
            seen_pages: HashSet::new(),
        }
    }

    fn record(&mut self, page_name: &str, page_url: Option<&str>, section_id: Option<&str>) {
        self.entry.count += 1;
        if self.seen_pages.insert(page_name.to_string()) {
            self.entry.pages.push(page_name.to_string());
        }
        if self.entry.examples.len() < INVENTORY_EXAMPLE_LIMIT {
            self.entry.examples.push(InventoryExample {
                page_name: page_name.to_string(),
                page_url: page_url.map(str::to_string),
                section_id: section_id.map(str::to_string),
            });
        }
    }
}

impl InventoryBuilder {
    /// Add one page's descriptors.
    pub fn add_page(
        &mut self,
        page_name: &str,
        page_url: Option<&str>,
        descriptors: &[BlockDescriptor],
    ) -> &mut Self {
        self.pages_analyzed += 1;

        for d in descriptors {
            let tally = match self.positions.get(&d.kind).copied() {
                Some(position) => self.tallies.get_mut(position),
                None => {
                    self.positions.insert(d.kind.clone(), self.tallies.len());
                    self.tallies.push(Tally::new(&d.kind));
                    self.tallies.last_mut()
                },
            };
            if let Some(tally) = tally {
                tally.record(page_name, page_url, d.id.as_deref());
            }
        }

        self
    }

    /// Finish, sorting by descending count.
    pub fn build(self) -> Inventory {
        let mut entries: Vec<InventoryEntry> =
            self.tallies.into_iter().map(|tally| tally.entry).collect();
        // `sort_by` is stable, so equal counts keep encounter order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Inventory {
            pages_analyzed: self.pages_analyzed,
            entries,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::block::blocks_from_value;
    use crate::flatten::{flatten, flatten_value};
    use serde_json::json;

    fn example() -> Vec<BlockDescriptor> {
        flatten(&blocks_from_value(&json!([
            { "@type": "Text", "id": "a" },
            { "@type": "Hero", "id": "b", "children": [{ "@type": "Text", "id": "c" }] }
        ])))
    }

    #[test]
    fn test_page_summary_example() {
        let summary = PageSummary::from_descriptors(&example());
        assert_eq!(summary.total_sections, 3);
        assert_eq!(summary.unique_types, 2);
        assert_eq!(summary.type_counts["Text"], 2);
        assert_eq!(summary.type_counts["Hero"], 1);
        assert_eq!(summary.max_depth, 1);
        assert!((summary.average_children - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_page_summary() {
        let summary = PageSummary::from_descriptors(&[]);
        assert_eq!(summary.total_sections, 0);
        assert_eq!(summary.unique_types, 0);
        assert!(summary.type_counts.is_empty());
        assert_eq!(summary.max_depth, 0);
        assert_eq!(summary.average_children, 0.0);
        assert!(!summary.average_children.is_nan());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(PageSummary::from_descriptors(&example())).unwrap();
        assert_eq!(value["totalSections"], 3);
        assert_eq!(value["typeCounts"]["Text"], 2);
        assert_eq!(value["maxDepth"], 1);
    }

    #[test]
    fn test_inventory_counts_pages_once() {
        let p1 = flatten_value(&json!([{ "@type": "Hero", "id": "h1" }]));
        let p2 = flatten_value(&json!([
            { "@type": "Hero", "id": "h2" },
            { "@type": "Hero", "id": "h3" }
        ]));

        let mut builder = Inventory::builder();
        builder.add_page("P1", Some("/p1"), &p1).add_page("P2", None, &p2);
        let inventory = builder.build();

        let hero = inventory.get("Hero").unwrap();
        assert_eq!(hero.count, 3);
        assert_eq!(hero.pages, ["P1", "P2"]);
        assert_eq!(hero.examples.len(), 3);
        assert_eq!(hero.examples[0].page_url.as_deref(), Some("/p1"));
        assert_eq!(hero.examples[2].section_id.as_deref(), Some("h3"));
        assert_eq!(inventory.pages_analyzed, 2);
    }

    #[test]
    fn test_inventory_interleaved_kinds_across_pages() {
        let p1 = flatten_value(&json!([{ "@type": "Hero" }, { "@type": "Text" }]));
        let p2 = flatten_value(&json!([{ "@type": "Text", "id": "t2" }, { "@type": "Hero" }]));

        let mut builder = Inventory::builder();
        builder.add_page("P1", None, &p1).add_page("P2", None, &p2);
        let inventory = builder.build();

        let text = inventory.get("Text").unwrap();
        assert_eq!(text.count, 2);
        assert_eq!(text.pages, ["P1", "P2"]);
        assert_eq!(text.examples[1].section_id.as_deref(), Some("t2"));
        assert_eq!(inventory.get("Hero").unwrap().pages, ["P1", "P2"]);
        assert_eq!(inventory.entries.len(), 2);
    }

    #[test]
    fn test_inventory_caps_examples() {
        let page = flatten_value(&json!([
            { "@type": "Text" }, { "@type": "Text" }, { "@type": "Text" },
            { "@type": "Text" }, { "@type": "Text" }
        ]));
        let mut builder = Inventory::builder();
        builder.add_page("Home", None, &page);
        let inventory = builder.build();

        let text = inventory.get("Text").unwrap();
        assert_eq!(text.count, 5);
        assert_eq!(text.examples.len(), INVENTORY_EXAMPLE_LIMIT);
    }

    #[test]
    fn test_inventory_sort_is_stable() {
        let page = flatten_value(&json!([
            { "@type": "Columns" },
            { "@type": "Image" },
            { "@type": "Text" },
            { "@type": "Text" },
            { "@type": "Button" }
        ]));
        let mut builder = Inventory::builder();
        builder.add_page("Home", None, &page);
        let kinds: Vec<String> = builder.build().entries.into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, ["Text", "Columns", "Image", "Button"]);
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = Inventory::builder().build();
        assert!(inventory.entries.is_empty());
        assert_eq!(inventory.pages_analyzed, 0);
    }
}
