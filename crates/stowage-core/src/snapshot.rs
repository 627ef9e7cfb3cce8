//! # Snapshot Exporter
//!
//! Builds a structured, deterministic summary of the whole catalog. This is
//! the only thing handed to an external recommender; turning it into prose is
//! the recommender's business.
//!
//! ## Shape
//! ```text
//! CatalogSnapshot
//! ├── bins[]         (name asc, then id)
//! │   ├── occupancy  occupied / remaining / percentage
//! │   └── items[]    (catalog insertion order)
//! ├── item_types[]   (name asc, then id)
//! │   ├── item_count
//! │   └── examples   first SNAPSHOT_EXAMPLES_PER_TYPE item names
//! ├── size_totals    zero-padded counts across the catalog
//! └── totals         bins / items / item_types
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::capacity::Occupancy;
use crate::stats::SizeCounts;
use crate::types::{Bin, ItemDetail, ItemType, Size};
use crate::SNAPSHOT_EXAMPLES_PER_TYPE;

// =============================================================================
// Snapshot Types
// =============================================================================

/// An item as it appears inside a bin snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SnapshotItem {
    pub id: String,
    pub name: String,
    pub type_name: String,
    pub size: Size,
}

/// One bin with occupancy and contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinSnapshot {
    pub id: String,
    pub name: String,
    pub max_capacity: i64,
    pub occupancy: Occupancy,
    pub items: Vec<SnapshotItem>,
}

/// One item type with membership figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemTypeSnapshot {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub item_count: i64,
    pub examples: Vec<String>,
}

/// Catalog-wide counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogTotals {
    pub bins: i64,
    pub items: i64,
    pub item_types: i64,
}

/// Structured summary of the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSnapshot {
    pub bins: Vec<BinSnapshot>,
    pub item_types: Vec<ItemTypeSnapshot>,
    pub size_totals: SizeCounts,
    pub totals: CatalogTotals,
}

// =============================================================================
// Builder
// =============================================================================

impl CatalogSnapshot {
    /// Assembles a snapshot from full catalog listings.
    ///
    /// `items` should be in catalog insertion order; that order is kept inside
    /// each bin and decides which names become type examples.
    pub fn build(bins: &[Bin], item_types: &[ItemType], items: &[ItemDetail]) -> Self {
        let mut bins: Vec<&Bin> = bins.iter().collect();
        bins.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut item_types: Vec<&ItemType> = item_types.iter().collect();
        item_types.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let bin_snapshots = bins
            .into_iter()
            .map(|bin| {
                let contents: Vec<SnapshotItem> = items
                    .iter()
                    .filter(|item| item.bin_id == bin.id)
                    .map(|item| SnapshotItem {
                        id: item.id.clone(),
                        name: item.name.clone(),
                        type_name: item.type_name.clone(),
                        size: item.size,
                    })
                    .collect();

                BinSnapshot {
                    id: bin.id.clone(),
                    name: bin.name.clone(),
                    max_capacity: bin.max_capacity,
                    occupancy: Occupancy::of(bin, contents.len() as i64),
                    items: contents,
                }
            })
            .collect::<Vec<_>>();

        let type_snapshots = item_types
            .into_iter()
            .map(|item_type| {
                let members: Vec<&ItemDetail> = items
                    .iter()
                    .filter(|item| item.type_id == item_type.id)
                    .collect();

                ItemTypeSnapshot {
                    id: item_type.id.clone(),
                    name: item_type.name.clone(),
                    description: item_type.description.clone(),
                    item_count: members.len() as i64,
                    examples: members
                        .iter()
                        .take(SNAPSHOT_EXAMPLES_PER_TYPE)
                        .map(|item| item.name.clone())
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        let totals = CatalogTotals {
            bins: bin_snapshots.len() as i64,
            items: items.len() as i64,
            item_types: type_snapshots.len() as i64,
        };

        CatalogSnapshot {
            bins: bin_snapshots,
            item_types: type_snapshots,
            size_totals: SizeCounts::tally(items.iter().map(|item| item.size)),
            totals,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bin(id: &str, name: &str, max_capacity: i64) -> Bin {
        Bin {
            id: id.to_string(),
            name: name.to_string(),
            max_capacity,
            created_at: Utc::now(),
        }
    }

    fn item_type(id: &str, name: &str) -> ItemType {
        ItemType {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn item(name: &str, t: &ItemType, size: Size, b: &Bin) -> ItemDetail {
        ItemDetail {
            id: format!("id-{name}"),
            name: name.to_string(),
            type_id: t.id.clone(),
            type_name: t.name.clone(),
            size,
            bin_id: b.id.clone(),
            bin_name: b.name.clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_contents_and_ordering() {
        let office = bin("b2", "Office", 4);
        let garage = bin("b1", "Garage", 2);
        let empty = bin("b3", "Attic", 1);
        let book = item_type("t1", "Book");
        let tool = item_type("t2", "Tool");
        let unused = item_type("t3", "Art");

        let items = vec![
            item("Dune", &book, Size::Small, &office),
            item("Drill", &tool, Size::Medium, &garage),
            item("Emma", &book, Size::Small, &office),
            item("Saw", &tool, Size::Large, &garage),
            item("Atlas", &book, Size::Large, &office),
            item("Ulysses", &book, Size::Medium, &office),
        ];

        let snapshot = CatalogSnapshot::build(
            &[office.clone(), garage.clone(), empty.clone()],
            &[tool.clone(), book.clone(), unused.clone()],
            &items,
        );

        let bin_names: Vec<&str> = snapshot.bins.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(bin_names, vec!["Attic", "Garage", "Office"]);

        let attic = &snapshot.bins[0];
        assert!(attic.items.is_empty());
        assert_eq!(attic.occupancy.remaining, 1);

        let garage_snap = &snapshot.bins[1];
        assert_eq!(garage_snap.occupancy.occupied, 2);
        assert!((garage_snap.occupancy.percentage - 100.0).abs() < f64::EPSILON);

        let type_names: Vec<&str> = snapshot.item_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(type_names, vec!["Art", "Book", "Tool"]);
        assert_eq!(snapshot.item_types[0].item_count, 0);
        assert_eq!(snapshot.item_types[1].item_count, 4);
        assert_eq!(snapshot.item_types[1].examples, vec!["Dune", "Emma", "Atlas"]);

        assert_eq!(
            snapshot.size_totals,
            SizeCounts {
                small: 2,
                medium: 2,
                large: 2
            }
        );
        assert_eq!(
            snapshot.totals,
            CatalogTotals {
                bins: 3,
                items: 6,
                item_types: 3
            }
        );
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let garage = bin("b1", "Garage", 2);
        let book = item_type("t1", "Book");
        let items = vec![item("Dune", &book, Size::Small, &garage)];

        let a = CatalogSnapshot::build(&[garage.clone()], &[book.clone()], &items);
        let b = CatalogSnapshot::build(&[garage], &[book], &items);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
