//! # Bin Statistics
//!
//! Per-bin occupancy plus item counts by size and by type.
//!
//! Size counts are zero-padded (all three classes always present). Type
//! counts only list types actually observed in the bin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::capacity::Occupancy;
use crate::types::{Bin, ItemDetail, Size};

// =============================================================================
// Size Counts
// =============================================================================

/// Item counts for each size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeCounts {
    pub small: i64,
    pub medium: i64,
    pub large: i64,
}

impl SizeCounts {
    /// Tallies an iterator of sizes.
    pub fn tally(sizes: impl IntoIterator<Item = Size>) -> Self {
        let mut counts = SizeCounts::default();
        for size in sizes {
            *counts.slot_mut(size) += 1;
        }
        counts
    }

    /// Count for one size class.
    pub fn get(&self, size: Size) -> i64 {
        match size {
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
        }
    }

    fn slot_mut(&mut self, size: Size) -> &mut i64 {
        match size {
            Size::Small => &mut self.small,
            Size::Medium => &mut self.medium,
            Size::Large => &mut self.large,
        }
    }

    /// `(size, count)` pairs in domain order, zeros included.
    pub fn entries(&self) -> [(Size, i64); 3] {
        Size::ALL.map(|size| (size, self.get(size)))
    }

    pub fn total(&self) -> i64 {
        self.small + self.medium + self.large
    }
}

// =============================================================================
// Bin Statistics
// =============================================================================

/// Detailed statistics for one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinStatistics {
    pub bin: Bin,
    pub occupancy: Occupancy,
    pub by_size: SizeCounts,
    /// Keyed by type name; only observed types.
    pub by_type: BTreeMap<String, i64>,
}

impl BinStatistics {
    /// Builds statistics from the bin and the items it currently holds.
    ///
    /// Items belonging to other bins are ignored.
    pub fn compute(bin: &Bin, items: &[ItemDetail]) -> Self {
        let held: Vec<&ItemDetail> = items.iter().filter(|i| i.bin_id == bin.id).collect();

        let mut by_type = BTreeMap::new();
        for item in &held {
            *by_type.entry(item.type_name.clone()).or_insert(0) += 1;
        }

        BinStatistics {
            bin: bin.clone(),
            occupancy: Occupancy::of(bin, held.len() as i64),
            by_size: SizeCounts::tally(held.iter().map(|i| i.size)),
            by_type,
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

    fn item(name: &str, type_name: &str, size: Size, bin_id: &str) -> ItemDetail {
        ItemDetail {
            id: format!("id-{name}"),
            name: name.to_string(),
            type_id: format!("type-{type_name}"),
            type_name: type_name.to_string(),
            size,
            bin_id: bin_id.to_string(),
            bin_name: bin_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_size_counts_are_zero_padded() {
        let counts = SizeCounts::tally([Size::Small, Size::Small, Size::Medium]);
        assert_eq!(
            counts.entries(),
            [(Size::Small, 2), (Size::Medium, 1), (Size::Large, 0)]
        );
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_statistics_only_list_observed_types() {
        let bin = Bin {
            id: "b1".to_string(),
            name: "Garage".to_string(),
            max_capacity: 4,
            created_at: Utc::now(),
        };
        let items = vec![
            item("Dune", "Book", Size::Small, "b1"),
            item("Emma", "Book", Size::Small, "b1"),
            item("Drill", "Tool", Size::Medium, "b1"),
            item("Lamp", "Light", Size::Large, "other"),
        ];

        let stats = BinStatistics::compute(&bin, &items);

        assert_eq!(stats.occupancy.occupied, 3);
        assert_eq!(stats.occupancy.remaining, 1);
        assert!((stats.occupancy.percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.by_size.get(Size::Large), 0);
        assert_eq!(stats.by_type.len(), 2);
        assert_eq!(stats.by_type["Book"], 2);
        assert_eq!(stats.by_type["Tool"], 1);
        assert!(!stats.by_type.contains_key("Light"));
    }
}
