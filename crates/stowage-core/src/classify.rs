//! # Classification Engine
//!
//! Groups items by type, by size, or by both, in a fixed deterministic order.
//!
//! ## Ordering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Criterion   Group key               Group order                       │
//! │  ─────────   ─────────────────────   ───────────────────────────────   │
//! │  type        type name               name ascending (lexicographic)    │
//! │  size        size class              Small → Medium → Large            │
//! │  mixed       "{type}_{SizeLabel}"    key ascending (lexicographic)     │
//! │                                                                         │
//! │  Empty groups are never emitted.                                       │
//! │  Items keep their input order inside each group.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inputs come from the catalog store in insertion order, so re-running a
//! grouping over the same catalog yields identical output.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{ItemDetail, Size};

// =============================================================================
// Criterion
// =============================================================================

/// The grouping key used to organize items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Group by item type name.
    #[default]
    Type,
    /// Group by size class.
    Size,
    /// Group by the (type, size) pair.
    Mixed,
}

impl Criterion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Criterion::Type => "type",
            Criterion::Size => "size",
            Criterion::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "type" => Ok(Criterion::Type),
            "size" => Ok(Criterion::Size),
            "mixed" => Ok(Criterion::Mixed),
            _ => Err(ValidationError::NotAllowed {
                field: "criterion".to_string(),
                allowed: vec!["type".into(), "size".into(), "mixed".into()],
            }),
        }
    }
}

// =============================================================================
// Group Records
// =============================================================================

/// Items sharing one type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TypeGroup {
    pub type_name: String,
    pub count: usize,
    pub items: Vec<ItemDetail>,
}

/// Items sharing one size class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeGroup {
    pub size: Size,
    pub count: usize,
    pub items: Vec<ItemDetail>,
}

/// Items sharing one (type, size) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TypeSizeGroup {
    pub type_name: String,
    pub size: Size,
    /// Composite display key, `"{type}_{SizeLabel}"`. Groups sort on it.
    pub key: String,
    pub count: usize,
    pub items: Vec<ItemDetail>,
}

/// Output of [`classify`], tagged with the criterion that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "criterion", content = "groups", rename_all = "snake_case")]
pub enum Classification {
    Type(Vec<TypeGroup>),
    Size(Vec<SizeGroup>),
    Mixed(Vec<TypeSizeGroup>),
}

impl Classification {
    pub fn criterion(&self) -> Criterion {
        match self {
            Classification::Type(_) => Criterion::Type,
            Classification::Size(_) => Criterion::Size,
            Classification::Mixed(_) => Criterion::Mixed,
        }
    }

    /// Number of groups emitted.
    pub fn len(&self) -> usize {
        match self {
            Classification::Type(groups) => groups.len(),
            Classification::Size(groups) => groups.len(),
            Classification::Mixed(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Partitions items by type name, ordered by name ascending.
pub fn group_by_type(items: &[ItemDetail]) -> Vec<TypeGroup> {
    let mut buckets: BTreeMap<&str, Vec<ItemDetail>> = BTreeMap::new();
    for item in items {
        buckets
            .entry(item.type_name.as_str())
            .or_default()
            .push(item.clone());
    }

    buckets
        .into_iter()
        .map(|(type_name, items)| TypeGroup {
            type_name: type_name.to_string(),
            count: items.len(),
            items,
        })
        .collect()
}

/// Partitions items by size, in Small → Medium → Large order.
///
/// Unlike statistics, empty size classes are omitted.
pub fn group_by_size(items: &[ItemDetail]) -> Vec<SizeGroup> {
    let mut buckets: [Vec<ItemDetail>; 3] = Default::default();
    for item in items {
        buckets[item.size.rank()].push(item.clone());
    }

    Size::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, items)| !items.is_empty())
        .map(|(size, items)| SizeGroup {
            size,
            count: items.len(),
            items,
        })
        .collect()
}

/// Composite grouping key for the mixed criterion.
pub fn type_size_key(type_name: &str, size: Size) -> String {
    format!("{}_{}", type_name, size.display_name())
}

/// Partitions items by (type, size), ordered by the composite key string.
pub fn group_by_type_and_size(items: &[ItemDetail]) -> Vec<TypeSizeGroup> {
    let mut buckets: BTreeMap<String, TypeSizeGroup> = BTreeMap::new();
    for item in items {
        let key = type_size_key(&item.type_name, item.size);
        buckets
            .entry(key.clone())
            .or_insert_with(|| TypeSizeGroup {
                type_name: item.type_name.clone(),
                size: item.size,
                key,
                count: 0,
                items: Vec::new(),
            })
            .items
            .push(item.clone());
    }

    buckets
        .into_values()
        .map(|mut group| {
            group.count = group.items.len();
            group
        })
        .collect()
}

/// Groups `items` by the given criterion.
pub fn classify(criterion: Criterion, items: &[ItemDetail]) -> Classification {
    match criterion {
        Criterion::Type => Classification::Type(group_by_type(items)),
        Criterion::Size => Classification::Size(group_by_size(items)),
        Criterion::Mixed => Classification::Mixed(group_by_type_and_size(items)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(name: &str, type_name: &str, size: Size) -> ItemDetail {
        ItemDetail {
            id: format!("id-{name}"),
            name: name.to_string(),
            type_id: format!("type-{type_name}"),
            type_name: type_name.to_string(),
            size,
            bin_id: "b1".to_string(),
            bin_name: "Garage".to_string(),
            created_at: Utc::now(),
        }
    }

    fn names(items: &[ItemDetail]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn sample() -> Vec<ItemDetail> {
        vec![
            item("Hammer", "Tool", Size::Medium),
            item("Dune", "Book", Size::Small),
            item("Atlas", "Book", Size::Large),
            item("Wrench", "Tool", Size::Medium),
            item("Cable", "Electronics", Size::Small),
        ]
    }

    #[test]
    fn test_group_by_type_orders_by_name() {
        let groups = group_by_type(&sample());

        let order: Vec<&str> = groups.iter().map(|g| g.type_name.as_str()).collect();
        assert_eq!(order, vec!["Book", "Electronics", "Tool"]);
        assert_eq!(groups[0].count, 2);
        assert_eq!(names(&groups[0].items), vec!["Dune", "Atlas"]);
        assert_eq!(names(&groups[2].items), vec!["Hammer", "Wrench"]);
    }

    #[test]
    fn test_group_by_type_is_deterministic() {
        let items = sample();
        assert_eq!(group_by_type(&items), group_by_type(&items));
    }

    #[test]
    fn test_group_by_type_uses_byte_order() {
        let items = vec![item("a", "book", Size::Small), item("b", "Zebra", Size::Small)];
        let order: Vec<String> = group_by_type(&items)
            .into_iter()
            .map(|g| g.type_name)
            .collect();
        assert_eq!(order, vec!["Zebra", "book"]);
    }

    #[test]
    fn test_group_by_size_fixed_order_and_omits_empty() {
        let items = vec![
            item("Atlas", "Book", Size::Large),
            item("Dune", "Book", Size::Small),
            item("Poster", "Art", Size::Large),
        ];

        let groups = group_by_size(&items);

        let sizes: Vec<Size> = groups.iter().map(|g| g.size).collect();
        assert_eq!(sizes, vec![Size::Small, Size::Large]);
        assert_eq!(groups[1].count, 2);
        assert_eq!(names(&groups[1].items), vec!["Atlas", "Poster"]);
    }

    #[test]
    fn test_group_by_type_and_size_orders_by_composite_key() {
        let groups = group_by_type_and_size(&sample());

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Book_Large", "Book_Small", "Electronics_Small", "Tool_Medium"]
        );
        assert_eq!(groups[3].count, 2);
        assert_eq!(groups[3].type_name, "Tool");
        assert_eq!(groups[3].size, Size::Medium);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(classify(Criterion::Type, &[]).is_empty());
        assert!(classify(Criterion::Size, &[]).is_empty());
        assert!(classify(Criterion::Mixed, &[]).is_empty());
    }

    #[test]
    fn test_criterion_parse_and_tagged_output() {
        assert_eq!("mixed".parse::<Criterion>().unwrap(), Criterion::Mixed);
        assert!("tamanio".parse::<Criterion>().is_err());

        let classification = classify(Criterion::Size, &sample());
        assert_eq!(classification.criterion(), Criterion::Size);

        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["criterion"], "size");
        assert_eq!(json["groups"][0]["size"], "small");
    }
}
