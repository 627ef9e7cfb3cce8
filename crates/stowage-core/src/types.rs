//! # Domain Types
//!
//! Core domain types used throughout Stowage.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bin        │   │      Item       │   │    ItemType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  bin_id (FK)    │   │  id (UUID)      │       │
//! │  │  name           │   │  type_id (FK) ──┼──►│  name           │       │
//! │  │  max_capacity   │   │  size           │   │  description?   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │          ▲                                                              │
//! │          │ bin_id (plain id, survives bin deletion)                     │
//! │  ┌───────┴─────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  HistoryEntry   │   │      Size       │   │  HistoryAction  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bin_name       │   │  Small  (0)     │   │  created        │       │
//! │  │  action         │   │  Medium (1)     │   │  item_added     │       │
//! │  │  recorded_at    │   │  Large  (2)     │   │  item_moved_out │ ...   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Size
// =============================================================================

/// Size class of an item.
///
/// Declaration order is the domain order: Small < Medium < Large. The same
/// ordering drives sort keys and the zero-padded statistics iteration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    #[default]
    Small,
    Medium,
    Large,
}

impl Size {
    /// Every size class, in domain order.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Position in the domain order (Small=0, Medium=1, Large=2).
    #[inline]
    pub const fn rank(self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }

    /// Human-readable label, also used in composite grouping keys.
    pub const fn display_name(self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(Size::Small),
            "medium" | "m" => Ok(Size::Medium),
            "large" | "l" => Ok(Size::Large),
            _ => Err(ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: Size::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Bin
// =============================================================================

/// A capacity-bounded container of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Bin {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Hard ceiling on the number of items held. Always > 0.
    pub max_capacity: i64,

    /// When the bin was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Item Type
// =============================================================================

/// A named category shared across items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ItemType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// An object assigned to exactly one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Owning item type.
    pub type_id: String,
    pub size: Size,
    /// Owning bin. Reassigned on move, never null.
    pub bin_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// An item joined with its type and bin names.
///
/// This is the row shape consumed by classification, statistics and the
/// snapshot exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ItemDetail {
    pub id: String,
    pub name: String,
    pub type_id: String,
    pub type_name: String,
    pub size: Size,
    pub bin_id: String,
    pub bin_name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// History
// =============================================================================

/// Kind of structural change recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Created,
    Modified,
    Deleted,
    ItemAdded,
    ItemRemoved,
    ItemModified,
    ItemMovedOut,
    ItemMovedIn,
}

impl HistoryAction {
    /// Stable string form, identical to the stored and serialized value.
    pub const fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Created => "created",
            HistoryAction::Modified => "modified",
            HistoryAction::Deleted => "deleted",
            HistoryAction::ItemAdded => "item_added",
            HistoryAction::ItemRemoved => "item_removed",
            HistoryAction::ItemModified => "item_modified",
            HistoryAction::ItemMovedOut => "item_moved_out",
            HistoryAction::ItemMovedIn => "item_moved_in",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable audit record of one state-changing action on a bin.
///
/// `bin_id` is not a foreign key: entries outlive the bin they describe, so
/// the bin name is frozen into `bin_name` at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct HistoryEntry {
    pub id: String,
    pub bin_id: String,
    pub bin_name: String,
    pub action: HistoryAction,
    pub description: String,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

// =============================================================================
// Change Sets
// =============================================================================

/// Partial update for a bin. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinChanges {
    pub name: Option<String>,
    pub max_capacity: Option<i64>,
}

/// Partial update for an item. Moving between bins goes through `move_item`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub type_id: Option<String>,
    pub size: Option<Size>,
}

/// Partial update for an item type.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemTypeChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_domain_order() {
        let mut sizes = vec![Size::Large, Size::Small, Size::Medium];
        sizes.sort();
        assert_eq!(sizes, Size::ALL.to_vec());
        assert_eq!(Size::Large.rank(), 2);
        assert_eq!(Size::default(), Size::Small);
    }

    #[test]
    fn test_size_from_str() {
        assert_eq!("small".parse::<Size>().unwrap(), Size::Small);
        assert_eq!(" Medium ".parse::<Size>().unwrap(), Size::Medium);
        assert_eq!("L".parse::<Size>().unwrap(), Size::Large);
        assert!("huge".parse::<Size>().is_err());
    }

    #[test]
    fn test_history_action_serializes_as_stored_value() {
        let json = serde_json::to_string(&HistoryAction::ItemMovedOut).unwrap();
        assert_eq!(json, "\"item_moved_out\"");
        assert_eq!(HistoryAction::ItemMovedOut.as_str(), "item_moved_out");
    }
}
