//! # Capacity Guard
//!
//! Decides whether a bin can take one more item, and derives occupancy
//! figures for views.
//!
//! ## Where The Guard Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogService::add_item / move_item                                  │
//! │                                                                         │
//! │  ┌──────────── writer gate + SQLite transaction ─────────────────────┐ │
//! │  │                                                                   │ │
//! │  │  SELECT COUNT(*) FROM items WHERE bin_id = ?   → occupancy        │ │
//! │  │       │                                                           │ │
//! │  │       ▼                                                           │ │
//! │  │  ensure_capacity(bin, occupancy) ← THIS MODULE                    │ │
//! │  │       │                                                           │ │
//! │  │       ├── full  → CapacityExceeded, transaction rolled back       │ │
//! │  │       └── room  → INSERT/UPDATE item + history, COMMIT            │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Capacity counts items, never their size.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Bin;

// =============================================================================
// Guard
// =============================================================================

/// Returns true iff `bin` can accept one more item.
///
/// `current_occupancy` must be the live count of items owned by `bin`.
#[inline]
pub fn can_accept(bin: &Bin, current_occupancy: i64) -> bool {
    current_occupancy < bin.max_capacity
}

/// Like [`can_accept`], but returns the error the caller surfaces.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use stowage_core::capacity::ensure_capacity;
/// use stowage_core::{Bin, CoreError};
///
/// let bin = Bin {
///     id: "b1".into(),
///     name: "Garage".into(),
///     max_capacity: 1,
///     created_at: Utc::now(),
/// };
///
/// assert!(ensure_capacity(&bin, 0).is_ok());
/// assert!(matches!(
///     ensure_capacity(&bin, 1),
///     Err(CoreError::CapacityExceeded { max_capacity: 1, .. })
/// ));
/// ```
pub fn ensure_capacity(bin: &Bin, current_occupancy: i64) -> CoreResult<()> {
    if can_accept(bin, current_occupancy) {
        Ok(())
    } else {
        Err(CoreError::capacity_exceeded(&bin.name, bin.max_capacity))
    }
}

// =============================================================================
// Occupancy
// =============================================================================

/// Occupancy figures for one bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Occupancy {
    /// Items currently in the bin.
    pub occupied: i64,
    /// Free slots left.
    pub remaining: i64,
    /// `occupied / max_capacity * 100`, not truncated.
    pub percentage: f64,
}

impl Occupancy {
    /// Computes occupancy for a bin of `max_capacity` holding `occupied` items.
    ///
    /// A non-positive capacity cannot be created or updated into, but reports
    /// 0% rather than dividing by zero should one ever be read back.
    pub fn new(occupied: i64, max_capacity: i64) -> Self {
        let percentage = if max_capacity > 0 {
            occupied as f64 / max_capacity as f64 * 100.0
        } else {
            0.0
        };

        Occupancy {
            occupied,
            remaining: max_capacity - occupied,
            percentage,
        }
    }

    /// Occupancy of `bin` at the given item count.
    pub fn of(bin: &Bin, occupied: i64) -> Self {
        Occupancy::new(occupied, bin.max_capacity)
    }

    /// True when no slot is left.
    pub fn is_full(&self) -> bool {
        self.remaining <= 0
    }
}

/// A bin together with its occupancy, for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BinCapacity {
    pub bin: Bin,
    pub occupancy: Occupancy,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bin(max_capacity: i64) -> Bin {
        Bin {
            id: "bin-1".to_string(),
            name: "Garage".to_string(),
            max_capacity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_accept_below_capacity() {
        let b = bin(2);
        assert!(can_accept(&b, 0));
        assert!(can_accept(&b, 1));
        assert!(!can_accept(&b, 2));
        assert!(!can_accept(&b, 3));
    }

    #[test]
    fn test_ensure_capacity_error_carries_bin() {
        let err = ensure_capacity(&bin(2), 2).unwrap_err();
        match err {
            CoreError::CapacityExceeded {
                bin_name,
                max_capacity,
            } => {
                assert_eq!(bin_name, "Garage");
                assert_eq!(max_capacity, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_occupancy_percentage_is_not_truncated() {
        let occ = Occupancy::new(1, 3);
        assert_eq!(occ.occupied, 1);
        assert_eq!(occ.remaining, 2);
        assert!((occ.percentage - 33.333_333).abs() < 0.001);
        assert!(!occ.is_full());
    }

    #[test]
    fn test_occupancy_full_bin() {
        let occ = Occupancy::of(&bin(4), 4);
        assert_eq!(occ.remaining, 0);
        assert!((occ.percentage - 100.0).abs() < f64::EPSILON);
        assert!(occ.is_full());
    }
}
