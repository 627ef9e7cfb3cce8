//! # Validation Module
//!
//! Input validation for catalog mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Driver (HTTP / UI)                                           │
//! │  └── Deserialization, basic shape checks                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names trimmed, non-empty, bounded                                 │
//! │  └── Capacities positive and not below occupancy                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (max_capacity > 0)                                          │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Name validators return the trimmed value so callers store exactly what was
//! validated.

use crate::error::ValidationError;
use crate::{MAX_NAME_LEN, MAX_RECOMMENDATION_COUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a bin name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use stowage_core::validation::validate_bin_name;
///
/// assert_eq!(validate_bin_name("  Garage ").unwrap(), "Garage");
/// assert!(validate_bin_name("   ").is_err());
/// ```
pub fn validate_bin_name(name: &str) -> ValidationResult<String> {
    validate_name("name", name)
}

/// Validates an item name and returns it trimmed.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    validate_name("item name", name)
}

/// Validates an item type name and returns it trimmed.
pub fn validate_type_name(name: &str) -> ValidationResult<String> {
    validate_name("type name", name)
}

/// Normalizes an optional description: trimmed, blank becomes `None`.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a bin's maximum capacity.
///
/// ## Rules
/// - Must be positive (> 0). A zero capacity would leave the occupancy
///   percentage undefined.
pub fn validate_max_capacity(max_capacity: i64) -> ValidationResult<()> {
    if max_capacity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_capacity".to_string(),
        });
    }

    Ok(())
}

/// Validates a capacity change against the bin's current occupancy.
///
/// ## Rules
/// - Same positivity rule as creation
/// - Must not drop below the number of items already inside
pub fn validate_capacity_change(new_max: i64, occupied: i64) -> ValidationResult<()> {
    validate_max_capacity(new_max)?;

    if new_max < occupied {
        return Err(ValidationError::TooSmall {
            field: "max_capacity".to_string(),
            min: occupied,
        });
    }

    Ok(())
}

/// Validates how many suggestions a caller asks the recommender for.
pub fn validate_recommendation_count(count: usize) -> ValidationResult<()> {
    if count == 0 || count > MAX_RECOMMENDATION_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "recommendation count".to_string(),
            min: 1,
            max: MAX_RECOMMENDATION_COUNT as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bin_name() {
        assert_eq!(validate_bin_name("Garage").unwrap(), "Garage");
        assert_eq!(validate_bin_name("  Office  ").unwrap(), "Office");

        assert!(validate_bin_name("").is_err());
        assert!(validate_bin_name("   ").is_err());
        assert!(validate_bin_name(&"A".repeat(101)).is_err());
        assert!(validate_bin_name(&"A".repeat(100)).is_ok());
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("  ")), None);
        assert_eq!(
            normalize_description(Some(" Paper things ")),
            Some("Paper things".to_string())
        );
    }

    #[test]
    fn test_validate_max_capacity() {
        assert!(validate_max_capacity(1).is_ok());
        assert!(validate_max_capacity(500).is_ok());

        assert!(validate_max_capacity(0).is_err());
        assert!(validate_max_capacity(-3).is_err());
    }

    #[test]
    fn test_validate_capacity_change() {
        assert!(validate_capacity_change(5, 3).is_ok());
        assert!(validate_capacity_change(3, 3).is_ok());

        assert!(matches!(
            validate_capacity_change(2, 3),
            Err(ValidationError::TooSmall { min: 3, .. })
        ));
        assert!(validate_capacity_change(0, 0).is_err());
    }

    #[test]
    fn test_validate_recommendation_count() {
        assert!(validate_recommendation_count(1).is_ok());
        assert!(validate_recommendation_count(3).is_ok());
        assert!(validate_recommendation_count(0).is_err());
        assert!(validate_recommendation_count(11).is_err());
    }
}
