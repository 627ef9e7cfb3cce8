//! # Error Types
//!
//! Domain-specific error types for stowage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stowage-core errors (this file)                                       │
//! │  ├── CoreError        - Capacity, input and recommender failures       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stowage-db errors (separate crate)                                    │
//! │  └── DbError          - NotFound + database failures, wraps CoreError  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed creation or update arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The capacity guard rejected a write.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_item(bin "Garage", max 2) with 2 items already inside
    ///      │
    ///      ▼
    /// can_accept(bin, 2) → false
    ///      │
    ///      ▼
    /// CapacityExceeded { bin_name: "Garage", max_capacity: 2 }
    /// ```
    #[error("Bin '{bin_name}' is full. Maximum capacity: {max_capacity}")]
    CapacityExceeded { bin_name: String, max_capacity: i64 },

    /// The recommendation generator was unreachable or returned nothing usable.
    #[error("Recommendation service error: {0}")]
    ExternalService(String),
}

impl CoreError {
    /// Creates a CapacityExceeded error.
    pub fn capacity_exceeded(bin_name: impl Into<String>, max_capacity: i64) -> Self {
        CoreError::CapacityExceeded {
            bin_name: bin_name.into(),
            max_capacity,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is below a dynamic lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_bin_and_maximum() {
        let err = CoreError::capacity_exceeded("Garage", 2);
        assert_eq!(err.to_string(), "Bin 'Garage' is full. Maximum capacity: 2");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooSmall {
            field: "max_capacity".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "max_capacity must be at least 3");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "max_capacity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
    }
}
