//! # Database Error Types
//!
//! Error types for catalog store and mutation operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)        CoreError (validation, capacity)    │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::code() → ErrorCode ← Machine-readable for drivers            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stowage_core::CoreError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Bin, item or item type ID doesn't resolve
    /// - Classification scoped to a bin that doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A business rule rejected the operation (invalid input, full bin,
    /// recommender failure).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The schema refused the statement.
    ///
    /// ## When This Occurs
    /// - Capacity trigger fired (the service guard should have caught it)
    /// - Something tried to rewrite or delete history
    /// - A raw write reused a primary key or broke a CHECK
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Machine-readable category of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DbError::NotFound { .. } => ErrorCode::NotFound,
            DbError::Domain(CoreError::InvalidInput(_)) => ErrorCode::InvalidInput,
            DbError::Domain(CoreError::CapacityExceeded { .. }) => ErrorCode::CapacityExceeded,
            DbError::Domain(CoreError::ExternalService(_)) => ErrorCode::ExternalService,
            DbError::ForeignKeyViolation { .. } => ErrorCode::InvalidInput,
            DbError::ConstraintViolation(_)
            | DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted => ErrorCode::DatabaseError,
            DbError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<stowage_core::ValidationError> for DbError {
    fn from(err: stowage_core::ValidationError) -> Self {
        DbError::Domain(CoreError::InvalidInput(err))
    }
}

/// Error codes for driver responses.
///
/// ```json
/// { "code": "CAPACITY_EXCEEDED", "message": "Bin 'Garage' is full. Maximum capacity: 2" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed arguments (400)
    InvalidInput,

    /// Unresolved id (404)
    NotFound,

    /// Capacity guard rejected the write (409)
    CapacityExceeded,

    /// Recommendation generator failed (502)
    ExternalService,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal error (500)
    Internal,
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("UNIQUE constraint failed")
                    || msg.contains("CHECK constraint failed")
                    || msg.contains("bin capacity exceeded")
                    || msg.contains("append-only")
                {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use stowage_core::ValidationError;

    #[test]
    fn test_error_codes() {
        assert_eq!(DbError::not_found("Bin", "x").code(), ErrorCode::NotFound);

        let full: DbError = CoreError::capacity_exceeded("Garage", 2).into();
        assert_eq!(full.code(), ErrorCode::CapacityExceeded);
        assert_eq!(full.to_string(), "Bin 'Garage' is full. Maximum capacity: 2");

        let invalid: DbError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert_eq!(invalid.code(), ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_schema_rejections_are_constraint_violations() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let insert = "INSERT INTO item_types (id, name, description, created_at) \
                      VALUES (?1, ?2, NULL, '2026-01-01T00:00:00Z')";

        sqlx::query(insert)
            .bind("t1")
            .bind("Misc")
            .execute(db.pool())
            .await
            .unwrap();

        let duplicate: DbError = sqlx::query(insert)
            .bind("t1")
            .bind("Other")
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();
        match &duplicate {
            DbError::ConstraintViolation(msg) => assert!(msg.contains("item_types.id")),
            other => panic!("expected ConstraintViolation, got {other:?}"),
        }
        assert_eq!(duplicate.code(), ErrorCode::DatabaseError);

        let blank: DbError = sqlx::query(insert)
            .bind("t2")
            .bind("   ")
            .execute(db.pool())
            .await
            .unwrap_err()
            .into();
        assert!(matches!(blank, DbError::ConstraintViolation(_)));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::CapacityExceeded).unwrap();
        assert_eq!(json, "\"CAPACITY_EXCEEDED\"");
    }
}
