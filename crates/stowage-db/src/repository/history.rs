//! # History Repository
//!
//! Append-only audit trail of structural changes to bins.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bin_history.seq   AUTOINCREMENT, defines write order                  │
//! │  recorded_at       max(now, previous recorded_at), never goes back     │
//! │                    even if the wall clock does                         │
//! │                                                                         │
//! │  UPDATE / DELETE on bin_history → trigger aborts ("append-only")       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stowage_core::{HistoryAction, HistoryEntry};

/// Appends one entry. Must run in the same transaction as the change it
/// describes.
pub(crate) async fn append(
    conn: &mut SqliteConnection,
    bin_id: &str,
    bin_name: &str,
    action: HistoryAction,
    description: String,
) -> DbResult<HistoryEntry> {
    let last: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT recorded_at FROM bin_history ORDER BY seq DESC LIMIT 1")
            .fetch_optional(&mut *conn)
            .await?;

    let now = Utc::now();
    let recorded_at = last.map_or(now, |last| last.max(now));

    let entry = HistoryEntry {
        id: Uuid::new_v4().to_string(),
        bin_id: bin_id.to_string(),
        bin_name: bin_name.to_string(),
        action,
        description,
        recorded_at,
    };

    debug!(bin_id = %bin_id, action = %action, "Appending history entry");

    sqlx::query(
        r#"
        INSERT INTO bin_history (id, bin_id, bin_name, action, description, recorded_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&entry.id)
    .bind(&entry.bin_id)
    .bind(&entry.bin_name)
    .bind(entry.action)
    .bind(&entry.description)
    .bind(entry.recorded_at)
    .execute(&mut *conn)
    .await?;

    Ok(entry)
}

pub(crate) async fn list(
    conn: &mut SqliteConnection,
    bin_id: Option<&str>,
) -> DbResult<Vec<HistoryEntry>> {
    let entries = sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT id, bin_id, bin_name, action, description, recorded_at
        FROM bin_history
        WHERE (?1 IS NULL OR bin_id = ?1)
        ORDER BY seq
        "#,
    )
    .bind(bin_id)
    .fetch_all(&mut *conn)
    .await?;

    debug!(bin_id = ?bin_id, count = entries.len(), "Listed history");
    Ok(entries)
}
