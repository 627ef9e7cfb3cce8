//! # Bin Repository
//!
//! Database operations for bins. Every function takes a bare connection so
//! the catalog service can run it inside its transaction.

use sqlx::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stowage_core::Bin;

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Bin>> {
    debug!(id = %id, "Getting bin by ID");

    let bin = sqlx::query_as::<_, Bin>(
        r#"
        SELECT id, name, max_capacity, created_at
        FROM bins
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(bin)
}

/// Like [`fetch`], but a missing bin is `NotFound`.
pub(crate) async fn fetch_required(conn: &mut SqliteConnection, id: &str) -> DbResult<Bin> {
    fetch(conn, id)
        .await?
        .ok_or_else(|| DbError::not_found("Bin", id))
}

pub(crate) async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<Bin>> {
    let bins = sqlx::query_as::<_, Bin>(
        r#"
        SELECT id, name, max_capacity, created_at
        FROM bins
        ORDER BY rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    debug!(count = bins.len(), "Listed bins");
    Ok(bins)
}

pub(crate) async fn insert(conn: &mut SqliteConnection, bin: &Bin) -> DbResult<()> {
    debug!(id = %bin.id, name = %bin.name, "Inserting bin");

    sqlx::query(
        r#"
        INSERT INTO bins (id, name, max_capacity, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&bin.id)
    .bind(&bin.name)
    .bind(bin.max_capacity)
    .bind(bin.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn update(conn: &mut SqliteConnection, bin: &Bin) -> DbResult<()> {
    debug!(id = %bin.id, "Updating bin");

    let result = sqlx::query(
        r#"
        UPDATE bins SET
            name = ?2,
            max_capacity = ?3
        WHERE id = ?1
        "#,
    )
    .bind(&bin.id)
    .bind(&bin.name)
    .bind(bin.max_capacity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Bin", &bin.id));
    }

    Ok(())
}

/// Deletes a bin. Its items go with it (ON DELETE CASCADE).
pub(crate) async fn delete(conn: &mut SqliteConnection, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting bin");

    let result = sqlx::query("DELETE FROM bins WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Bin", id));
    }

    Ok(())
}

pub(crate) async fn count_items(conn: &mut SqliteConnection, bin_id: &str) -> DbResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE bin_id = ?1")
        .bind(bin_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// Item counts for every bin that holds at least one item.
pub(crate) async fn occupancy_by_bin(
    conn: &mut SqliteConnection,
) -> DbResult<HashMap<String, i64>> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT bin_id, COUNT(*) FROM items GROUP BY bin_id")
            .fetch_all(&mut *conn)
            .await?;

    Ok(rows.into_iter().collect())
}
