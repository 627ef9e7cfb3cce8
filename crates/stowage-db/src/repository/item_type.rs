//! # Item Type Repository
//!
//! Database operations for item types.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stowage_core::ItemType;

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<ItemType>> {
    debug!(id = %id, "Getting item type by ID");

    let item_type = sqlx::query_as::<_, ItemType>(
        r#"
        SELECT id, name, description, created_at
        FROM item_types
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(item_type)
}

pub(crate) async fn fetch_required(conn: &mut SqliteConnection, id: &str) -> DbResult<ItemType> {
    fetch(conn, id)
        .await?
        .ok_or_else(|| DbError::not_found("ItemType", id))
}

pub(crate) async fn list(conn: &mut SqliteConnection) -> DbResult<Vec<ItemType>> {
    let item_types = sqlx::query_as::<_, ItemType>(
        r#"
        SELECT id, name, description, created_at
        FROM item_types
        ORDER BY rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    debug!(count = item_types.len(), "Listed item types");
    Ok(item_types)
}

pub(crate) async fn insert(conn: &mut SqliteConnection, item_type: &ItemType) -> DbResult<()> {
    debug!(id = %item_type.id, name = %item_type.name, "Inserting item type");

    sqlx::query(
        r#"
        INSERT INTO item_types (id, name, description, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&item_type.id)
    .bind(&item_type.name)
    .bind(&item_type.description)
    .bind(item_type.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn update(conn: &mut SqliteConnection, item_type: &ItemType) -> DbResult<()> {
    debug!(id = %item_type.id, "Updating item type");

    let result = sqlx::query(
        r#"
        UPDATE item_types SET
            name = ?2,
            description = ?3
        WHERE id = ?1
        "#,
    )
    .bind(&item_type.id)
    .bind(&item_type.name)
    .bind(&item_type.description)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("ItemType", &item_type.id));
    }

    Ok(())
}

/// Deletes an item type. Its items go with it (ON DELETE CASCADE).
pub(crate) async fn delete(conn: &mut SqliteConnection, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting item type");

    let result = sqlx::query("DELETE FROM item_types WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("ItemType", id));
    }

    Ok(())
}
