//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Detail Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items i ──JOIN── item_types t (type_name)                             │
//! │          └─JOIN── bins b       (bin_name)                              │
//! │                                                                         │
//! │  ORDER BY i.rowid → catalog insertion order, which classification      │
//! │  keeps inside each group and the snapshot keeps inside each bin        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stowage_core::{Item, ItemDetail};

const DETAIL_SELECT: &str = r#"
    SELECT
        i.id,
        i.name,
        i.type_id,
        t.name AS type_name,
        i.size,
        i.bin_id,
        b.name AS bin_name,
        i.created_at
    FROM items i
    INNER JOIN item_types t ON t.id = i.type_id
    INNER JOIN bins b ON b.id = i.bin_id
"#;

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Item>> {
    debug!(id = %id, "Getting item by ID");

    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, name, type_id, size, bin_id, created_at
        FROM items
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(item)
}

pub(crate) async fn fetch_required(conn: &mut SqliteConnection, id: &str) -> DbResult<Item> {
    fetch(conn, id)
        .await?
        .ok_or_else(|| DbError::not_found("Item", id))
}

pub(crate) async fn fetch_detail(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<ItemDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE i.id = ?1");

    let detail = sqlx::query_as::<_, ItemDetail>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(detail)
}

pub(crate) async fn list_details(
    conn: &mut SqliteConnection,
    bin_id: Option<&str>,
) -> DbResult<Vec<ItemDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE (?1 IS NULL OR i.bin_id = ?1) ORDER BY i.rowid");

    let items = sqlx::query_as::<_, ItemDetail>(&sql)
        .bind(bin_id)
        .fetch_all(&mut *conn)
        .await?;

    debug!(bin_id = ?bin_id, count = items.len(), "Listed items");
    Ok(items)
}

/// Items of one type, in insertion order.
pub(crate) async fn list_details_by_type(
    conn: &mut SqliteConnection,
    type_id: &str,
) -> DbResult<Vec<ItemDetail>> {
    let sql = format!("{DETAIL_SELECT} WHERE i.type_id = ?1 ORDER BY i.rowid");

    let items = sqlx::query_as::<_, ItemDetail>(&sql)
        .bind(type_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(items)
}

pub(crate) async fn insert(conn: &mut SqliteConnection, item: &Item) -> DbResult<()> {
    debug!(id = %item.id, bin_id = %item.bin_id, "Inserting item");

    sqlx::query(
        r#"
        INSERT INTO items (id, name, type_id, size, bin_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&item.id)
    .bind(&item.name)
    .bind(&item.type_id)
    .bind(item.size)
    .bind(&item.bin_id)
    .bind(item.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Writes name, type and size. The owning bin only changes through [`set_bin`].
pub(crate) async fn update(conn: &mut SqliteConnection, item: &Item) -> DbResult<()> {
    debug!(id = %item.id, "Updating item");

    let result = sqlx::query(
        r#"
        UPDATE items SET
            name = ?2,
            type_id = ?3,
            size = ?4
        WHERE id = ?1
        "#,
    )
    .bind(&item.id)
    .bind(&item.name)
    .bind(&item.type_id)
    .bind(item.size)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Item", &item.id));
    }

    Ok(())
}

pub(crate) async fn set_bin(conn: &mut SqliteConnection, id: &str, bin_id: &str) -> DbResult<()> {
    debug!(id = %id, bin_id = %bin_id, "Reassigning item");

    let result = sqlx::query("UPDATE items SET bin_id = ?2 WHERE id = ?1")
        .bind(id)
        .bind(bin_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Item", id));
    }

    Ok(())
}

pub(crate) async fn delete(conn: &mut SqliteConnection, id: &str) -> DbResult<()> {
    debug!(id = %id, "Deleting item");

    let result = sqlx::query("DELETE FROM items WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Item", id));
    }

    Ok(())
}
