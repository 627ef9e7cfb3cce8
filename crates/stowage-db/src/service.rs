//! # Catalog Service
//!
//! Every validated, audited operation on the catalog.
//!
//! ## Mutation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(bin_id, name, type_id, size)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate arguments (pure, stowage-core)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write_gate.lock()  ← one mutation at a time per Database              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    resolve bin, type          → NotFound                               │
//! │    count items, guard         → CapacityExceeded                       │
//! │    INSERT item                                                          │
//! │    INSERT history entry                                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any `?` before COMMIT drops the transaction, which rolls it back.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads skip the gate. The snapshot runs inside a read transaction so bins,
//! types and items come from one consistent state.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use stowage_core::capacity::{ensure_capacity, BinCapacity, Occupancy};
use stowage_core::classify::{self, SizeGroup, TypeGroup, TypeSizeGroup};
use stowage_core::validation::{
    normalize_description, validate_bin_name, validate_capacity_change, validate_item_name,
    validate_max_capacity, validate_recommendation_count, validate_type_name,
};
use stowage_core::{
    Bin, BinChanges, BinStatistics, CatalogSnapshot, Classification, CoreError, Criterion,
    HistoryAction, HistoryEntry, Item, ItemChanges, ItemDetail, ItemType, ItemTypeChanges,
    Recommendations, Recommender, Size,
};

use crate::error::{DbError, DbResult};
use crate::repository::{bin, history, item, item_type};

/// Generates a new UUID v4 string identifier.
fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Catalog operations. Obtain one with [`Database::catalog`](crate::Database::catalog).
#[derive(Debug, Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl CatalogService {
    pub(crate) fn new(pool: SqlitePool, write_gate: Arc<Mutex<()>>) -> Self {
        CatalogService { pool, write_gate }
    }

    // =========================================================================
    // Bins
    // =========================================================================

    /// Creates a bin and records a `created` entry.
    ///
    /// ## Errors
    /// - `InvalidInput` if the name trims to empty or `max_capacity <= 0`
    pub async fn create_bin(&self, name: &str, max_capacity: i64) -> DbResult<Bin> {
        let name = validate_bin_name(name)?;
        validate_max_capacity(max_capacity)?;

        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let bin = Bin {
            id: generate_id(),
            name,
            max_capacity,
            created_at: Utc::now(),
        };

        bin::insert(&mut tx, &bin).await?;
        history::append(
            &mut tx,
            &bin.id,
            &bin.name,
            HistoryAction::Created,
            format!(
                "Bin \"{}\" created with capacity {}",
                bin.name, bin.max_capacity
            ),
        )
        .await?;

        tx.commit().await?;

        info!(id = %bin.id, name = %bin.name, max_capacity = bin.max_capacity, "Bin created");
        Ok(bin)
    }

    /// Gets a bin by ID.
    pub async fn get_bin(&self, bin_id: &str) -> DbResult<Bin> {
        let mut conn = self.pool.acquire().await?;
        bin::fetch_required(&mut conn, bin_id).await
    }

    /// Lists all bins in creation order.
    pub async fn list_bins(&self) -> DbResult<Vec<Bin>> {
        let mut conn = self.pool.acquire().await?;
        bin::list(&mut conn).await
    }

    /// Occupancy summary for one bin.
    pub async fn bin_capacity(&self, bin_id: &str) -> DbResult<BinCapacity> {
        let mut conn = self.pool.acquire().await?;
        let bin = bin::fetch_required(&mut conn, bin_id).await?;
        let occupied = bin::count_items(&mut conn, bin_id).await?;

        Ok(BinCapacity {
            occupancy: Occupancy::of(&bin, occupied),
            bin,
        })
    }

    /// Occupancy summaries for every bin, in creation order.
    pub async fn list_bin_capacities(&self) -> DbResult<Vec<BinCapacity>> {
        let mut conn = self.pool.acquire().await?;
        let bins = bin::list(&mut conn).await?;
        let counts = bin::occupancy_by_bin(&mut conn).await?;

        Ok(bins
            .into_iter()
            .map(|bin| {
                let occupied = counts.get(&bin.id).copied().unwrap_or(0);
                BinCapacity {
                    occupancy: Occupancy::of(&bin, occupied),
                    bin,
                }
            })
            .collect())
    }

    /// Renames and/or resizes a bin and records a `modified` entry.
    ///
    /// Changes that leave the bin as it was write nothing.
    ///
    /// ## Errors
    /// - `NotFound` if the bin doesn't exist
    /// - `InvalidInput` for a blank name, a non-positive capacity, or a
    ///   capacity below the bin's current occupancy
    pub async fn update_bin(&self, bin_id: &str, changes: BinChanges) -> DbResult<Bin> {
        let new_name = changes.name.as_deref().map(validate_bin_name).transpose()?;
        if let Some(max) = changes.max_capacity {
            validate_max_capacity(max)?;
        }

        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let mut bin = bin::fetch_required(&mut tx, bin_id).await?;
        let mut changed = Vec::new();

        if let Some(name) = new_name.filter(|n| *n != bin.name) {
            changed.push(format!("name \"{}\" -> \"{}\"", bin.name, name));
            bin.name = name;
        }

        if let Some(max) = changes.max_capacity.filter(|m| *m != bin.max_capacity) {
            let occupied = bin::count_items(&mut tx, bin_id).await?;
            validate_capacity_change(max, occupied)?;
            changed.push(format!("capacity {} -> {}", bin.max_capacity, max));
            bin.max_capacity = max;
        }

        if changed.is_empty() {
            debug!(id = %bin_id, "Bin update changed nothing");
            return Ok(bin);
        }

        bin::update(&mut tx, &bin).await?;
        history::append(
            &mut tx,
            &bin.id,
            &bin.name,
            HistoryAction::Modified,
            format!("Bin \"{}\" modified: {}", bin.name, changed.join(", ")),
        )
        .await?;

        tx.commit().await?;

        info!(id = %bin.id, "Bin updated");
        Ok(bin)
    }

    /// Deletes a bin and its items.
    ///
    /// The `deleted` entry is written first and survives the bin, together
    /// with the rest of its history.
    pub async fn delete_bin(&self, bin_id: &str) -> DbResult<()> {
        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let bin = bin::fetch_required(&mut tx, bin_id).await?;
        let occupied = bin::count_items(&mut tx, bin_id).await?;

        history::append(
            &mut tx,
            &bin.id,
            &bin.name,
            HistoryAction::Deleted,
            format!("Bin \"{}\" deleted with {} item(s)", bin.name, occupied),
        )
        .await?;
        bin::delete(&mut tx, bin_id).await?;

        tx.commit().await?;

        info!(id = %bin_id, items_removed = occupied, "Bin deleted");
        Ok(())
    }

    /// Detailed statistics for one bin.
    ///
    /// Size counts always cover Small, Medium and Large; type counts only
    /// list types present in the bin.
    pub async fn bin_statistics(&self, bin_id: &str) -> DbResult<BinStatistics> {
        let mut conn = self.pool.acquire().await?;
        let bin = bin::fetch_required(&mut conn, bin_id).await?;
        let items = item::list_details(&mut conn, Some(bin_id)).await?;

        Ok(BinStatistics::compute(&bin, &items))
    }

    // =========================================================================
    // Item Types
    // =========================================================================

    /// Creates an item type. A blank description is stored as none.
    pub async fn create_item_type(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> DbResult<ItemType> {
        let item_type = ItemType {
            id: generate_id(),
            name: validate_type_name(name)?,
            description: normalize_description(description),
            created_at: Utc::now(),
        };

        let _gate = self.write_gate.lock().await;
        let mut conn = self.pool.acquire().await?;
        item_type::insert(&mut conn, &item_type).await?;

        info!(id = %item_type.id, name = %item_type.name, "Item type created");
        Ok(item_type)
    }

    /// Gets an item type by ID.
    pub async fn get_item_type(&self, type_id: &str) -> DbResult<ItemType> {
        let mut conn = self.pool.acquire().await?;
        item_type::fetch_required(&mut conn, type_id).await
    }

    /// Lists all item types in creation order.
    pub async fn list_item_types(&self) -> DbResult<Vec<ItemType>> {
        let mut conn = self.pool.acquire().await?;
        item_type::list(&mut conn).await
    }

    /// Renames an item type and/or replaces its description.
    pub async fn update_item_type(
        &self,
        type_id: &str,
        changes: ItemTypeChanges,
    ) -> DbResult<ItemType> {
        let new_name = changes.name.as_deref().map(validate_type_name).transpose()?;

        let _gate = self.write_gate.lock().await;
        let mut conn = self.pool.acquire().await?;

        let mut item_type = item_type::fetch_required(&mut conn, type_id).await?;
        if let Some(name) = new_name {
            item_type.name = name;
        }
        if let Some(description) = changes.description {
            item_type.description = normalize_description(description.as_deref());
        }

        item_type::update(&mut conn, &item_type).await?;

        info!(id = %type_id, "Item type updated");
        Ok(item_type)
    }

    /// Deletes an item type and every item of that type.
    ///
    /// Each removed item writes an `item_removed` entry on its bin.
    pub async fn delete_item_type(&self, type_id: &str) -> DbResult<()> {
        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let doomed_type = item_type::fetch_required(&mut tx, type_id).await?;
        let members = item::list_details_by_type(&mut tx, type_id).await?;

        for member in &members {
            history::append(
                &mut tx,
                &member.bin_id,
                &member.bin_name,
                HistoryAction::ItemRemoved,
                format!(
                    "Item \"{}\" removed from bin (type \"{}\" deleted)",
                    member.name, doomed_type.name
                ),
            )
            .await?;
        }
        item_type::delete(&mut tx, type_id).await?;

        tx.commit().await?;

        info!(id = %type_id, items_removed = members.len(), "Item type deleted");
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Adds an item to a bin and records an `item_added` entry.
    ///
    /// ## Errors
    /// - `InvalidInput` if the name trims to empty
    /// - `NotFound` if the bin or item type doesn't exist
    /// - `CapacityExceeded` if the bin is full
    pub async fn add_item(
        &self,
        bin_id: &str,
        name: &str,
        type_id: &str,
        size: Size,
    ) -> DbResult<Item> {
        let name = validate_item_name(name)?;

        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let bin = bin::fetch_required(&mut tx, bin_id).await?;
        item_type::fetch_required(&mut tx, type_id).await?;

        let occupied = bin::count_items(&mut tx, bin_id).await?;
        ensure_capacity(&bin, occupied)?;

        let new_item = Item {
            id: generate_id(),
            name,
            type_id: type_id.to_string(),
            size,
            bin_id: bin.id.clone(),
            created_at: Utc::now(),
        };

        item::insert(&mut tx, &new_item).await?;
        history::append(
            &mut tx,
            &bin.id,
            &bin.name,
            HistoryAction::ItemAdded,
            format!("Item \"{}\" added to bin", new_item.name),
        )
        .await?;

        tx.commit().await?;

        info!(id = %new_item.id, bin_id = %bin.id, occupied = occupied + 1, "Item added");
        Ok(new_item)
    }

    /// Gets an item with its type and bin names.
    pub async fn get_item(&self, item_id: &str) -> DbResult<ItemDetail> {
        let mut conn = self.pool.acquire().await?;
        item::fetch_detail(&mut conn, item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", item_id))
    }

    /// Lists items in insertion order, for one bin or the whole catalog.
    pub async fn list_items(&self, bin_id: Option<&str>) -> DbResult<Vec<ItemDetail>> {
        let mut conn = self.pool.acquire().await?;
        if let Some(bin_id) = bin_id {
            bin::fetch_required(&mut conn, bin_id).await?;
        }
        item::list_details(&mut conn, bin_id).await
    }

    /// Moves an item to another bin.
    ///
    /// Writes `item_moved_out` on the source, then `item_moved_in` on the
    /// destination. Moving an item into the bin it is already in returns it
    /// unchanged and writes nothing.
    ///
    /// ## Errors
    /// - `NotFound` if the item or destination bin doesn't exist
    /// - `CapacityExceeded` if the destination is full
    pub async fn move_item(&self, item_id: &str, dest_bin_id: &str) -> DbResult<Item> {
        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let mut moving = item::fetch_required(&mut tx, item_id).await?;
        let dest = bin::fetch_required(&mut tx, dest_bin_id).await?;

        if moving.bin_id == dest.id {
            debug!(id = %item_id, bin_id = %dest.id, "Item already in destination bin");
            return Ok(moving);
        }

        let source = bin::fetch_required(&mut tx, &moving.bin_id).await?;

        let occupied = bin::count_items(&mut tx, &dest.id).await?;
        ensure_capacity(&dest, occupied)?;

        item::set_bin(&mut tx, &moving.id, &dest.id).await?;
        history::append(
            &mut tx,
            &source.id,
            &source.name,
            HistoryAction::ItemMovedOut,
            format!(
                "Item \"{}\" moved out of bin to \"{}\"",
                moving.name, dest.name
            ),
        )
        .await?;
        history::append(
            &mut tx,
            &dest.id,
            &dest.name,
            HistoryAction::ItemMovedIn,
            format!(
                "Item \"{}\" moved into bin from \"{}\"",
                moving.name, source.name
            ),
        )
        .await?;

        tx.commit().await?;

        info!(id = %item_id, from = %source.id, to = %dest.id, "Item moved");
        moving.bin_id = dest.id;
        Ok(moving)
    }

    /// Changes an item's name, type or size and records `item_modified` on
    /// its bin. Changes that leave the item as it was write nothing.
    pub async fn update_item(&self, item_id: &str, changes: ItemChanges) -> DbResult<Item> {
        let new_name = changes.name.as_deref().map(validate_item_name).transpose()?;

        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let mut target = item::fetch_required(&mut tx, item_id).await?;
        let mut changed = Vec::new();

        if let Some(name) = new_name.filter(|n| *n != target.name) {
            changed.push(format!("name \"{}\" -> \"{}\"", target.name, name));
            target.name = name;
        }

        if let Some(type_id) = changes.type_id.filter(|t| *t != target.type_id) {
            let new_type = item_type::fetch_required(&mut tx, &type_id).await?;
            changed.push(format!("type -> \"{}\"", new_type.name));
            target.type_id = type_id;
        }

        if let Some(size) = changes.size.filter(|s| *s != target.size) {
            changed.push(format!("size {} -> {}", target.size, size));
            target.size = size;
        }

        if changed.is_empty() {
            debug!(id = %item_id, "Item update changed nothing");
            return Ok(target);
        }

        let owner = bin::fetch_required(&mut tx, &target.bin_id).await?;

        item::update(&mut tx, &target).await?;
        history::append(
            &mut tx,
            &owner.id,
            &owner.name,
            HistoryAction::ItemModified,
            format!("Item \"{}\" modified: {}", target.name, changed.join(", ")),
        )
        .await?;

        tx.commit().await?;

        info!(id = %item_id, "Item updated");
        Ok(target)
    }

    /// Deletes an item and records `item_removed` on its bin.
    pub async fn delete_item(&self, item_id: &str) -> DbResult<()> {
        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;

        let doomed = item::fetch_required(&mut tx, item_id).await?;
        let owner = bin::fetch_required(&mut tx, &doomed.bin_id).await?;

        history::append(
            &mut tx,
            &owner.id,
            &owner.name,
            HistoryAction::ItemRemoved,
            format!("Item \"{}\" removed from bin", doomed.name),
        )
        .await?;
        item::delete(&mut tx, item_id).await?;

        tx.commit().await?;

        info!(id = %item_id, bin_id = %owner.id, "Item deleted");
        Ok(())
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Items grouped by type name.
    pub async fn group_by_type(&self, bin_id: Option<&str>) -> DbResult<Vec<TypeGroup>> {
        Ok(classify::group_by_type(&self.list_items(bin_id).await?))
    }

    /// Items grouped by size, Small first, empty classes omitted.
    pub async fn group_by_size(&self, bin_id: Option<&str>) -> DbResult<Vec<SizeGroup>> {
        Ok(classify::group_by_size(&self.list_items(bin_id).await?))
    }

    /// Items grouped by `"{type}_{size}"`.
    pub async fn group_by_type_and_size(
        &self,
        bin_id: Option<&str>,
    ) -> DbResult<Vec<TypeSizeGroup>> {
        Ok(classify::group_by_type_and_size(
            &self.list_items(bin_id).await?,
        ))
    }

    /// Groups items by `criterion`, scoped to one bin when `bin_id` is set.
    ///
    /// ## Errors
    /// - `NotFound` if `bin_id` names a bin that doesn't exist
    pub async fn classify(
        &self,
        criterion: Criterion,
        bin_id: Option<&str>,
    ) -> DbResult<Classification> {
        let items = self.list_items(bin_id).await?;
        debug!(%criterion, bin_id = ?bin_id, items = items.len(), "Classifying items");
        Ok(classify::classify(criterion, &items))
    }

    // =========================================================================
    // Snapshot & Recommendations
    // =========================================================================

    /// Structured snapshot of the whole catalog, read in one transaction.
    pub async fn snapshot(&self) -> DbResult<CatalogSnapshot> {
        let mut tx = self.pool.begin().await?;

        let bins = bin::list(&mut tx).await?;
        let item_types = item_type::list(&mut tx).await?;
        let items = item::list_details(&mut tx, None).await?;

        tx.commit().await?;

        Ok(CatalogSnapshot::build(&bins, &item_types, &items))
    }

    /// Asks `recommender` for `count` organization suggestions.
    ///
    /// Always returns exactly `count` entries. A failing or empty-handed
    /// recommender yields a degraded response instead of an error.
    ///
    /// ## Errors
    /// - `InvalidInput` if `count` is out of range
    /// - Store errors while building the snapshot
    pub async fn recommend(
        &self,
        recommender: &dyn Recommender,
        criterion: Criterion,
        count: usize,
    ) -> DbResult<Recommendations> {
        validate_recommendation_count(count)?;

        let snapshot = self.snapshot().await?;

        let outcome = match recommender.suggest(&snapshot, criterion, count).await {
            Ok(raw) => Recommendations::from_suggestions(criterion, raw, count),
            Err(e) => Err(CoreError::from(e)),
        };

        let recommendations = outcome.unwrap_or_else(|reason| {
            warn!(%criterion, error = %reason, "Recommender failed, returning placeholders");
            Recommendations::degraded(criterion, count, &reason)
        });

        Ok(recommendations)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// The whole audit trail in write order.
    pub async fn history(&self) -> DbResult<Vec<HistoryEntry>> {
        let mut conn = self.pool.acquire().await?;
        history::list(&mut conn, None).await
    }

    /// Entries for one bin in write order, including bins since deleted.
    pub async fn bin_history(&self, bin_id: &str) -> DbResult<Vec<HistoryEntry>> {
        let mut conn = self.pool.acquire().await?;
        history::list(&mut conn, Some(bin_id)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
