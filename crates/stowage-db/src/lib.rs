//! # stowage-db: Catalog Store for Stowage
//!
//! SQLite persistence, the mutation engine and configuration for the
//! bin-capacity catalog. Uses sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stowage Data Flow                                │
//! │                                                                         │
//! │  Driver (CLI, HTTP handler, seed binary)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stowage-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ CatalogService│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │───►│ (service.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ write gate +  │    │ 001_initial_ │  │   │
//! │  │   │ write gate    │    │ transactions  │    │ schema.sql   │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                ▼                               │   │
//! │  │                  repository::{bin, item, item_type, history}   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - TOML + environment configuration
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - `repository` - Connection-level queries for bins, items, item types and history
//! - [`service`] - Validated, audited catalog operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stowage_db::{Database, DbConfig};
//! use stowage_core::Size;
//!
//! let db = Database::new(DbConfig::new("stowage.db")).await?;
//! let catalog = db.catalog();
//!
//! let garage = catalog.create_bin("Garage", 10).await?;
//! let tools = catalog.create_item_type("Tools", None).await?;
//! catalog.add_item(&garage.id, "Hammer", &tools.id, Size::Medium).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, StowageConfig};
pub use error::{DbError, DbResult, ErrorCode};
pub use pool::{Database, DbConfig};
pub use service::CatalogService;
