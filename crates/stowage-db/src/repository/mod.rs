//! # Repository Module
//!
//! Database repository implementations for Stowage.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  db.catalog().add_item(...)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogService (write gate + transaction, or one pooled connection)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bin::fetch(conn, id), item::insert(conn, item), ...                   │
//! │  history::append(conn, ...)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function takes `&mut SqliteConnection`, so the same call works on a
//! `Transaction` or a `PoolConnection`.

pub(crate) mod bin;
pub(crate) mod history;
pub(crate) mod item;
pub(crate) mod item_type;
