//! # stowage-core: Pure Business Logic for Stowage
//!
//! This crate holds the rules of the bin catalog as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stowage Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Drivers (HTTP API, admin UI, jobs)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        stowage-db: CatalogService (mutations + queries)          │   │
//! │  │        SQLite catalog store, migrations, transactions            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stowage-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │  types   │ │ capacity │ │ classify │ │ snapshot │ │recommend│ │   │
//! │  │  │ Bin/Item │ │  guard   │ │ grouping │ │  export  │ │  trait  │ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Bin, ItemType, Item, HistoryEntry, Size)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`capacity`] - Capacity guard and occupancy math
//! - [`stats`] - Per-bin statistics
//! - [`classify`] - Grouping by type, size, or both
//! - [`snapshot`] - Structured catalog snapshot
//! - [`recommend`] - Recommender capability and degraded responses
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use stowage_core::capacity::can_accept;
//! use stowage_core::Bin;
//!
//! let bin = Bin {
//!     id: "b1".to_string(),
//!     name: "Garage".to_string(),
//!     max_capacity: 2,
//!     created_at: Utc::now(),
//! };
//!
//! assert!(can_accept(&bin, 1));
//! assert!(!can_accept(&bin, 2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod capacity;
pub mod classify;
pub mod error;
pub mod recommend;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use classify::{Classification, Criterion};
pub use error::{CoreError, CoreResult, ValidationError};
pub use recommend::{RecommendError, Recommendations, Recommender};
pub use snapshot::CatalogSnapshot;
pub use stats::BinStatistics;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any display name (bins, item types, items).
pub const MAX_NAME_LEN: usize = 100;

/// Number of suggestions requested from the recommender by default.
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;

/// Upper bound on suggestions a caller may request in one call.
pub const MAX_RECOMMENDATION_COUNT: usize = 10;

/// Number of example item names listed per item type in a snapshot.
pub const SNAPSHOT_EXAMPLES_PER_TYPE: usize = 3;
