//! # Recommendations
//!
//! The recommendation generator is an external collaborator. This module
//! defines the capability it must provide and the response shape callers
//! always receive, even when the generator fails.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogService::recommend(recommender, criterion, count)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogSnapshot::build(...)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recommender.suggest(&snapshot, criterion, count)                      │
//! │       │                                                                 │
//! │       ├── Ok(list)  → Recommendations::from_suggestions                │
//! │       │               (trim, drop blanks, pad / truncate to count)     │
//! │       │                                                                 │
//! │       └── Err(e)    → Recommendations::degraded                        │
//! │                       (count placeholder strings, degraded = true)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::classify::Criterion;
use crate::error::CoreError;
use crate::snapshot::CatalogSnapshot;

/// Filler used when the generator returns fewer suggestions than requested.
pub const INSUFFICIENT_DATA_PLACEHOLDER: &str = "Not enough data to generate this recommendation";

// =============================================================================
// Capability
// =============================================================================

/// Failure reported by a recommender implementation.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The generator could not be reached.
    #[error("recommender unavailable: {0}")]
    Unavailable(String),

    /// The generator answered with something unusable.
    #[error("invalid recommender response: {0}")]
    InvalidResponse(String),
}

impl From<RecommendError> for CoreError {
    fn from(err: RecommendError) -> Self {
        CoreError::ExternalService(err.to_string())
    }
}

/// External generator of organization suggestions.
///
/// Implementations receive the structured snapshot and return a plain list of
/// short suggestions. Any prompt building or reply parsing happens inside the
/// implementation.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn suggest(
        &self,
        snapshot: &CatalogSnapshot,
        criterion: Criterion,
        count: usize,
    ) -> Result<Vec<String>, RecommendError>;
}

// =============================================================================
// Response
// =============================================================================

/// Suggestions returned to callers. Always holds exactly the requested count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendations {
    pub criterion: Criterion,
    pub suggestions: Vec<String>,
    /// True when the generator failed and placeholders were substituted.
    pub degraded: bool,
}

impl Recommendations {
    /// Normalizes a generator reply to exactly `count` entries.
    ///
    /// Returns `ExternalService` when nothing usable is left after trimming,
    /// so the caller degrades instead of returning only filler.
    pub fn from_suggestions(
        criterion: Criterion,
        raw: Vec<String>,
        count: usize,
    ) -> Result<Self, CoreError> {
        let mut suggestions: Vec<String> = raw
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(count)
            .collect();

        if suggestions.is_empty() && count > 0 {
            return Err(RecommendError::InvalidResponse("no suggestions returned".into()).into());
        }

        suggestions.resize(count, INSUFFICIENT_DATA_PLACEHOLDER.to_string());

        Ok(Recommendations {
            criterion,
            suggestions,
            degraded: false,
        })
    }

    /// Placeholder response used when the generator fails.
    ///
    /// The first entry carries the failure reason.
    pub fn degraded(criterion: Criterion, count: usize, reason: &CoreError) -> Self {
        let suggestions = (1..=count)
            .map(|n| {
                if n == 1 {
                    format!("Could not generate recommendation {n}: {reason}")
                } else {
                    format!("Could not generate recommendation {n}")
                }
            })
            .collect();

        Recommendations {
            criterion,
            suggestions,
            degraded: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
