//! Remote document store client.
#![allow(dead_code)]
//!
//! Every operation returns a uniform outcome value carrying `success` plus
//! either data/id or a message — never an `Err` — so callers render status
//! strings without exception handling, and a store failure can never take
//! the in-memory resume down with it.

pub mod cache;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

pub use cache::{CachedStore, StoreCache, FRESHNESS_WINDOW};
pub use http::HttpStore;
pub use memory::MemoryStore;

// ────────────────────────────────────────────────────────────────────────────
// Outcome shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// The record's identifier; present on success, echoes the input id on a
    /// failed update.
    pub id: Option<String>,
    pub success: bool,
    pub save_ms: f64,
    pub message: String,
}

impl SaveOutcome {
    pub fn failure(id: Option<String>, save_ms: f64, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            save_ms,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub data: Option<Resume>,
    pub success: bool,
    /// True when a fresh local cache entry short-circuited the round trip.
    pub from_cache: bool,
    pub load_ms: f64,
    pub message: Option<String>,
}

impl LoadOutcome {
    pub fn failure(load_ms: f64, message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            from_cache: false,
            load_ms,
            message: Some(message.into()),
        }
    }
}

/// One row of the recent-resumes listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOutcome {
    pub records: Vec<RecentRecord>,
    pub success: bool,
    pub query_ms: f64,
    pub message: Option<String>,
}

impl RecentOutcome {
    pub fn failure(query_ms: f64, message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            success: false,
            query_ms,
            message: Some(message.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store trait
// ────────────────────────────────────────────────────────────────────────────

/// The persistence service: save/load by opaque identifier, list recent.
///
/// Identifiers are unscoped — any client may load any id. There is no
/// transactional guarantee across concurrent save/load of the same id beyond
/// "a load started after a save's resolution observes that save's data".
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Creates a new record, or merges into the existing one when `id` is
    /// supplied.
    async fn save(&self, record: &Resume, id: Option<&str>) -> SaveOutcome;

    async fn load(&self, id: &str) -> LoadOutcome;

    async fn list_recent(&self, max: usize) -> RecentOutcome;
}
