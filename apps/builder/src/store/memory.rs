//! In-memory store, used by tests and offline runs.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::resume::Resume;
use crate::store::{LoadOutcome, RecentOutcome, RecentRecord, ResumeStore, SaveOutcome};

#[derive(Default)]
struct Shelf {
    records: HashMap<String, Resume>,
    /// Insertion order, for the recent listing.
    order: Vec<String>,
}

/// Identifier-keyed store backed by a map. Clones share the same shelf, so a
/// test can keep a handle and observe what a session persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    shelf: Arc<Mutex<Shelf>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.shelf.lock().expect("shelf lock").records.len()
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn save(&self, record: &Resume, id: Option<&str>) -> SaveOutcome {
        let start = Instant::now();
        let mut shelf = self.shelf.lock().expect("shelf lock");

        let (doc_id, message) = match id {
            Some(existing) => (existing.to_string(), "Resume updated"),
            None => (Uuid::new_v4().to_string(), "Resume saved"),
        };
        if !shelf.records.contains_key(&doc_id) {
            shelf.order.push(doc_id.clone());
        }
        shelf.records.insert(doc_id.clone(), record.clone());

        SaveOutcome {
            id: Some(doc_id),
            success: true,
            save_ms: start.elapsed().as_secs_f64() * 1000.0,
            message: message.to_string(),
        }
    }

    async fn load(&self, id: &str) -> LoadOutcome {
        let start = Instant::now();
        let shelf = self.shelf.lock().expect("shelf lock");
        match shelf.records.get(id) {
            Some(record) => LoadOutcome {
                data: Some(record.clone()),
                success: true,
                from_cache: false,
                load_ms: start.elapsed().as_secs_f64() * 1000.0,
                message: None,
            },
            None => LoadOutcome::failure(
                start.elapsed().as_secs_f64() * 1000.0,
                "Resume not found",
            ),
        }
    }

    async fn list_recent(&self, max: usize) -> RecentOutcome {
        let start = Instant::now();
        let shelf = self.shelf.lock().expect("shelf lock");
        let records = shelf
            .order
            .iter()
            .rev()
            .take(max)
            .filter_map(|id| {
                shelf.records.get(id).map(|r| RecentRecord {
                    id: id.clone(),
                    name: if r.name.is_empty() {
                        "Unnamed Resume".to_string()
                    } else {
                        r.name.clone()
                    },
                    created_at: r.created_at.clone().unwrap_or_default(),
                })
            })
            .collect();
        RecentOutcome {
            records,
            success: true,
            query_ms: start.elapsed().as_secs_f64() * 1000.0,
            message: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ops::{self, ScalarField};

    fn named(name: &str) -> Resume {
        ops::set_field(&Resume::new(), ScalarField::Name, name)
    }

    #[tokio::test]
    async fn test_save_without_id_mints_a_fresh_one() {
        let store = MemoryStore::new();
        let a = store.save(&named("Jane"), None).await;
        let b = store.save(&named("June"), None).await;
        assert!(a.success && b.success);
        let (a, b) = (a.id.unwrap(), b.id.unwrap());
        assert!(!a.is_empty());
        assert_ne!(a, b);
        assert_eq!(store.record_count(), 2);
    }

    #[tokio::test]
    async fn test_save_with_id_merges_instead_of_duplicating() {
        let store = MemoryStore::new();
        let id = store.save(&named("Jane"), None).await.id.unwrap();
        let updated = store.save(&named("Jane Q. Doe"), Some(&id)).await;
        assert!(updated.success);
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(updated.message, "Resume updated");
        assert_eq!(store.record_count(), 1, "merged, not duplicated");

        let loaded = store.load(&id).await;
        assert_eq!(loaded.data.unwrap().name, "Jane Q. Doe");
    }

    #[tokio::test]
    async fn test_load_missing_id_reports_not_found() {
        let store = MemoryStore::new();
        let outcome = store.load("missing").await;
        assert!(!outcome.success);
        assert!(outcome.data.is_none());
        assert_eq!(outcome.message.as_deref(), Some("Resume not found"));
    }

    #[tokio::test]
    async fn test_list_recent_caps_results_and_names_blanks() {
        let store = MemoryStore::new();
        for i in 0..7 {
            let r = if i == 6 { Resume::new() } else { named(&format!("R{i}")) };
            store.save(&r, None).await;
        }
        let recent = store.list_recent(5).await;
        assert!(recent.success);
        assert_eq!(recent.records.len(), 5);
        assert_eq!(recent.records[0].name, "Unnamed Resume", "newest first");
    }
}
