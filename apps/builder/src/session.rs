//! Editing-session state around the remote store.
#![allow(dead_code)]
//!
//! Holds the live resume, its remote identifier, the user-facing status
//! string, save/load timing metrics, the recent-resume list, and the
//! advisory online flag. The in-memory resume is never lost on a persistence
//! failure — outcomes only ever update status text.

use chrono::Utc;
use tracing::warn;

use crate::models::resume::Resume;
use crate::store::{RecentRecord, ResumeStore};

/// Timings of the most recent save and load, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerfMetrics {
    pub save_ms: f64,
    pub load_ms: f64,
}

pub struct EditorSession<S> {
    resume: Resume,
    resume_id: Option<String>,
    status: Option<String>,
    metrics: PerfMetrics,
    online: bool,
    recent: Vec<RecentRecord>,
    store: S,
}

impl<S: ResumeStore> EditorSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            resume: Resume::new(),
            resume_id: None,
            status: None,
            metrics: PerfMetrics::default(),
            online: true,
            recent: Vec::new(),
            store,
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    /// Replaces the working resume (the editing UI applies model operations
    /// and hands back the result).
    pub fn replace_resume(&mut self, resume: Resume) {
        self.resume = resume;
    }

    pub fn resume_id(&self) -> Option<&str> {
        self.resume_id.as_deref()
    }

    /// Continues editing an existing remote record: subsequent saves merge
    /// into `id` instead of creating a new document.
    pub fn adopt_remote_id(&mut self, id: String) {
        self.resume_id = Some(id);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn metrics(&self) -> PerfMetrics {
        self.metrics
    }

    pub fn recent(&self) -> &[RecentRecord] {
        &self.recent
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Network status change. Advisory only: it gates the save button, not
    /// the persistence layer.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        self.status = Some(if online {
            "Network connection restored".to_string()
        } else {
            "Currently in offline mode. Changes will sync when network is restored".to_string()
        });
    }

    /// Saves the working resume: stamps `updatedAt` (and `createdAt` when
    /// absent), creates or merges by the session's id, and records the
    /// returned id for subsequent saves. Returns whether the save succeeded.
    pub async fn save_to_cloud(&mut self) -> bool {
        if !self.online {
            self.status = Some("Cannot save in offline mode".to_string());
            return false;
        }
        self.status = Some("Saving...".to_string());

        let now = Utc::now().to_rfc3339();
        let mut record = self.resume.clone();
        record.updated_at = Some(now.clone());
        if record.created_at.is_none() {
            record.created_at = Some(now);
        }

        let outcome = self.store.save(&record, self.resume_id.as_deref()).await;
        if outcome.success {
            self.resume = record;
            self.resume_id = outcome.id.clone();
            self.metrics.save_ms = outcome.save_ms;
            self.status = Some(format!(
                "Save successful! Resume ID: {} ({:.0}ms)",
                outcome.id.as_deref().unwrap_or(""),
                outcome.save_ms
            ));
            self.refresh_recent(5).await;
            true
        } else {
            self.status = Some(format!("Save failed: {}", outcome.message));
            false
        }
    }

    /// Loads a record by id, reporting cache/cloud provenance and timing.
    pub async fn load_from_cloud(&mut self, id: &str) -> bool {
        if id.trim().is_empty() {
            self.status = Some("Please enter a valid Resume ID".to_string());
            return false;
        }
        self.status = Some("Loading...".to_string());

        let outcome = self.store.load(id).await;
        match outcome.data {
            Some(mut data) if outcome.success => {
                data.normalize_section_order();
                self.resume = data;
                self.resume_id = Some(id.to_string());
                self.metrics.load_ms = outcome.load_ms;
                let source = if outcome.from_cache {
                    "from local cache"
                } else {
                    "from cloud"
                };
                self.status = Some(format!(
                    "Load successful! {source} ({:.0}ms)",
                    outcome.load_ms
                ));
                true
            }
            _ => {
                self.status = Some(format!(
                    "Load failed: {}",
                    outcome
                        .message
                        .unwrap_or_else(|| "Resume not found".to_string())
                ));
                false
            }
        }
    }

    /// Loads one of the recent resumes (selected from the listing).
    pub async fn load_by_id(&mut self, id: &str) -> bool {
        self.resume_id = Some(id.to_string());
        self.status = Some("Loading...".to_string());

        let outcome = self.store.load(id).await;
        match outcome.data {
            Some(mut data) if outcome.success => {
                data.normalize_section_order();
                self.resume = data;
                self.metrics.load_ms = outcome.load_ms;
                self.status = Some(format!("Load successful! ({:.0}ms)", outcome.load_ms));
                true
            }
            _ => {
                self.status = Some(format!(
                    "Load failed: {}",
                    outcome
                        .message
                        .unwrap_or_else(|| "Resume not found".to_string())
                ));
                false
            }
        }
    }

    /// Refreshes the recent-resume listing. Failures keep the previous list.
    pub async fn refresh_recent(&mut self, max: usize) {
        let outcome = self.store.list_recent(max).await;
        if outcome.success {
            self.recent = outcome.records;
        } else if let Some(message) = outcome.message {
            warn!("Error fetching recent resumes: {message}");
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
    use crate::store::{CachedStore, MemoryStore};

    fn session() -> EditorSession<CachedStore<MemoryStore>> {
        EditorSession::new(CachedStore::new(MemoryStore::new()))
    }

    fn name_session(name: &str) -> EditorSession<CachedStore<MemoryStore>> {
        let mut s = session();
        let renamed = ops::set_field(s.resume(), ScalarField::Name, name);
        s.replace_resume(renamed);
        s
    }

    #[tokio::test]
    async fn test_first_save_mints_id_and_stamps_timestamps() {
        let mut s = name_session("Jane Doe");
        assert!(s.save_to_cloud().await);

        let id = s.resume_id().expect("id recorded").to_string();
        assert!(!id.is_empty());
        assert!(s.resume().updated_at.is_some());
        assert!(s.resume().created_at.is_some());
        assert!(s.status().unwrap().starts_with("Save successful! Resume ID:"));
        assert_eq!(s.recent().len(), 1, "recent list refreshed after save");
    }

    #[tokio::test]
    async fn test_second_save_merges_into_same_record() {
        let mut s = name_session("Jane");
        s.save_to_cloud().await;
        let first_id = s.resume_id().unwrap().to_string();

        let renamed = ops::set_field(s.resume(), ScalarField::Name, "Jane Q. Doe");
        s.replace_resume(renamed);
        s.save_to_cloud().await;

        assert_eq!(s.resume_id(), Some(first_id.as_str()), "same id reused");
        assert_eq!(s.store().inner().record_count(), 1, "no duplicate record");

        // A load started after the save resolves observes that save's data.
        let mut reader = EditorSession::new(s.store().inner().clone());
        assert!(reader.load_from_cloud(&first_id).await);
        assert_eq!(reader.resume().name, "Jane Q. Doe");
    }

    #[tokio::test]
    async fn test_load_reports_cache_provenance() {
        let mut s = name_session("Jane");
        s.save_to_cloud().await;
        let id = s.resume_id().unwrap().to_string();

        // The save primed the session's cache, so this load is local.
        assert!(s.load_from_cloud(&id).await);
        assert!(s.status().unwrap().contains("from local cache"));

        // A different session with a cold cache goes to the cloud.
        let mut cold = EditorSession::new(CachedStore::new(s.store().inner().clone()));
        assert!(cold.load_from_cloud(&id).await);
        assert!(cold.status().unwrap().contains("from cloud"));
    }

    #[tokio::test]
    async fn test_load_blank_id_is_rejected_before_any_round_trip() {
        let mut s = session();
        assert!(!s.load_from_cloud("   ").await);
        assert_eq!(s.status(), Some("Please enter a valid Resume ID"));
    }

    #[tokio::test]
    async fn test_load_missing_id_keeps_working_resume() {
        let mut s = name_session("Jane");
        assert!(!s.load_from_cloud("no-such-id").await);
        assert_eq!(s.status(), Some("Load failed: Resume not found"));
        assert_eq!(s.resume().name, "Jane", "in-memory model preserved");
    }

    #[tokio::test]
    async fn test_offline_save_refused_with_status() {
        let mut s = name_session("Jane");
        s.set_online(false);
        assert!(!s.save_to_cloud().await);
        assert_eq!(s.status(), Some("Cannot save in offline mode"));
        assert!(s.resume_id().is_none());
    }

    #[tokio::test]
    async fn test_online_transitions_produce_network_status_messages() {
        let mut s = session();
        s.set_online(false);
        assert!(s.status().unwrap().contains("offline mode"));
        s.set_online(true);
        assert_eq!(s.status(), Some("Network connection restored"));
    }

    #[tokio::test]
    async fn test_load_by_id_selects_from_recent() {
        let mut writer = name_session("Jane");
        writer.save_to_cloud().await;
        let id = writer.resume_id().unwrap().to_string();

        let mut s = EditorSession::new(CachedStore::new(writer.store().inner().clone()));
        s.refresh_recent(5).await;
        assert_eq!(s.recent().len(), 1);
        let picked = s.recent()[0].id.clone();
        assert_eq!(picked, id);

        assert!(s.load_by_id(&picked).await);
        assert_eq!(s.resume().name, "Jane");
        assert!(s.status().unwrap().starts_with("Load successful!"));
    }
}
