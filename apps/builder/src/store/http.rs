//! HTTP client for the remote document store.
#![allow(dead_code)]
//!
//! Service contract: `POST {base}/{collection}` creates a record and returns
//! `{"id": "..."}`; `PATCH {base}/{collection}/{id}` merges into an existing
//! record; `GET {base}/{collection}/{id}` returns the document (404 when
//! absent); `GET {base}/{collection}?limit=n` lists recent records.
//!
//! Failures never propagate as errors — they come back as outcomes with
//! `success: false` and the underlying message, logged here.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::error;

use crate::config::Config;
use crate::models::resume::Resume;
use crate::store::{LoadOutcome, RecentOutcome, RecentRecord, ResumeStore, SaveOutcome};

pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct SavedDoc {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RecentResponse {
    records: Vec<RecentRecord>,
}

impl HttpStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.store_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            collection: config.store_collection.clone(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    fn doc_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, id)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[async_trait]
impl ResumeStore for HttpStore {
    async fn save(&self, record: &Resume, id: Option<&str>) -> SaveOutcome {
        let start = Instant::now();

        let result = match id {
            Some(existing) => self
                .client
                .patch(self.doc_url(existing))
                .json(record)
                .send()
                .await,
            None => self
                .client
                .post(self.collection_url())
                .json(record)
                .send()
                .await,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Error saving resume: {e}");
                return SaveOutcome::failure(
                    id.map(String::from),
                    elapsed_ms(start),
                    format!("Save failed: {e}"),
                );
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            error!("Error saving resume: store returned {status}");
            return SaveOutcome::failure(
                id.map(String::from),
                elapsed_ms(start),
                format!("Save failed: store returned {status}"),
            );
        }

        let (doc_id, message) = match id {
            Some(existing) => (existing.to_string(), "Resume updated"),
            None => match response.json::<SavedDoc>().await {
                Ok(doc) => (doc.id, "Resume saved"),
                Err(e) => {
                    error!("Error saving resume: malformed id response: {e}");
                    return SaveOutcome::failure(
                        None,
                        elapsed_ms(start),
                        format!("Save failed: {e}"),
                    );
                }
            },
        };

        SaveOutcome {
            id: Some(doc_id),
            success: true,
            save_ms: elapsed_ms(start),
            message: message.to_string(),
        }
    }

    async fn load(&self, id: &str) -> LoadOutcome {
        let start = Instant::now();

        let response = match self.client.get(self.doc_url(id)).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error loading resume: {e}");
                return LoadOutcome::failure(elapsed_ms(start), format!("Load failed: {e}"));
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return LoadOutcome::failure(elapsed_ms(start), "Resume not found");
        }
        if !response.status().is_success() {
            let status = response.status();
            error!("Error loading resume: store returned {status}");
            return LoadOutcome::failure(
                elapsed_ms(start),
                format!("Load failed: store returned {status}"),
            );
        }

        match response.json::<Resume>().await {
            Ok(mut data) => {
                data.normalize_section_order();
                LoadOutcome {
                    data: Some(data),
                    success: true,
                    from_cache: false,
                    load_ms: elapsed_ms(start),
                    message: None,
                }
            }
            Err(e) => {
                error!("Error loading resume: malformed document: {e}");
                LoadOutcome::failure(elapsed_ms(start), format!("Load failed: {e}"))
            }
        }
    }

    async fn list_recent(&self, max: usize) -> RecentOutcome {
        let start = Instant::now();

        let result = self
            .client
            .get(self.collection_url())
            .query(&[("limit", max)])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Error getting recent resumes: {e}");
                return RecentOutcome::failure(elapsed_ms(start), format!("Query failed: {e}"));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            error!("Error getting recent resumes: store returned {status}");
            return RecentOutcome::failure(
                elapsed_ms(start),
                format!("Query failed: store returned {status}"),
            );
        }

        match response.json::<RecentResponse>().await {
            Ok(listing) => RecentOutcome {
                records: listing.records,
                success: true,
                query_ms: elapsed_ms(start),
                message: None,
            },
            Err(e) => {
                error!("Error getting recent resumes: malformed listing: {e}");
                RecentOutcome::failure(elapsed_ms(start), format!("Query failed: {e}"))
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_store() -> HttpStore {
        let config = Config {
            // Nothing listens on port 9 locally; connections fail fast.
            store_base_url: "http://127.0.0.1:9".to_string(),
            store_collection: "resumes".to_string(),
            store_timeout_secs: 1,
        };
        HttpStore::new(&config).expect("client builds")
    }

    #[test]
    fn test_urls_compose_without_double_slashes() {
        let config = Config {
            store_base_url: "http://store.local/v1/".to_string(),
            store_collection: "resumes".to_string(),
            store_timeout_secs: 1,
        };
        let store = HttpStore::new(&config).unwrap();
        assert_eq!(store.collection_url(), "http://store.local/v1/resumes");
        assert_eq!(store.doc_url("abc"), "http://store.local/v1/resumes/abc");
    }

    #[tokio::test]
    async fn test_save_failure_returns_outcome_not_error() {
        let store = unreachable_store();
        let outcome = store.save(&Resume::new(), None).await;
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Save failed:"));
        assert!(outcome.id.is_none());
    }

    #[tokio::test]
    async fn test_failed_update_echoes_the_input_id() {
        let store = unreachable_store();
        let outcome = store.save(&Resume::new(), Some("keep-me")).await;
        assert!(!outcome.success);
        assert_eq!(outcome.id.as_deref(), Some("keep-me"));
    }

    #[tokio::test]
    async fn test_load_failure_returns_outcome_not_error() {
        let store = unreachable_store();
        let outcome = store.load("abc").await;
        assert!(!outcome.success);
        assert!(outcome.data.is_none());
        assert!(outcome.message.unwrap().starts_with("Load failed:"));
    }

    #[tokio::test]
    async fn test_list_recent_failure_returns_empty_listing() {
        let store = unreachable_store();
        let outcome = store.list_recent(5).await;
        assert!(!outcome.success);
        assert!(outcome.records.is_empty());
    }
}
