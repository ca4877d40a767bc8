//! History store — persistence of past analyses and their source files.
//!
//! The store is an injectable trait object so the request path never touches
//! concrete database or object-storage handles; `AppState` carries an
//! `Arc<dyn HistoryStore>` constructed once at startup.

pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::analysis::scorer::AnalysisResult;
use crate::models::analysis::AnalysisRecordRow;

/// A previously uploaded file fetched back out of the store.
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Everything needed to persist one analysis.
pub struct NewAnalysis<'a> {
    pub identity: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub file_bytes: &'a [u8],
    pub result: &'a AnalysisResult,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persists a record and the original file, returning the new record id.
    async fn save_analysis(&self, new: NewAnalysis<'_>) -> Result<Uuid>;

    /// Past analyses for an identity, newest first, capped at `limit`.
    async fn recent_for_identity(
        &self,
        identity: &str,
        limit: i64,
    ) -> Result<Vec<AnalysisRecordRow>>;

    /// The originally uploaded file for a record id. `None` when the record
    /// or the stored file body is missing.
    async fn fetch_file(&self, record_id: Uuid) -> Result<Option<StoredFile>>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}
