use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted analysis: the score and suggestions produced for an
/// identity, plus the pointer to the originally uploaded file. Rows are
/// inserted at analysis time and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRecordRow {
    pub id: Uuid,
    pub identity: String,
    pub score: i32,
    pub suggestions: Vec<String>,
    pub filename: String,
    pub content_type: String,
    pub s3_file_key: String,
    pub created_at: DateTime<Utc>,
}
