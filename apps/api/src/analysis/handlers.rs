use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{extract_text, FileKind};
use crate::history::NewAnalysis;
use crate::models::analysis::AnalysisRecordRow;
use crate::state::AppState;

/// Upload cap enforced per file; the router's body limit backstops the
/// whole request.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_IDENTITY: &str = "anonymous@example.com";
const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub score: u32,
    pub suggestions: Vec<String>,
    pub file_processed: String,
    pub analysis_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<Uuid>,
}

/// POST /analyze
///
/// Multipart form: file field `resume`, optional text field `user_email`.
/// Persistence is best-effort — a store failure only omits `record_id`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<(String, String, Bytes)> = None;
    let mut identity = DEFAULT_IDENTITY.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("multipart read failed: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "resume" => {
                let raw_name = field.file_name().unwrap_or_default().to_string();
                if raw_name.is_empty() {
                    return Err(AppError::NoFileProvided("No file selected".to_string()));
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("upload read failed: {e}")))?;
                upload = Some((sanitize_filename(&raw_name), content_type, bytes));
            }
            "user_email" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("field read failed: {e}")))?;
                let value = value.trim().to_string();
                if !value.is_empty() {
                    identity = value;
                }
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) =
        upload.ok_or_else(|| AppError::NoFileProvided("No resume file provided".to_string()))?;

    let kind = FileKind::from_filename(&filename).ok_or_else(|| {
        AppError::InvalidFileType(
            "Invalid file type. Only PDF, DOC, DOCX, and TXT files are allowed".to_string(),
        )
    })?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge {
            limit_bytes: MAX_UPLOAD_BYTES,
        });
    }

    let text =
        extract_text(&bytes, kind).map_err(|e| AppError::ExtractionFailed(e.to_string()))?;

    let result = state.scorer.score(&text);

    let record_id = match state
        .store
        .save_analysis(NewAnalysis {
            identity: &identity,
            filename: &filename,
            content_type: &content_type,
            file_bytes: &bytes,
            result: &result,
        })
        .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("History persistence failed, continuing without record id: {e:#}");
            None
        }
    };

    info!(
        "Resume analyzed: {filename} ({}), score {}",
        kind.as_str(),
        result.score
    );

    Ok(Json(AnalyzeResponse {
        score: result.score,
        suggestions: result.suggestions,
        file_processed: filename,
        analysis_date: Utc::now().to_rfc3339(),
        record_id,
    }))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct HistoryEntry {
    pub record_id: Uuid,
    pub score: i32,
    pub suggestions: Vec<String>,
    pub file_processed: String,
    pub analysis_date: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
    pub total_count: usize,
}

/// GET /history/:identity?limit=N
///
/// Newest first, default limit 10. An identity with no records gets an
/// empty list, not a 404.
pub async fn handle_history(
    State(state): State<AppState>,
    Path(identity): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 100);
    let rows = state
        .store
        .recent_for_identity(&identity, limit)
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("{e:#}")))?;

    let history: Vec<HistoryEntry> = rows.into_iter().map(HistoryEntry::from).collect();
    let total_count = history.len();

    Ok(Json(HistoryResponse {
        success: true,
        history,
        total_count,
    }))
}

impl From<AnalysisRecordRow> for HistoryEntry {
    fn from(row: AnalysisRecordRow) -> Self {
        HistoryEntry {
            record_id: row.id,
            score: row.score,
            suggestions: row.suggestions,
            file_processed: row.filename,
            analysis_date: row.created_at.to_rfc3339(),
        }
    }
}

/// GET /download/:record_id
///
/// Streams back the originally uploaded file with its stored content type.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let file = state
        .store
        .fetch_file(record_id)
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("{e:#}")))?
        .ok_or_else(|| AppError::NotFound(format!("No stored file for record {record_id}")))?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];
    Ok((headers, file.bytes).into_response())
}

/// Reduces an upload filename to its final component with a conservative
/// character set, the way the service has always stored names.
fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(['_', '.']).to_string();
    if trimmed.is_empty() {
        "resume".to_string()
    } else {
        trimmed
    }
}
