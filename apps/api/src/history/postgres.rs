use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::history::{HistoryStore, NewAnalysis, StoredFile};
use crate::models::analysis::AnalysisRecordRow;

/// History store backed by PostgreSQL rows and S3 file bodies.
pub struct PostgresHistoryStore {
    pool: PgPool,
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl PostgresHistoryStore {
    pub fn new(pool: PgPool, s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { pool, s3, bucket }
    }
}

#[async_trait]
impl HistoryStore for PostgresHistoryStore {
    async fn save_analysis(&self, new: NewAnalysis<'_>) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let s3_key = format!("resumes/{}/{}", id, new.filename);

        // Upload the original file first; a row without its file is worse
        // than no row at all.
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&s3_key)
            .body(ByteStream::from(new.file_bytes.to_vec()))
            .content_type(new.content_type)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        sqlx::query(
            r#"
            INSERT INTO analyses
                (id, identity, score, suggestions, filename, content_type, s3_file_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(new.identity)
        .bind(new.result.score as i32)
        .bind(&new.result.suggestions)
        .bind(new.filename)
        .bind(new.content_type)
        .bind(&s3_key)
        .execute(&self.pool)
        .await?;

        info!(
            "Stored analysis {id} for {} (score {})",
            new.identity, new.result.score
        );
        Ok(id)
    }

    async fn recent_for_identity(
        &self,
        identity: &str,
        limit: i64,
    ) -> Result<Vec<AnalysisRecordRow>> {
        Ok(sqlx::query_as::<_, AnalysisRecordRow>(
            r#"
            SELECT * FROM analyses
            WHERE identity = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(identity)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch_file(&self, record_id: Uuid) -> Result<Option<StoredFile>> {
        let row: Option<AnalysisRecordRow> =
            sqlx::query_as("SELECT * FROM analyses WHERE id = $1")
                .bind(record_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let object = match self
            .s3
            .get_object()
            .bucket(&self.bucket)
            .key(&row.s3_file_key)
            .send()
            .await
        {
            Ok(object) => object,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(anyhow::anyhow!("S3 download failed: {service_err}"));
            }
        };

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| anyhow::anyhow!("S3 body read failed: {e}"))?;

        Ok(Some(StoredFile {
            filename: row.filename,
            content_type: row.content_type,
            bytes: body.into_bytes(),
        }))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
