use anyhow::{bail, Context, Result};

/// Which scoring model this deployment runs. The two models are alternative
/// renditions of the same rubric and are never blended within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringModel {
    /// Weighted partial credit per criterion (canonical).
    Weighted,
    /// Flat base score plus binary keyword-group bonuses.
    Flat,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub scoring_model: ScoringModel,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            scoring_model: parse_scoring_model(
                &std::env::var("SCORING_MODEL").unwrap_or_else(|_| "weighted".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_scoring_model(raw: &str) -> Result<ScoringModel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "weighted" => Ok(ScoringModel::Weighted),
        "flat" => Ok(ScoringModel::Flat),
        other => bail!("SCORING_MODEL must be 'weighted' or 'flat', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weighted() {
        assert_eq!(
            parse_scoring_model("weighted").unwrap(),
            ScoringModel::Weighted
        );
    }

    #[test]
    fn test_parse_flat_case_insensitive() {
        assert_eq!(parse_scoring_model(" Flat ").unwrap(), ScoringModel::Flat);
    }

    #[test]
    fn test_parse_unknown_model_rejected() {
        assert!(parse_scoring_model("hybrid").is_err());
    }
}
