use anyhow::{Context, Result};
use chrono::NaiveTime;
use tracing::warn;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_S3_REGION: &str = "nyc3";

/// Connection details for the S3-compatible bucket PDFs are published to.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
}

/// Log output format, picked from `ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
///
/// Collaborator credentials are optional so the service can still boot and
/// report itself as degraded on `/health` instead of refusing to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub serpapi_api_key: Option<String>,
    pub serpapi_base_url: String,
    /// `None` unless every S3 variable is set.
    pub storage: Option<StorageConfig>,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
    /// Daily batch trigger, UTC.
    pub batch_schedule_time: NaiveTime,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let storage = match (
            get("S3_ENDPOINT_URL"),
            get("S3_ACCESS_KEY_ID"),
            get("S3_SECRET_ACCESS_KEY"),
            get("S3_BUCKET_NAME"),
        ) {
            (Some(endpoint_url), Some(access_key_id), Some(secret_access_key), Some(bucket)) => {
                Some(StorageConfig {
                    endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
                    access_key_id,
                    secret_access_key,
                    bucket,
                    region: get("S3_REGION_NAME").unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
                })
            }
            (None, None, None, None) => None,
            _ => {
                warn!("S3 configuration is incomplete; PDF uploads are disabled");
                None
            }
        };

        let log_format = match get("ENVIRONMENT")
            .unwrap_or_else(|| "dev".to_string())
            .to_lowercase()
            .as_str()
        {
            "dev" | "development" | "local" => LogFormat::Pretty,
            _ => LogFormat::Json,
        };

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            serpapi_api_key: get("SERPAPI_API_KEY"),
            serpapi_base_url: get("SERPAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SERPAPI_BASE_URL.to_string()),
            storage,
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format,
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            batch_schedule_time: NaiveTime::parse_from_str(
                &get("BATCH_SCHEDULE_TIME").unwrap_or_else(|| "09:00".to_string()),
                "%H:%M",
            )
            .context("BATCH_SCHEDULE_TIME must look like HH:MM")?,
        })
    }
}
