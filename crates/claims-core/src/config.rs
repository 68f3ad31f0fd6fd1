//! Configuration module
//!
//! Environment-driven configuration with defaults suitable for local
//! development. `.env` loading is done by the binary before calling
//! `Config::from_env`.

use std::env;
use std::time::Duration;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://claims.db?mode=rwc";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_CONNECT_MAX_ATTEMPTS: u32 = 30;
const DEFAULT_DB_CONNECT_RETRY_SECS: u64 = 2;
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_DOCUMENT_SIZE_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_MAX_DOCUMENTS_PER_CLAIM: usize = 5;
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "application/pdf,image/jpeg,image/png";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Readiness gate: probe attempts before the process gives up and exits.
    pub db_connect_max_attempts: u32,
    /// Readiness gate: fixed wait between probe attempts.
    pub db_connect_retry_interval: Duration,
    /// Root directory for blob storage ("uploads/" and "staging/" live below it).
    pub upload_dir: String,
    /// Base URL prefixed to `/uploads/<key>` in document listings.
    pub public_base_url: String,
    pub max_document_size_bytes: usize,
    pub max_documents_per_claim: usize,
    pub allowed_content_types: Vec<String>,
    pub cors_origins: Vec<String>,
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let allowed_content_types = env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port: env_parsed("PORT", DEFAULT_SERVER_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_connect_max_attempts: env_parsed(
                "DB_CONNECT_MAX_ATTEMPTS",
                DEFAULT_DB_CONNECT_MAX_ATTEMPTS,
            ),
            db_connect_retry_interval: Duration::from_secs(env_parsed(
                "DB_CONNECT_RETRY_SECS",
                DEFAULT_DB_CONNECT_RETRY_SECS,
            )),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_document_size_bytes: env_parsed(
                "MAX_DOCUMENT_SIZE_BYTES",
                DEFAULT_MAX_DOCUMENT_SIZE_BYTES,
            ),
            max_documents_per_claim: env_parsed(
                "MAX_DOCUMENTS_PER_CLAIM",
                DEFAULT_MAX_DOCUMENTS_PER_CLAIM,
            ),
            allowed_content_types,
            cors_origins,
        })
    }

    /// Public URL under which a stored blob is served.
    pub fn document_url(&self, file_path: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, file_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_connect_max_attempts: DEFAULT_DB_CONNECT_MAX_ATTEMPTS,
            db_connect_retry_interval: Duration::from_secs(DEFAULT_DB_CONNECT_RETRY_SECS),
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            max_document_size_bytes: DEFAULT_MAX_DOCUMENT_SIZE_BYTES,
            max_documents_per_claim: DEFAULT_MAX_DOCUMENTS_PER_CLAIM,
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .split(',')
                .map(str::to_string)
                .collect(),
            cors_origins: vec!["*".to_string()],
        }
    }
}
