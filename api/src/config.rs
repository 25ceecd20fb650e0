use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Which embedding backend to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Local feature-hashing embedder, no network needed
    Hashing,
    /// OpenAI-compatible `/v1/embeddings` endpoint
    Http,
}

impl FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(EmbeddingProvider::Hashing),
            "http" => Ok(EmbeddingProvider::Http),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// Base URL of the embedding service (required for `http`)
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
    /// Per-request timeout for the `http` provider
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Tokio worker threads serving requests
    pub worker_threads: usize,
    /// Directory holding one knowledge base file per tenant
    pub data_dir: PathBuf,
    /// Directory holding the front-end `index.html`
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Knowledge bases kept in memory at once
    pub kb_cache_capacity: NonZeroUsize,
    pub log_format: LogFormat,
    pub embedding: EmbeddingConfig,
}

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_WORKER_THREADS: usize = 8;
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/paraphrase-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_KB_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = parse_or(&lookup, "EMBEDDING_PROVIDER", EmbeddingProvider::Hashing)?;
        let url = lookup("EMBEDDING_URL").filter(|u| !u.trim().is_empty());
        if provider == EmbeddingProvider::Http && url.is_none() {
            return Err(ConfigError::Missing("EMBEDDING_URL"));
        }

        let worker_threads = parse_or(&lookup, "WORKER_THREADS", DEFAULT_WORKER_THREADS)?;
        if worker_threads == 0 {
            return Err(ConfigError::Invalid {
                key: "WORKER_THREADS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let dimensions = parse_or(&lookup, "EMBEDDING_DIMENSIONS", DEFAULT_EMBEDDING_DIMENSIONS)?;
        if dimensions == 0 {
            return Err(ConfigError::Invalid {
                key: "EMBEDDING_DIMENSIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let kb_cache_capacity = NonZeroUsize::new(parse_or(
            &lookup,
            "KB_CACHE_CAPACITY",
            DEFAULT_KB_CACHE_CAPACITY,
        )?)
        .ok_or_else(|| ConfigError::Invalid {
            key: "KB_CACHE_CAPACITY",
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        })?;

        let timeout_secs = parse_or(
            &lookup,
            "EMBEDDING_TIMEOUT_SECS",
            DEFAULT_EMBEDDING_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "EMBEDDING_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            worker_threads,
            data_dir: lookup("VECTOR_DB_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("vector_dbs")),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            kb_cache_capacity,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?,
            embedding: EmbeddingConfig {
                provider,
                url,
                api_key: lookup("EMBEDDING_API_KEY").filter(|k| !k.is_empty()),
                model: lookup("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                dimensions,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
