//! Service configuration from environment variables.
//!
//! `main` loads a `.env` file first, so every variable below can live there.

use crate::all_minilm_l6_v2;
use crate::generator::{DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use crate::retriever::DEFAULT_TOP_K;
use crate::splitter::DEFAULT_CHUNK_SIZE;
use crate::store::COLLECTION_NAME;
use anyhow::{anyhow, bail, Context, Result};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Qdrant,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "qdrant" => Ok(Self::Qdrant),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!(
                "unknown store backend '{other}' (expected qdrant or memory)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub qdrant_url: String,
    pub collection: String,
    pub model_dir: PathBuf,
    pub vector_size: u64,
    pub chunk_size: NonZeroUsize,
    pub top_k: usize,
    pub ollama_url: String,
    pub ollama_model: String,
    pub ollama_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            store: StoreBackend::Qdrant,
            qdrant_url: "http://localhost:6334".to_string(),
            collection: COLLECTION_NAME.to_string(),
            model_dir: PathBuf::from(all_minilm_l6_v2::DEFAULT_MODEL_DIR),
            vector_size: all_minilm_l6_v2::VECTOR_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_k: DEFAULT_TOP_K,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_timeout: Duration::from_secs(120),
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let config = Self {
            bind_addr: value(&lookup, "RAG_BIND_ADDR", d.bind_addr)?,
            store: value(&lookup, "RAG_STORE", d.store)?,
            qdrant_url: value(&lookup, "QDRANT_URL", d.qdrant_url)?,
            collection: value(&lookup, "RAG_COLLECTION", d.collection)?,
            model_dir: value(&lookup, "RAG_MODEL_DIR", d.model_dir)?,
            vector_size: value(&lookup, "RAG_VECTOR_SIZE", d.vector_size)?,
            chunk_size: value(&lookup, "RAG_CHUNK_SIZE", d.chunk_size)?,
            top_k: value(&lookup, "RAG_TOP_K", d.top_k)?,
            ollama_url: value(&lookup, "OLLAMA_BASE_URL", d.ollama_url)?,
            ollama_model: value(&lookup, "OLLAMA_MODEL", d.ollama_model)?,
            ollama_timeout: Duration::from_secs(value(
                &lookup,
                "OLLAMA_TIMEOUT_SECS",
                d.ollama_timeout.as_secs(),
            )?),
            max_upload_bytes: value(&lookup, "RAG_MAX_UPLOAD_BYTES", d.max_upload_bytes)?,
        };

        if config.vector_size == 0 {
            bail!("RAG_VECTOR_SIZE must be positive");
        }
        Ok(config)
    }
}

fn value<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("{key} is set but empty");
    }
    raw.parse()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("invalid value for {key}: '{raw}'"))
}
