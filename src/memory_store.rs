//! In-process vector store.
//!
//! Keeps every record in memory and answers queries by brute-force cosine
//! similarity. Used by tests and by `RAG_STORE=memory` for running the service
//! without a Qdrant instance; nothing survives a restart.

use crate::store::{ChunkRecord, VectorStore, COLLECTION_NAME};
use anyhow::{ensure, Result};
use async_trait::async_trait;
use ndarray::ArrayView1;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

pub struct MemoryStore {
    collection: String,
    dimension: usize,
    records: RwLock<HashMap<String, ChunkRecord>>,
}

impl MemoryStore {
    pub fn new(dimension: usize) -> Self {
        Self::with_collection(COLLECTION_NAME, dimension)
    }

    pub fn with_collection(collection: impl Into<String>, dimension: usize) -> Self {
        Self {
            collection: collection.into(),
            dimension,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Stored chunk ids, sorted.
    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn get(&self, id: &str) -> Option<ChunkRecord> {
        self.records.read().await.get(id).cloned()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (a, b) = (ArrayView1::from(a), ArrayView1::from(b));
    let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norms == 0.0 {
        return 0.0;
    }
    a.dot(&b) / norms
}

#[async_trait]
impl VectorStore for MemoryStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn add(&self, record: ChunkRecord) -> Result<()> {
        ensure!(
            record.embedding.len() == self.dimension,
            "chunk '{}' has a {}-dimensional embedding, collection '{}' expects {}",
            record.id,
            record.embedding.len(),
            self.collection,
            self.dimension
        );
        let mut records = self.records.write().await;
        if records.insert(record.id.clone(), record).is_some() {
            debug!("replaced existing chunk in '{}'", self.collection);
        }
        Ok(())
    }

    async fn query(&self, embedding: Vec<f32>, top_k: usize) -> Result<Vec<String>> {
        ensure!(
            embedding.len() == self.dimension,
            "query embedding has {} dimensions, collection '{}' expects {}",
            embedding.len(),
            self.collection,
            self.dimension
        );
        let records = self.records.read().await;
        let mut scored: Vec<(f32, &ChunkRecord)> = records
            .values()
            .map(|record| (cosine_similarity(&embedding, &record.embedding), record))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, record)| record.text.clone())
            .collect())
    }
}
