use crate::embedding_model_factory;
use anyhow::{bail, ensure, Context, Result};
use fastembed::TextEmbedding;
use std::path::Path;
use std::sync::Arc;

/// Maps a batch of texts to fixed-dimension vectors.
///
/// Ingestion and retrieval must share one model identity, otherwise the
/// similarity scores are meaningless.
pub trait Embedder: Send + Sync {
    /// Embed every text, one vector per input, in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    fn dimension(&self) -> usize;
}

/// Run `embedder` on the blocking pool so model inference does not stall the
/// async workers, then check one vector of the right dimension came back per text.
pub async fn embed_blocking(
    embedder: Arc<dyn Embedder>,
    texts: Vec<String>,
) -> Result<Vec<Vec<f32>>> {
    let expected = texts.len();
    let dimension = embedder.dimension();
    let embeddings = tokio::task::spawn_blocking(move || {
        let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
        embedder.embed(&texts)
    })
    .await
    .context("embedding task failed")??;

    ensure!(
        embeddings.len() == expected,
        "embedder returned {} vectors for {} texts",
        embeddings.len(),
        expected
    );
    if let Some(bad) = embeddings.iter().find(|e| e.len() != dimension) {
        bail!(
            "embedder produced a {}-dimensional vector, expected {}",
            bad.len(),
            dimension
        );
    }
    Ok(embeddings)
}

/// Local ONNX sentence-transformer served through fastembed.
pub struct FastEmbedder {
    model: TextEmbedding,
    dimension: usize,
}

impl FastEmbedder {
    pub fn load(model_dir: &Path, dimension: usize) -> Result<Self> {
        Ok(Self {
            model: embedding_model_factory::get_model(model_dir)?,
            dimension,
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.model.embed(texts.to_vec(), None)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
