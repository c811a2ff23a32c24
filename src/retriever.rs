use crate::embedding::{self, Embedder};
use crate::store::VectorStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 3;

/// Text of the `top_k` chunks nearest to `query`, joined by newlines in the
/// order the store ranks them. Empty when nothing matches.
pub async fn retrieve_context(
    query: &str,
    top_k: usize,
    embedder: Arc<dyn Embedder>,
    store: &dyn VectorStore,
) -> Result<String> {
    if top_k == 0 {
        return Ok(String::new());
    }
    store.ensure_collection().await?;
    let query_embedding = embedding::embed_blocking(embedder, vec![query.to_string()])
        .await?
        .pop()
        .context("no embedding for query")?;
    let documents = store.query(query_embedding, top_k).await?;
    debug!(
        "retrieved {} chunks from '{}'",
        documents.len(),
        store.collection()
    );
    Ok(documents.join("\n"))
}
