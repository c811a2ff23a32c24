use anyhow::Result;
use async_trait::async_trait;

/// Default collection addressed by both ingestion and retrieval.
pub const COLLECTION_NAME: &str = "knowledge_repo";

/// One stored triple. `id` is the `{file_name}_{chunk_index}` chunk id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    pub text: String,
}

impl ChunkRecord {
    pub fn chunk_id(file_name: &str, index: usize) -> String {
        format!("{file_name}_{index}")
    }
}

/// A named collection of chunk records answering nearest-neighbour queries.
///
/// Adding a record whose id is already present replaces it.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of the collection this handle reads and writes.
    fn collection(&self) -> &str;

    /// Create the collection unless it already exists.
    async fn ensure_collection(&self) -> Result<()>;

    async fn add(&self, record: ChunkRecord) -> Result<()>;

    /// Texts of the `top_k` records nearest to `embedding`, most similar first.
    async fn query(&self, embedding: Vec<f32>, top_k: usize) -> Result<Vec<String>>;
}
