use crate::store::{ChunkRecord, VectorStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScalarQuantizationBuilder, SearchParamsBuilder,
    SearchPointsBuilder, SearchResponse, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{debug, info};
use uuid::Uuid;

/// Payload key holding the chunk text.
pub const TEXT_KEY: &str = "text";
/// Payload key holding the `{file_name}_{chunk_index}` chunk id.
pub const CHUNK_ID_KEY: &str = "chunk_id";

pub async fn collection_exists(qdrant_client: &Qdrant, collection_name: &str) -> Result<bool> {
    Ok(qdrant_client.collection_exists(collection_name).await?)
}

pub async fn create_collection_if_not_exists(
    qdrant_client: &Qdrant,
    collection_name: &str,
    vector_size: u64,
    distance: Distance,
) -> Result<()> {
    if collection_exists(qdrant_client, collection_name).await? {
        debug!(
            "'{}' collection already exists in Qdrant; do not create",
            collection_name
        );
    } else {
        qdrant_client
            .create_collection(
                CreateCollectionBuilder::new(collection_name)
                    .vectors_config(VectorParamsBuilder::new(vector_size, distance))
                    .quantization_config(ScalarQuantizationBuilder::default()),
            )
            .await?;
        info!("created collection '{}' in Qdrant", collection_name);
    }
    Ok(())
}

pub async fn upsert_points(
    qdrant_client: &Qdrant,
    collection_name: &str,
    points: Vec<PointStruct>,
) -> Result<()> {
    qdrant_client
        .upsert_points(UpsertPointsBuilder::new(collection_name, points).wait(true))
        .await?;
    Ok(())
}

pub async fn search_points(
    qdrant_client: &Qdrant,
    collection_name: &str,
    embedding_vec: Vec<f32>,
    limit: u64,
) -> Result<SearchResponse> {
    let search_result = qdrant_client
        .search_points(
            SearchPointsBuilder::new(collection_name, embedding_vec, limit)
                .with_payload(true)
                .params(SearchParamsBuilder::default().exact(true)),
        )
        .await?;
    Ok(search_result)
}

/// Qdrant point ids must be integers or UUIDs, so chunk ids map to a UUIDv5.
///
/// The mapping is deterministic: re-ingesting a file with the same name
/// overwrites its earlier points.
pub fn point_id(chunk_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, chunk_id.as_bytes())
}

/// [`VectorStore`] backed by a Qdrant collection with cosine distance.
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    vector_size: u64,
}

impl QdrantStore {
    pub fn connect(url: &str, collection: impl Into<String>, vector_size: u64) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .with_context(|| format!("building Qdrant client for {url}"))?;
        Ok(Self {
            client,
            collection: collection.into(),
            vector_size,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure_collection(&self) -> Result<()> {
        create_collection_if_not_exists(
            &self.client,
            &self.collection,
            self.vector_size,
            Distance::Cosine,
        )
        .await
        .with_context(|| format!("get-or-create collection '{}'", self.collection))
    }

    async fn add(&self, record: ChunkRecord) -> Result<()> {
        let mut payload = Payload::new();
        payload.insert(CHUNK_ID_KEY, record.id.clone());
        payload.insert(TEXT_KEY, record.text);
        let point = PointStruct::new(
            point_id(&record.id).to_string(),
            record.embedding,
            payload,
        );
        upsert_points(&self.client, &self.collection, vec![point])
            .await
            .with_context(|| format!("storing chunk '{}'", record.id))
    }

    async fn query(&self, embedding: Vec<f32>, top_k: usize) -> Result<Vec<String>> {
        let response = search_points(&self.client, &self.collection, embedding, top_k as u64)
            .await
            .with_context(|| format!("searching collection '{}'", self.collection))?;
        let texts = response
            .result
            .into_iter()
            .filter_map(|scored_point| {
                scored_point
                    .payload
                    .get(TEXT_KEY)
                    .and_then(|v| v.as_str())
                    .cloned()
            })
            .collect();
        Ok(texts)
    }
}
