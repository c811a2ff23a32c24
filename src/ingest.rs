use crate::document::Document;
use crate::embedding::{self, Embedder};
use crate::error::IngestError;
use crate::extractor;
use crate::splitter;
use crate::store::{ChunkRecord, VectorStore};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ingest `files` into `store`.
///
/// Every file's extension is validated before any work starts; one unsupported
/// file fails the whole batch. Files that yield no text are skipped. Returns
/// whether at least one chunk was stored.
pub async fn ingest_documents(
    files: &[Document],
    embedder: Arc<dyn Embedder>,
    store: &dyn VectorStore,
    chunk_size: NonZeroUsize,
) -> Result<bool, IngestError> {
    if let Some(file) = files.iter().find(|file| !file.is_supported()) {
        return Err(IngestError::UnsupportedFormat {
            name: file.name.clone(),
        });
    }
    if files.is_empty() {
        return Ok(false);
    }

    store.ensure_collection().await.map_err(IngestError::Store)?;

    let mut ingested = false;
    for file in files {
        let document = file.clone();
        let extracted =
            tokio::task::spawn_blocking(move || extractor::extract_text(&document)).await;
        let text = match extracted {
            Ok(Ok(text)) if !text.is_empty() => text,
            Ok(Ok(_)) => {
                warn!("{}: no text extracted, skipping", file.name);
                continue;
            }
            Ok(Err(e)) => {
                warn!("{}: {}, skipping", file.name, e);
                continue;
            }
            Err(e) => {
                warn!("{}: extraction task failed: {}, skipping", file.name, e);
                continue;
            }
        };

        let chunks: Vec<String> = splitter::split(&text, chunk_size)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let embeddings = embedding::embed_blocking(embedder.clone(), chunks.clone())
            .await
            .map_err(IngestError::Embedding)?;

        let count = chunks.len();
        for (i, (chunk, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
            let record = ChunkRecord {
                id: ChunkRecord::chunk_id(&file.name, i),
                embedding,
                text: chunk,
            };
            debug!("storing {}", record.id);
            store.add(record).await.map_err(IngestError::Store)?;
        }
        info!(
            "{}: stored {} chunks in '{}'",
            file.name,
            count,
            store.collection()
        );
        ingested = true;
    }
    Ok(ingested)
}
