use anyhow::Result;
use knowledge_repo_rag::config::{Config, StoreBackend};
use knowledge_repo_rag::embedding::{Embedder, FastEmbedder};
use knowledge_repo_rag::generator::OllamaGenerator;
use knowledge_repo_rag::memory_store::MemoryStore;
use knowledge_repo_rag::qdrant_util::QdrantStore;
use knowledge_repo_rag::server::{self, AppState};
use knowledge_repo_rag::store::VectorStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let embedder = Arc::new(FastEmbedder::load(
        &config.model_dir,
        config.vector_size as usize,
    )?);
    let dimension = embedder.dimension();

    let store: Arc<dyn VectorStore> = match config.store {
        StoreBackend::Qdrant => Arc::new(QdrantStore::connect(
            &config.qdrant_url,
            config.collection.clone(),
            dimension as u64,
        )?),
        StoreBackend::Memory => Arc::new(MemoryStore::with_collection(
            config.collection.clone(),
            dimension,
        )),
    };
    store.ensure_collection().await?;

    let generator = Arc::new(OllamaGenerator::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.ollama_timeout,
    )?);
    info!("answering with model '{}' ({}-dim embeddings)", generator.model(), dimension);

    // Create app state
    let state = Arc::new(AppState {
        embedder,
        store,
        generator,
        chunk_size: config.chunk_size,
        top_k: config.top_k,
    });

    let app = server::router(state, config.max_upload_bytes);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "serving collection '{}' on http://{}",
        config.collection, config.bind_addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
