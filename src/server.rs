use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::IngestError;
use crate::generator::AnswerGenerator;
use crate::ingest;
use crate::rag;
use crate::store::VectorStore;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

pub const INGEST_SUCCESS_MESSAGE: &str = "Documents ingested successfully!";
pub const INGEST_FAILURE_MESSAGE: &str = "Failed to ingest documents. Please check file formats.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error, see server logs.";

// App state
pub struct AppState {
    pub embedder: Arc<dyn Embedder>,
    pub store: Arc<dyn VectorStore>,
    pub generator: Arc<dyn AnswerGenerator>,
    pub chunk_size: NonZeroUsize,
    pub top_k: usize,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest_documents))
        .route("/ask", post(ask))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// Handler for uploading documents
async fn ingest_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut files = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("malformed upload: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "status": "error", "message": e.body_text() })),
                );
            }
        };
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        match field.bytes().await {
            Ok(bytes) => files.push(Document::new(name, bytes.to_vec())),
            Err(e) => {
                warn!("failed to read upload {}: {}", name, e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "status": "error", "message": e.body_text() })),
                );
            }
        }
    }
    info!("received {} files for ingestion", files.len());

    match ingest::ingest_documents(
        &files,
        state.embedder.clone(),
        state.store.as_ref(),
        state.chunk_size,
    )
    .await
    {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "ingested": true,
                "message": INGEST_SUCCESS_MESSAGE,
            })),
        ),
        Ok(false) => (
            StatusCode::OK,
            Json(json!({
                "status": "error",
                "ingested": false,
                "message": INGEST_FAILURE_MESSAGE,
            })),
        ),
        Err(e @ IngestError::UnsupportedFormat { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "ingested": false,
                "message": INGEST_FAILURE_MESSAGE,
                "detail": e.to_string(),
            })),
        ),
        Err(e) => {
            error!("ingestion failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": INTERNAL_ERROR_MESSAGE })),
            )
        }
    }
}

// Handler for questions
async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<Value>)> {
    let query = payload.query.trim();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "query must not be empty" })),
        ));
    }
    let top_k = payload.top_k.unwrap_or(state.top_k);

    rag::answer_question(
        query,
        top_k,
        state.embedder.clone(),
        state.store.as_ref(),
        state.generator.as_ref(),
    )
    .await
    .map(|answer| Json(AskResponse { answer }))
    .map_err(|e| {
        error!("retrieval failed: {:#}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": INTERNAL_ERROR_MESSAGE })),
        )
    })
}
