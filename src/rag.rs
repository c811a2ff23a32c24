use crate::embedding::Embedder;
use crate::generator::AnswerGenerator;
use crate::retriever;
use crate::store::VectorStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

pub const NO_CONTEXT_ANSWER: &str =
    "Sorry, I couldn't find an answer to your question in the uploaded documents.";
pub const GENERATION_FAILED_ANSWER: &str =
    "Sorry, I couldn't process your question due to an internal error.";

/// Outcome of the retrieval step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextState {
    ContextFound(String),
    NoContext,
}

impl ContextState {
    pub fn from_context(context: String) -> Self {
        if context.trim().is_empty() {
            Self::NoContext
        } else {
            Self::ContextFound(context)
        }
    }
}

pub fn build_prompt(context: &str, query: &str) -> String {
    format!("Context:\n{context}\n\nQuestion: {query}\nAnswer:")
}

/// Answer `query` from the stored chunks.
///
/// Retrieval errors propagate. A missing context or a failed generation is
/// answered with a fixed message instead.
pub async fn answer_question(
    query: &str,
    top_k: usize,
    embedder: Arc<dyn Embedder>,
    store: &dyn VectorStore,
    generator: &dyn AnswerGenerator,
) -> Result<String> {
    let context = retriever::retrieve_context(query, top_k, embedder, store).await?;
    match ContextState::from_context(context) {
        ContextState::NoContext => {
            info!("no context found for query");
            Ok(NO_CONTEXT_ANSWER.to_string())
        }
        ContextState::ContextFound(context) => {
            let prompt = build_prompt(&context, query);
            match generator.generate(&prompt).await {
                Ok(answer) => Ok(answer),
                Err(e) => {
                    error!("answer generation failed: {}", e);
                    Ok(GENERATION_FAILED_ANSWER.to_string())
                }
            }
        }
    }
}
