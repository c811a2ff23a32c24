//! Retrieval-augmented question answering over uploaded documents.
//!
//! Ingestion extracts text from PDF and plain-text uploads, splits it into
//! fixed-size chunks, embeds them with a local sentence-transformer and stores
//! them in a vector collection. Questions are embedded the same way; the
//! nearest chunks become the context of a prompt sent to a language model.
//!
//! The embedder, vector store and generator are traits so the pipeline runs
//! against Qdrant and Ollama in production and against in-process stand-ins
//! in tests.

pub mod all_minilm_l6_v2;
pub mod config;
pub mod document;
pub mod embedding;
pub mod embedding_model_factory;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod ingest;
pub mod memory_store;
pub mod qdrant_util;
pub mod rag;
pub mod retriever;
pub mod server;
pub mod splitter;
pub mod store;

pub use document::{Document, FileKind};
pub use embedding::Embedder;
pub use error::{ExtractionFailure, GenerationFailure, IngestError, InvalidInput};
pub use generator::AnswerGenerator;
pub use ingest::ingest_documents;
pub use rag::answer_question;
pub use retriever::retrieve_context;
pub use store::{ChunkRecord, VectorStore};
