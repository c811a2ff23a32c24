use crate::document::FileKind;

/// Caller handed the PDF extractor something it cannot work with.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("no file uploaded")]
    NoFile,

    #[error("file must be a PDF: {name}")]
    NotPdf { name: String },
}

/// Why a document produced no text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("text file is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("no text extractor for {0} files")]
    NoExtractor(FileKind),
}

/// Errors that abort an ingestion call.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Unsupported file format: {name}")]
    UnsupportedFormat { name: String },

    #[error("embedding failed: {0:#}")]
    Embedding(anyhow::Error),

    #[error("vector store error: {0:#}")]
    Store(anyhow::Error),
}

/// The language model did not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error("request to language model failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("language model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("language model error: {0}")]
    Backend(String),
}
