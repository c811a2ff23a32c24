#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use knowledge_repo_rag::{AnswerGenerator, ChunkRecord, Embedder, GenerationFailure, VectorStore};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const DIM: usize = 64;

/// Bag-of-words embedder: each lower-cased word bumps one hashed bucket.
///
/// Texts sharing vocabulary end up close under cosine similarity, which is all
/// the retrieval tests need.
pub struct HashingEmbedder {
    pub calls: AtomicUsize,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; DIM];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            // FNV-1a
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in word.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x100000001b3);
            }
            v[(hash % DIM as u64) as usize] += 1.0;
        }
        v
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }
}

/// Blocks the calling thread before delegating, like a large local model.
pub struct SlowEmbedder {
    pub delay: Duration,
    pub inner: HashingEmbedder,
}

impl Embedder for SlowEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        std::thread::sleep(self.delay);
        self.inner.embed(texts)
    }

    fn dimension(&self) -> usize {
        DIM
    }
}

/// Store whose backend is unreachable.
pub struct FailingStore;

pub const STORE_FAILURE: &str = "connection refused to qdrant:6334";

#[async_trait]
impl VectorStore for FailingStore {
    fn collection(&self) -> &str {
        "knowledge_repo"
    }

    async fn ensure_collection(&self) -> Result<()> {
        Err(anyhow!(STORE_FAILURE))
    }

    async fn add(&self, _record: ChunkRecord) -> Result<()> {
        Err(anyhow!(STORE_FAILURE))
    }

    async fn query(&self, _embedding: Vec<f32>, _top_k: usize) -> Result<Vec<String>> {
        Err(anyhow!(STORE_FAILURE))
    }
}

/// Records every prompt and answers with a canned string.
pub struct RecordingGenerator {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Always fails, like a model server that is down.
pub struct FailingGenerator;

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationFailure> {
        Err(GenerationFailure::Backend("model crashed".to_string()))
    }
}

/// A PDF with one page per entry of `pages`, each page showing its text.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
