use crate::error::GenerationFailure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

/// Produces a free-text completion for a single prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Non-streaming client for Ollama's `/api/generate`.
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationFailure> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AnswerGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {} (model {}, {} prompt chars)", url, self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn request_body_disables_streaming() {
        let body = serde_json::to_value(GenerateRequest {
            model: "llama3",
            prompt: "Context:\nx\n\nQuestion: y\nAnswer:",
            stream: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3",
                "prompt": "Context:\nx\n\nQuestion: y\nAnswer:",
                "stream": false,
            })
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let generator =
            OllamaGenerator::new("http://localhost:11434/", "llama3", Duration::from_secs(5))
                .unwrap();
        assert_eq!(generator.base_url, "http://localhost:11434");
        assert_eq!(generator.model(), "llama3");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_failure() {
        let generator =
            OllamaGenerator::new("http://127.0.0.1:9", "llama3", Duration::from_secs(2)).unwrap();
        let err = generator.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerationFailure::Request(_)));
    }

    #[tokio::test]
    async fn completion_is_read_from_response_field() {
        let app = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "llama3");
                assert_eq!(body["stream"], false);
                Json(json!({ "model": "llama3", "response": "Paris", "done": true }))
            }),
        );
        let base = serve(app).await;
        let generator = OllamaGenerator::new(base, "llama3", Duration::from_secs(5)).unwrap();
        assert_eq!(generator.generate("capital?").await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
        );
        let base = serve(app).await;
        let generator = OllamaGenerator::new(base, "llama3", Duration::from_secs(5)).unwrap();
        match generator.generate("capital?").await {
            Err(GenerationFailure::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
