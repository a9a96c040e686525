//! Abstractive summarization via a pretrained model hosted by an Ollama runtime.
//!
//! The client issues plain HTTP requests against the runtime's generate endpoint.
//! Decoding is pinned (zero temperature, fixed seed) so repeated calls on the
//! same input produce the same summary. Model availability is probed once at
//! startup; see [`init_summarizer`].

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while generating abstractive summaries.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// The model runtime is unreachable or the configured model is not loaded.
    #[error("summarization model unavailable: {0}")]
    ModelUnavailable(String),
    /// The input does not carry enough words to summarize.
    #[error("input below minimum summarizable length: {words} words, need {minimum}")]
    InputTooShort {
        /// Word count of the supplied input.
        words: usize,
        /// Smallest input the model is asked to summarize.
        minimum: usize,
    },
    /// The runtime accepted the request but failed to produce a summary.
    #[error("failed to generate summary: {0}")]
    GenerationFailed(String),
    /// The runtime's response could not be decoded.
    #[error("malformed model response: {0}")]
    InvalidResponse(String),
}

/// Request passed to the summarization client.
#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    /// Normalized document text to summarize.
    pub text: String,
    /// Lower bound on the summary length, in words.
    pub min_words: usize,
    /// Upper bound on the summary length, in words.
    pub max_words: usize,
}

/// Interface implemented by abstractive summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a summary of the supplied text within the requested word bounds.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizerError>;
}

/// Probe the configured Ollama runtime and hand back a ready client.
///
/// Called once at process start. The outcome is captured by the pipeline and
/// shared read-only across requests; a failure here makes every subsequent
/// upload fail with the model-unavailable error class until restart.
pub async fn init_summarizer() -> Result<Box<dyn SummarizationClient + Send + Sync>, SummarizerError>
{
    let config = get_config();
    let client = OllamaSummarizer::new(
        config.ollama_url.clone(),
        config.summarization_model.clone(),
    );
    client.probe_model().await?;
    Ok(Box::new(client))
}

/// Summarization client backed by a local Ollama runtime.
pub struct OllamaSummarizer {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizer {
    /// Build a client for the runtime at `base_url` serving `model`.
    pub fn new(base_url: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("docsum/summarizer")
            .build()
            .expect("Failed to construct reqwest::Client for summarization");
        Self {
            http,
            base_url,
            model,
        }
    }

    fn generate_endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    fn tags_endpoint(&self) -> String {
        format!("{}/api/tags", self.base_url.trim_end_matches('/'))
    }

    /// Verify the runtime is reachable and has the configured model loaded.
    pub async fn probe_model(&self) -> Result<(), SummarizerError> {
        let response = self
            .http
            .get(self.tags_endpoint())
            .send()
            .await
            .map_err(|error| {
                SummarizerError::ModelUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            return Err(SummarizerError::ModelUnavailable(format!(
                "Ollama returned {} while listing models",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await.map_err(|error| {
            SummarizerError::InvalidResponse(format!("failed to decode model list: {error}"))
        })?;

        let available = tags.models.iter().any(|entry| {
            entry.name == self.model || entry.name.split(':').next() == Some(self.model.as_str())
        });
        if !available {
            return Err(SummarizerError::ModelUnavailable(format!(
                "model '{}' is not loaded in Ollama",
                self.model
            )));
        }

        Ok(())
    }
}

fn build_prompt(text: &str, min_words: usize, max_words: usize) -> String {
    format!(
        "System: You write abstractive summaries. Paraphrase the document below into a \
         single factual paragraph of between {min_words} and {max_words} words. Output the \
         summary only, with no preamble.\n\n{text}\n"
    )
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizer {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizerError> {
        let words = request.text.split_whitespace().count();
        if words < request.min_words {
            return Err(SummarizerError::InputTooShort {
                words,
                minimum: request.min_words,
            });
        }

        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request.text, request.min_words, request.max_words),
            "stream": false,
            "options": {
                // Pinned decoding: identical input must yield identical output.
                "temperature": 0.0,
                "seed": 42,
                "num_predict": (request.max_words * 4) as u64,
            }
        });

        let response = self
            .http
            .post(self.generate_endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizerError::ModelUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizerError::ModelUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.generate_endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|error| {
            SummarizerError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(SummarizerError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, Method::POST, MockServer};

    fn client_for(server: &MockServer) -> OllamaSummarizer {
        OllamaSummarizer::new(server.base_url(), "test-summarizer".into())
    }

    fn long_input() -> String {
        "the committee reviewed quarterly findings and approved the updated budget \
         across all departments before adjourning for the season"
            .to_string()
    }

    #[tokio::test]
    async fn generates_summary_from_successful_response() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({
                    "response": "  A concise summary.  ",
                    "done": true
                }));
            })
            .await;

        let summary = client
            .generate_summary(SummarizationRequest {
                text: long_input(),
                min_words: 5,
                max_words: 25,
            })
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "A concise summary.");
    }

    #[tokio::test]
    async fn rejects_input_below_minimum_length() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        let error = client
            .generate_summary(SummarizationRequest {
                text: "far too short".into(),
                min_words: 50,
                max_words: 150,
            })
            .await
            .expect_err("short input");

        assert!(matches!(
            error,
            SummarizerError::InputTooShort { words: 3, minimum: 50 }
        ));
    }

    #[tokio::test]
    async fn surfaces_runtime_error_status() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("model crashed");
            })
            .await;

        let error = client
            .generate_summary(SummarizationRequest {
                text: long_input(),
                min_words: 5,
                max_words: 25,
            })
            .await
            .expect_err("error response");

        assert!(matches!(error, SummarizerError::GenerationFailed(message) if message.contains("500")));
    }

    #[tokio::test]
    async fn incomplete_response_is_malformed() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .json_body(json!({"response": "partial", "done": false}));
            })
            .await;

        let error = client
            .generate_summary(SummarizationRequest {
                text: long_input(),
                min_words: 5,
                max_words: 25,
            })
            .await
            .expect_err("incomplete response");

        assert!(matches!(error, SummarizerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn probe_accepts_loaded_model() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({
                    "models": [{"name": "test-summarizer:latest"}, {"name": "other"}]
                }));
            })
            .await;

        client.probe_model().await.expect("model present");
    }

    #[tokio::test]
    async fn probe_rejects_missing_model() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200)
                    .json_body(json!({"models": [{"name": "unrelated:latest"}]}));
            })
            .await;

        let error = client.probe_model().await.expect_err("model absent");
        assert!(matches!(error, SummarizerError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn probe_reports_unreachable_runtime() {
        let client = OllamaSummarizer::new("http://127.0.0.1:1".into(), "any".into());
        let error = client.probe_model().await.expect_err("unreachable");
        assert!(matches!(error, SummarizerError::ModelUnavailable(_)));
    }
}
