//! Upload pipeline coordinating persistence, extraction, normalization, and
//! summarization.
//!
//! The pipeline owns the long-lived summarizer handle and the metrics registry
//! so the HTTP surface stays a thin routing layer. Construct the pipeline once
//! near process start and share it through an `Arc`; the summarizer
//! initialization outcome is captured at construction and checked on every
//! request rather than probed again.

use crate::config::get_config;
use crate::extract::{self, DocumentFormat, ExtractError};
use crate::metrics::{MetricsSnapshot, UploadMetrics};
use crate::preprocess::{self, PreprocessError};
use crate::summarize::{
    self, SummarizationClient, SummarizationRequest, SummarizerError,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors emitted by the upload pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded bytes could not be persisted to the upload directory.
    #[error("Failed to store upload at {path}: {source}")]
    Storage {
        /// Destination path of the failed write.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Extraction step failed to produce plain text.
    #[error("Failed to extract document text: {0}")]
    Extract(#[from] ExtractError),
    /// Normalization step rejected the extracted text.
    #[error("Failed to preprocess document text: {0}")]
    Preprocess(#[from] PreprocessError),
    /// The summarization model never became available at startup.
    #[error("Summarization model unavailable: {0}")]
    ModelUnavailable(String),
    /// Summary generation failed at request time.
    #[error("Failed to generate summary: {0}")]
    Summarize(#[from] SummarizerError),
}

/// Terminal artifact of a successful upload.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Generated abstractive summary.
    pub summary: String,
    /// Word count of the summary.
    pub words: usize,
}

/// Abstraction over the upload pipeline used by the HTTP surface.
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    /// Persist an upload, extract its text, normalize it, and summarize it.
    async fn summarize_upload(
        &self,
        filename: &str,
        format: DocumentFormat,
        bytes: Vec<u8>,
    ) -> Result<SummaryOutcome, PipelineError>;

    /// Whether the summarization model initialized successfully at startup.
    fn model_ready(&self) -> bool;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates the full upload pipeline: persist, extract, preprocess, summarize.
pub struct UploadPipeline {
    summarizer: Result<Box<dyn SummarizationClient + Send + Sync>, SummarizerError>,
    metrics: UploadMetrics,
}

impl UploadPipeline {
    /// Build the pipeline, probing the summarization runtime once.
    ///
    /// A probe failure is captured rather than aborting startup: the service
    /// still serves its health and static surfaces, and every upload fails
    /// with the model-unavailable error class until restart.
    pub async fn new() -> Self {
        let summarizer = summarize::init_summarizer().await;
        match &summarizer {
            Ok(_) => tracing::info!(
                model = %get_config().summarization_model,
                "Summarization model ready"
            ),
            Err(error) => tracing::warn!(
                %error,
                "Summarization model unavailable; uploads will fail until restart"
            ),
        }
        Self::with_summarizer(summarizer)
    }

    fn with_summarizer(
        summarizer: Result<Box<dyn SummarizationClient + Send + Sync>, SummarizerError>,
    ) -> Self {
        Self {
            summarizer,
            metrics: UploadMetrics::new(),
        }
    }

    /// Write uploaded bytes under the configured upload directory, keyed by the
    /// sanitized original filename (path components stripped). Uploads are kept
    /// after processing.
    async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, PipelineError> {
        let upload_dir = &get_config().upload_dir;
        let name = Path::new(filename)
            .file_name()
            .unwrap_or_else(|| filename.as_ref());
        let destination = upload_dir.join(name);

        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|source| PipelineError::Storage {
                path: upload_dir.display().to_string(),
                source,
            })?;
        tokio::fs::write(&destination, bytes)
            .await
            .map_err(|source| PipelineError::Storage {
                path: destination.display().to_string(),
                source,
            })?;

        Ok(destination)
    }
}

#[async_trait]
impl SummarizeApi for UploadPipeline {
    async fn summarize_upload(
        &self,
        filename: &str,
        format: DocumentFormat,
        bytes: Vec<u8>,
    ) -> Result<SummaryOutcome, PipelineError> {
        self.metrics.record_upload();
        let config = get_config();

        let saved_path = self.persist(filename, &bytes).await?;
        let extracted = extract::extract_text(&saved_path, format)?;
        let normalized = preprocess::normalize(&extracted)?;

        let client = self
            .summarizer
            .as_ref()
            .map_err(|error| PipelineError::ModelUnavailable(error.to_string()))?;
        let summary = client
            .generate_summary(SummarizationRequest {
                text: normalized,
                min_words: config.summary_min_words,
                max_words: config.summary_max_words,
            })
            .await?;

        let words = summary.split_whitespace().count();
        self.metrics.record_summary(words as u64);
        tracing::info!(
            file = %saved_path.display(),
            format = ?format,
            summary_words = words,
            "Upload summarized"
        );

        Ok(SummaryOutcome { summary, words })
    }

    fn model_ready(&self) -> bool {
        self.summarizer.is_ok()
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
