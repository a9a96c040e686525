#![deny(missing_docs)]

//! Core library for the Docsum document summarization server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Plain-text extraction from uploaded documents.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
/// Upload and summary counters.
pub mod metrics;
/// Upload pipeline coordinating storage, extraction, and summarization.
pub mod pipeline;
/// Text normalization ahead of summarization.
pub mod preprocess;
/// Abstractive summarization client and adapters.
pub mod summarize;
