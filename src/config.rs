use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_STATIC_DIR: &str = "public/static";
const DEFAULT_SUMMARY_MIN_WORDS: usize = 50;
const DEFAULT_SUMMARY_MAX_WORDS: usize = 150;
const DEFAULT_SERVER_PORT: u16 = 5002;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Docsum server.
#[derive(Debug)]
pub struct Config {
    /// Model identifier the Ollama runtime serves summaries with.
    pub summarization_model: String,
    /// Base URL of the Ollama runtime hosting the model.
    pub ollama_url: String,
    /// Directory uploaded documents are persisted to.
    pub upload_dir: PathBuf,
    /// Directory served under `/public/static`.
    pub static_dir: PathBuf,
    /// Lower bound on generated summary length, in words.
    pub summary_min_words: usize,
    /// Upper bound on generated summary length, in words.
    pub summary_max_words: usize,
    /// Port the HTTP server binds to.
    pub server_port: u16,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let summary_min_words = load_env_optional("SUMMARY_MIN_WORDS")
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SUMMARY_MIN_WORDS".into()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_SUMMARY_MIN_WORDS);
        let summary_max_words = load_env_optional("SUMMARY_MAX_WORDS")
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SUMMARY_MAX_WORDS".into()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_SUMMARY_MAX_WORDS);
        if summary_max_words <= summary_min_words {
            return Err(ConfigError::InvalidValue("SUMMARY_MAX_WORDS".into()));
        }

        Ok(Self {
            summarization_model: load_env("SUMMARIZATION_MODEL")?,
            ollama_url: load_env_optional("OLLAMA_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            upload_dir: load_env_optional("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            static_dir: load_env_optional("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            summary_min_words,
            summary_max_words,
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        model = %config.summarization_model,
        ollama_url = %config.ollama_url,
        upload_dir = %config.upload_dir.display(),
        server_port = config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
pub(crate) fn ensure_test_config() {
    let _ = CONFIG.set(Config {
        summarization_model: "test-summarizer".into(),
        ollama_url: "http://127.0.0.1:1".into(),
        upload_dir: std::env::temp_dir().join("docsum-test-uploads"),
        static_dir: std::env::temp_dir().join("docsum-test-static"),
        summary_min_words: 5,
        summary_max_words: 25,
        server_port: 0,
    });
}
