use std::path::PathBuf;
use std::sync::Arc;

use crate::client::openai::OpenAiCompatClient;
use crate::client::CompletionClient;

pub use maumchat_types::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};

/// Settings needed to reach the completion endpoint, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Base URL or full completions URL; normalized by the factory
    pub api_url: String,
    pub model: String,
    pub verbose: bool,
    /// Directory for per-request log files; `None` disables them
    pub request_log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration for the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            verbose: false,
            request_log_dir: None,
        }
    }

    /// Fully normalized chat-completions URL
    pub fn completions_url(&self) -> String {
        normalize_api_url(&self.api_url)
    }
}

/// Client factory for creating completion clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create the streaming client described by `config`
    pub fn create(config: &ClientConfig) -> Arc<dyn CompletionClient> {
        let client = OpenAiCompatClient::new(
            config.api_key.clone(),
            config.model.clone(),
            config.completions_url(),
        )
        .with_verbose(config.verbose)
        .with_request_log_dir(config.request_log_dir.clone());

        Arc::new(client)
    }
}

/// Normalize API URL by ensuring it has the correct path for OpenAI-compatible endpoints
///
/// * `https://api.upstage.ai/v1` → `https://api.upstage.ai/v1/chat/completions`
/// * `http://localhost:8080` → `http://localhost:8080/v1/chat/completions`
/// * URLs that already name a completions path are returned as-is
pub fn normalize_api_url(url: &str) -> String {
    if url.contains("/completions") {
        return url.to_string();
    }

    let trimmed = url.trim_end_matches('/');

    let has_version_segment = trimmed
        .rsplit('/')
        .next()
        .map(is_version_segment)
        .unwrap_or(false);

    if has_version_segment {
        format!("{}/chat/completions", trimmed)
    } else if trimmed.ends_with("/chat") {
        format!("{}/completions", trimmed)
    } else {
        format!("{}/v1/chat/completions", trimmed)
    }
}

/// Matches path segments such as `v1` or `v1beta`
fn is_version_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next() == Some('v')
        && chars.next().map(|c| c.is_ascii_digit()).unwrap_or(false)
        && segment.chars().all(|c| c.is_ascii_alphanumeric())
}
