use async_trait::async_trait;
use futures::Stream;
use maumchat_types::Message;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::error::EndpointFailure;

pub mod openai;
pub mod sse;

/// Chat completion request body (OpenAI-compatible format)
///
/// Only role and content of each message go over the wire.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

/// One increment of a streamed reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingChunk {
    /// Text fragment carried by this chunk, if any
    pub delta: Option<String>,
    pub finish_reason: Option<String>,
}

impl StreamingChunk {
    pub fn text(delta: impl Into<String>) -> Self {
        Self {
            delta: Some(delta.into()),
            finish_reason: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Finite, forward-only sequence of chunks; ends on exhaustion or after the first error
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamingChunk, EndpointFailure>> + Send>>;

/// Completion endpoint seen from the chat session
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Open a streaming completion over the given transcript
    async fn stream_completion(&self, messages: &[Message]) -> Result<ChunkStream, EndpointFailure>;
}

// ============================================================================
// Streaming Response Structures
// ============================================================================

/// Streaming chunk as sent by the endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}
