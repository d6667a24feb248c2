//! # maumchat-llm-api
//!
//! Streaming client for OpenAI-compatible chat completion endpoints.
//!
//! ## Features
//!
//! - **Single trait**: `CompletionClient` hides the transport from the chat session
//! - **Streaming only**: replies arrive as a finite stream of `StreamingChunk`s
//! - **SSE decoding**: tolerant of frames split mid-line or mid-character
//! - **One failure type**: every transport, status or decoding problem is an `EndpointFailure`
//!
//! ## Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use maumchat_llm_api::{ClientConfig, ClientFactory};
//! use maumchat_types::Message;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("your-api-key");
//!     let client = ClientFactory::create(&config);
//!
//!     let messages = vec![Message::user("안녕하세요")];
//!     let mut stream = client.stream_completion(&messages).await?;
//!     while let Some(chunk) = stream.next().await {
//!         if let Some(delta) = chunk?.delta {
//!             print!("{}", delta);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;


// Re-export commonly used types
pub use client::{
    ChatRequest,
    ChunkStream,
    CompletionClient,
    StreamingChunk,
};
pub use client::openai::OpenAiCompatClient;
pub use client::sse::{parse_sse_line, SseEvent, SseLineBuffer};

pub use config::{
    normalize_api_url,
    ClientConfig,
    ClientFactory,
    DEFAULT_API_BASE_URL,
    DEFAULT_MODEL,
};

pub use error::EndpointFailure;
