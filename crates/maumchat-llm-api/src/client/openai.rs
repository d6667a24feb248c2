use async_stream::stream;
use async_trait::async_trait;
use colored::Colorize;
use futures_util::StreamExt;
use maumchat_logging::{log_request, log_request_to_file, log_response, log_stream_chunk};
use maumchat_types::Message;
use std::path::PathBuf;

use crate::client::sse::{parse_sse_line, SseEvent, SseLineBuffer};
use crate::client::{ChatRequest, ChunkStream, CompletionClient};
use crate::error::EndpointFailure;

/// Streaming client for OpenAI-compatible `/chat/completions` endpoints
pub struct OpenAiCompatClient {
    api_key: String,
    model: String,
    api_url: String,
    verbose: bool,
    request_log_dir: Option<PathBuf>,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// `api_url` must already point at the completions endpoint (see `normalize_api_url`)
    pub fn new(api_key: String, model: String, api_url: String) -> Self {
        Self {
            api_key,
            model,
            api_url,
            verbose: false,
            request_log_dir: None,
            client: reqwest::Client::new(),
        }
    }

    /// Dump requests, error responses and raw stream lines to the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Write every request to a file in `dir`
    pub fn with_request_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.request_log_dir = dir;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream_completion(&self, messages: &[Message]) -> Result<ChunkStream, EndpointFailure> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: true,
        };

        log_request(&self.api_url, &request, &self.api_key, self.verbose);

        if let Some(dir) = &self.request_log_dir {
            match log_request_to_file(dir, &self.api_url, &request, &self.model, &self.api_key) {
                Ok(path) if self.verbose => {
                    println!("{}", format!("📝 Request logged to: {}", path.display()).bright_blue());
                }
                Ok(_) => {}
                Err(e) => eprintln!("{} {}", "[Logging error]".yellow(), e),
            }
        }

        let response = self.client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            log_response(&status, &headers, &body, self.verbose);

            return Err(EndpointFailure::Status { status, body });
        }

        if self.verbose {
            println!("\n{}", "📡 Starting streaming response...".bright_cyan());
        }

        let verbose = self.verbose;
        let mut byte_stream = response.bytes_stream();

        let stream = stream! {
            let mut lines = SseLineBuffer::new();
            let mut chunk_counter = 0usize;

            'read: loop {
                let (decoded, body_ended) = match byte_stream.next().await {
                    Some(Ok(bytes)) => (lines.push(&bytes), false),
                    Some(Err(e)) => {
                        yield Err(EndpointFailure::Interrupted(e.to_string()));
                        break 'read;
                    }
                    None => (lines.finish().map(|tail| tail.into_iter().collect()), true),
                };

                let batch: Vec<String> = match decoded {
                    Ok(batch) => batch,
                    Err(e) => {
                        yield Err(e);
                        break 'read;
                    }
                };

                for line in batch {
                    if line.trim().is_empty() {
                        continue;
                    }
                    chunk_counter += 1;
                    log_stream_chunk(chunk_counter, &line, verbose);

                    match parse_sse_line(&line) {
                        Ok(Some(SseEvent::Chunk(chunk))) => yield Ok(chunk),
                        Ok(Some(SseEvent::Done)) => break 'read,
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            break 'read;
                        }
                    }
                }

                if body_ended {
                    break 'read;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
