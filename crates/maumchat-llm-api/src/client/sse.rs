//! Server-Sent Events decoding for streamed completions.

use crate::client::{StreamChunk, StreamingChunk};
use crate::error::EndpointFailure;

/// Marker some endpoints send after the last chunk
const DONE_MARKER: &str = "[DONE]";

/// Decoded meaning of a single SSE line
#[derive(Debug, PartialEq, Eq)]
pub enum SseEvent {
    Chunk(StreamingChunk),
    Done,
}

/// Splits raw response bytes into complete lines.
///
/// Bytes are held until a newline arrives so multi-byte characters split
/// across network frames are decoded intact.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes, returning every line completed by them.
    ///
    /// A completed line that is not valid UTF-8 is a failure.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<String>, EndpointFailure> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(decode_line(line)?);
        }
        Ok(lines)
    }

    /// Flush a trailing line that was not newline-terminated
    pub fn finish(&mut self) -> Result<Option<String>, EndpointFailure> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let mut rest = std::mem::take(&mut self.pending);
        if rest.last() == Some(&b'\r') {
            rest.pop();
        }
        decode_line(rest).map(Some)
    }
}

fn decode_line(line: Vec<u8>) -> Result<String, EndpointFailure> {
    String::from_utf8(line).map_err(|source| EndpointFailure::InvalidEncoding { source })
}

/// Parse one SSE line.
///
/// Blank lines, comments and non-data fields yield `Ok(None)`. Each `data:`
/// line must hold a whole JSON chunk; events spread over several `data:`
/// lines are not joined.
pub fn parse_sse_line(line: &str) -> Result<Option<SseEvent>, EndpointFailure> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with(':') {
        return Ok(None);
    }

    let Some(data) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let data = data.trim_start();

    if data == DONE_MARKER {
        return Ok(Some(SseEvent::Done));
    }

    let chunk: StreamChunk =
        serde_json::from_str(data).map_err(|source| EndpointFailure::MalformedChunk {
            data: data.to_string(),
            source,
        })?;

    if let Some(error) = chunk.error {
        let detail = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string());
        return Err(EndpointFailure::Remote(detail));
    }

    let (delta, finish_reason) = match chunk.choices.into_iter().next() {
        Some(choice) => (choice.delta.content, choice.finish_reason),
        None => (None, None),
    };

    Ok(Some(SseEvent::Chunk(StreamingChunk {
        delta,
        finish_reason,
    })))
}
