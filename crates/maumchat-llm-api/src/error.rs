use thiserror::Error;

/// Anything that goes wrong between sending a completion request and the end
/// of its stream.
///
/// The chat session does not distinguish between variants; they exist so the
/// user-visible notice can say what happened.
#[derive(Debug, Error)]
pub enum EndpointFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed stream chunk: {source}")]
    MalformedChunk {
        data: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stream is not valid UTF-8: {source}")]
    InvalidEncoding {
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("endpoint reported an error: {0}")]
    Remote(String),

    #[error("stream interrupted: {0}")]
    Interrupted(String),
}
