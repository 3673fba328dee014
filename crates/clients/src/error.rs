//! Errors produced by the generation-service clients.

/// Errors that can occur when calling the LLM or image services.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The service answered successfully but produced no usable output.
    #[error("{0}")]
    MissingOutput(String),
}
