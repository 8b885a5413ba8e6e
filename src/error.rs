//! Error types for faaswire.

use thiserror::Error;

/// Boxed error type that user handler functions may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all faaswire operations.
#[derive(Debug, Error)]
pub enum FaaswireError {
    /// I/O error from host plumbing (signal registration, control-plane glue).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input payload could not be decoded into the handler's input type.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Handler output could not be encoded to JSON.
    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Error returned by the user handler, propagated verbatim.
    #[error("{0}")]
    Handler(BoxError),

    /// No handler function was registered before the worker was built.
    #[error("handler is nil")]
    NilHandler,

    /// Startup or environment configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using FaaswireError.
pub type Result<T> = std::result::Result<T, FaaswireError>;
