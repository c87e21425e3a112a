use thiserror::Error;

/// Failures at the crate's edges. The protocol core never returns these:
/// unfillable pages and cancellations are ordinary outcomes.
#[derive(Debug, Error)]
pub enum AutofillError {
    /// Command payload decoded but is not the variant this entry point accepts
    #[error("Invalid command args received {args} for the api call. Expected a valid args as {expected}")]
    InvalidCommandArgs { expected: String, args: String },

    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type AutofillResult<T> = Result<T, AutofillError>;
