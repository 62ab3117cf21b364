use thiserror::Error;

/// Failures encountered while ingesting provider data.
///
/// None of these is fatal: callers log and carry on with whatever data they
/// already hold.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A per-game record with an arity other than 1 or 9 (schema drift)
    #[error("Malformed game record: expected 9 fields, got {arity}")]
    MalformedRecord { arity: usize },

    /// A well-formed record without a usable game id
    #[error("Game record has no usable gameId")]
    MissingGameId,

    #[error("Failed to decode provider response: {0}")]
    DecodeFailure(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
}
