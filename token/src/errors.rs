use thiserror::Error;

/// Error for payload construction failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Failed to generate token id: {0}")]
    IdGeneration(String),

    #[error("Token duration is out of range")]
    DurationOutOfRange,
}

/// Error type for token makers.
///
/// Verification failures only distinguish expired tokens from every other rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid key size: must be at least {min} characters, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("invalid key size: must be exactly {expected} characters, got {actual}")]
    KeySizeMismatch { expected: usize, actual: usize },

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}
