//! Sender error types.

/// Errors produced while sending a transfer.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("no peer available")]
    NoPeerAvailable,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cancelled")]
    Cancelled,

    #[error("all {attempts} transfer attempts exhausted")]
    AllAttemptsExhausted { attempts: u32 },
}
