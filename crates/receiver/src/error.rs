//! Receiver error types.
//!
//! None of these escape the receiver as process-level faults; they are
//! logged and contained per-message or per-session.

/// Errors produced while handling inbound transfer messages.
#[derive(Debug, thiserror::Error)]
pub enum ReceiveError {
    /// Metadata payload was malformed. No session is created.
    #[error("metadata parse error: {0}")]
    MetadataParse(#[source] serde_json::Error),

    /// Chunk payload was malformed. Tears down the current session.
    #[error("chunk parse error: {0}")]
    ChunkParse(#[source] serde_json::Error),

    /// Writing to the reassembly sink failed. Tears down the session.
    #[error("sink write error: {0}")]
    SinkWrite(#[from] rectran_transfer::TransferError),

    /// Metadata carried a file name that could escape the audio
    /// directory. No session is created.
    #[error("invalid file name: {0}")]
    InvalidFileName(String),
}
