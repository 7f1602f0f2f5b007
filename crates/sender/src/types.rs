//! Sender configuration and event types.

use std::time::Duration;

use crate::MAX_RETRY_ATTEMPTS;

/// Tunables for the transfer sender.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Chunk payload size in bytes.
    pub chunk_size: usize,
    /// Total whole-transfer attempts (first try included).
    pub max_attempts: u32,
    /// Backoff between attempts grows as `failed_attempt * retry_base_delay`.
    pub retry_base_delay: Duration,
    /// Cooperative delay after each chunk send; the transport has no
    /// backpressure signal, so this keeps the receiver's queue shallow.
    pub inter_chunk_delay: Duration,
    /// Grace delay after the final chunk so the receiver can drain.
    pub settle_delay: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            chunk_size: rectran_transfer::DEFAULT_CHUNK_SIZE,
            max_attempts: MAX_RETRY_ATTEMPTS,
            retry_base_delay: Duration::from_secs(1),
            inter_chunk_delay: Duration::from_millis(10),
            settle_delay: Duration::from_millis(500),
        }
    }
}

/// Events emitted during a transfer.
///
/// Cardinality contract: zero or more `Progress` events, then exactly
/// one terminal event (`Completed` or `Failed`) per `send_file` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendEvent {
    /// A chunk was confirmed sent. `sent_chunks` counts from 1.
    Progress { sent_chunks: u32, total_chunks: u32 },
    /// The transfer completed on attempt number `attempts`.
    Completed { file_name: String, attempts: u32 },
    /// The transfer failed definitively.
    Failed { reason: String },
}
