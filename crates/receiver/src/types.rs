//! Receiver configuration, inbound message, and event types.

use std::path::PathBuf;
use std::time::Duration;

/// Default idle-session timeout.
///
/// A sender that is cancelled mid-attempt sends no teardown message, so
/// its session would otherwise linger forever with an open partial file.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// One message delivered by the platform messaging layer.
///
/// The embedding app's message callback builds one of these per
/// delivery and pushes it into the receiver's inbound queue, which also
/// serializes handling when the platform delivers on multiple threads.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Logical path the message was addressed to.
    pub path: String,
    /// Raw UTF-8 payload.
    pub payload: Vec<u8>,
    /// Identifier of the sending peer.
    pub source_peer: String,
}

/// Tunables for the transfer receiver.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Directory completed audio files are written into.
    pub audio_dir: PathBuf,
    /// A session with no chunk activity for this long is evicted.
    pub idle_timeout: Duration,
}

impl ReceiverConfig {
    /// Creates a config writing into `audio_dir` with default timeouts.
    pub fn new(audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            audio_dir: audio_dir.into(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Events emitted by the receiver.
///
/// Cardinality contract: per session, zero or more `Progress` events
/// followed by at most one `Completed`. Sessions torn down by error,
/// supersession, or idle eviction end without a terminal event; the
/// rejection is logged instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveEvent {
    /// A chunk was accepted and appended.
    Progress {
        received_chunks: u32,
        expected_chunks: u32,
    },
    /// A file finished reassembly and is visible at `path`.
    Completed { path: PathBuf, source_peer: String },
}
