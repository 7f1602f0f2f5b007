//! Transfer receiver state machine.

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use rectran_protocol::{ChunkMessage, PATH_CHUNK, PATH_METADATA, PATH_STATUS, TransferMetadata};
use rectran_transfer::ReassemblySink;

use crate::error::ReceiveError;
use crate::session::Session;
use crate::types::{InboundMessage, ReceiveEvent, ReceiverConfig};

/// Reassembles chunked transfers from the paired device.
///
/// Waiting → Receiving → Completing → Waiting, looping once per
/// transfer. Must be driven from a single task;
/// [`ReceiverHandle`](crate::ReceiverHandle) provides that wrapper.
pub struct TransferReceiver {
    config: ReceiverConfig,
    session: Option<Session>,
    events_tx: mpsc::Sender<ReceiveEvent>,
}

impl TransferReceiver {
    /// Creates a receiver writing completed files under `config.audio_dir`.
    pub fn new(config: ReceiverConfig, events_tx: mpsc::Sender<ReceiveEvent>) -> Self {
        Self {
            config,
            session: None,
            events_tx,
        }
    }

    /// Returns `true` while a session is being reassembled.
    pub fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    /// Dispatches one inbound message.
    ///
    /// Never fails the caller: every error is contained here, at worst
    /// tearing down the current session.
    pub async fn handle_message(&mut self, msg: InboundMessage) {
        match msg.path.as_str() {
            PATH_METADATA => {
                if let Err(e) = self.handle_metadata(&msg).await {
                    warn!(peer = %msg.source_peer, error = %e, "metadata rejected");
                }
            }
            PATH_CHUNK => {
                if let Err(e) = self.handle_chunk(&msg).await {
                    warn!(peer = %msg.source_peer, error = %e, "chunk failed, session torn down");
                    self.teardown();
                }
            }
            PATH_STATUS => {
                let status = String::from_utf8_lossy(&msg.payload);
                info!(peer = %msg.source_peer, status = %status, "status message");
            }
            other => {
                warn!(path = other, peer = %msg.source_peer, "unknown message path");
            }
        }
    }

    /// Evicts the session if it has been idle past the configured timeout.
    ///
    /// An abandoned sender attempt sends no teardown message, so this
    /// sweep is the only way an orphaned session ever gets cleaned up.
    pub fn evict_idle(&mut self) {
        let idle = self
            .session
            .as_ref()
            .map(|s| s.last_activity.elapsed() >= self.config.idle_timeout)
            .unwrap_or(false);
        if idle {
            warn!(
                timeout_secs = self.config.idle_timeout.as_secs(),
                "evicting idle session"
            );
            self.teardown();
        }
    }

    /// Discards any in-progress session; used by the actor on shutdown.
    pub fn shutdown(&mut self) {
        if self.session.is_some() {
            debug!("discarding in-progress session on shutdown");
            self.teardown();
        }
    }

    /// Opens a new session, superseding any in-progress one.
    async fn handle_metadata(&mut self, msg: &InboundMessage) -> Result<(), ReceiveError> {
        let metadata =
            TransferMetadata::decode(&msg.payload).map_err(ReceiveError::MetadataParse)?;

        if let Some(old) = self.session.take() {
            // A retried sender attempt restarts with fresh metadata;
            // the incomplete predecessor is superseded, not an error.
            info!(
                peer = %old.source_peer,
                received = old.received_chunks,
                expected = old.expected_chunks,
                "superseding incomplete session"
            );
            old.sink.discard();
        }

        let sink = ReassemblySink::open(&self.config.audio_dir, &metadata.file_name).map_err(
            |e| match e {
                rectran_transfer::TransferError::InvalidFileName(name) => {
                    ReceiveError::InvalidFileName(name)
                }
                other => ReceiveError::SinkWrite(other),
            },
        )?;
        info!(
            peer = %msg.source_peer,
            file = %metadata.file_name,
            chunks = metadata.total_chunks,
            bytes = metadata.file_size,
            "session opened"
        );

        let session = Session::new(msg.source_peer.clone(), metadata.total_chunks, sink);
        if session.is_complete() {
            // Zero-chunk transfer: complete on metadata alone.
            self.complete(session).await?;
        } else {
            self.session = Some(session);
        }
        Ok(())
    }

    /// Appends one chunk to the active session.
    async fn handle_chunk(&mut self, msg: &InboundMessage) -> Result<(), ReceiveError> {
        let Some(session) = self.session.as_mut() else {
            // A chunk with no preceding metadata is not recoverable and
            // not worth surfacing.
            debug!(peer = %msg.source_peer, "chunk without active session, dropped");
            return Ok(());
        };

        if session.source_peer != msg.source_peer {
            warn!(
                expected = %session.source_peer,
                got = %msg.source_peer,
                "chunk from different peer, dropped"
            );
            return Ok(());
        }

        let chunk = ChunkMessage::decode(&msg.payload).map_err(ReceiveError::ChunkParse)?;

        if chunk.chunk_index != session.received_chunks {
            // The sender pushes strictly in order, so this means the
            // transport reordered or dropped something.
            warn!(
                expected = session.received_chunks,
                got = chunk.chunk_index,
                "chunk arrived out of order"
            );
        }
        if chunk.size as usize != chunk.data.len() {
            warn!(
                declared = chunk.size,
                actual = chunk.data.len(),
                "chunk size field mismatch"
            );
        }

        session.sink.append(&chunk.data)?;
        session.received_chunks += 1;
        session.last_activity = Instant::now();

        debug!(
            received = session.received_chunks,
            expected = session.expected_chunks,
            bytes = chunk.data.len(),
            "chunk accepted"
        );
        let progress = ReceiveEvent::Progress {
            received_chunks: session.received_chunks,
            expected_chunks: session.expected_chunks,
        };
        let done = session.is_complete();
        let _ = self.events_tx.send(progress).await;

        if done && let Some(session) = self.session.take() {
            self.complete(session).await?;
        }
        Ok(())
    }

    /// Finalizes a completed session and emits the terminal event.
    async fn complete(&mut self, session: Session) -> Result<(), ReceiveError> {
        let path = session.sink.finalize()?;
        info!(
            peer = %session.source_peer,
            path = %path.display(),
            chunks = session.received_chunks,
            elapsed_ms = session.started_at.elapsed().as_millis() as u64,
            "transfer complete"
        );
        let _ = self
            .events_tx
            .send(ReceiveEvent::Completed {
                path,
                source_peer: session.source_peer,
            })
            .await;
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            session.sink.discard();
        }
    }
}
