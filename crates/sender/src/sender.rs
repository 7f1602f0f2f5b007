//! Transfer sender state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rectran_protocol::{PATH_CHUNK, PATH_METADATA, PATH_STATUS, TransferMetadata};
use rectran_transfer::{ChunkEncoder, chunk_count};

use crate::error::SendError;
use crate::transport::PeerTransport;
use crate::types::{SendEvent, SenderConfig};

/// Sends captured audio files to the paired device.
///
/// One transfer at a time: `send_file` runs the whole retry loop to a
/// terminal outcome. Owned by the composition root; there is no global
/// instance.
pub struct TransferSender {
    transport: Arc<dyn PeerTransport>,
    config: SenderConfig,
    events_tx: mpsc::Sender<SendEvent>,
    events_rx: Option<mpsc::Receiver<SendEvent>>,
    cancel: CancellationToken,
}

impl TransferSender {
    /// Creates a sender over the given transport.
    pub fn new(transport: Arc<dyn PeerTransport>, config: SenderConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            transport,
            config,
            events_tx,
            events_rx: Some(events_rx),
            cancel: CancellationToken::new(),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<SendEvent>> {
        self.events_rx.take()
    }

    /// Returns a cancellation token for in-flight transfers.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Transfers `bytes` as `file_name` to the paired device.
    ///
    /// Retries the whole metadata+chunks sequence on failure, up to
    /// `max_attempts` times with `failed_attempt * retry_base_delay`
    /// backoff in between. Emits zero or more [`SendEvent::Progress`]
    /// followed by exactly one terminal event. Returns the attempt
    /// number that succeeded.
    ///
    /// The caller keeps ownership of the source file regardless of the
    /// outcome; nothing here deletes it.
    pub async fn send_file(&self, file_name: &str, bytes: &[u8]) -> Result<u32, SendError> {
        let total_chunks = chunk_count(bytes.len(), self.config.chunk_size);
        let mut last_err: Option<SendError> = None;

        for attempt in 1..=self.config.max_attempts {
            if let Err(e) = self.check_cancelled() {
                self.emit_failed(&e).await;
                return Err(e);
            }

            debug!(
                file = file_name,
                attempt,
                max = self.config.max_attempts,
                "transfer attempt"
            );

            match self.send_once(file_name, bytes, total_chunks).await {
                Ok(()) => {
                    info!(file = file_name, attempt, chunks = total_chunks, "transfer completed");
                    let _ = self
                        .events_tx
                        .send(SendEvent::Completed {
                            file_name: file_name.to_string(),
                            attempts: attempt,
                        })
                        .await;
                    return Ok(attempt);
                }
                Err(e @ SendError::Cancelled) => {
                    self.emit_failed(&e).await;
                    return Err(e);
                }
                Err(e) => {
                    warn!(file = file_name, attempt, error = %e, "transfer attempt failed");
                    last_err = Some(e);
                }
            }

            if attempt < self.config.max_attempts {
                let backoff = self.config.retry_base_delay * attempt;
                if let Err(e) = self.sleep_cancellable(backoff).await {
                    self.emit_failed(&e).await;
                    return Err(e);
                }
            }
        }

        let err = SendError::AllAttemptsExhausted {
            attempts: self.config.max_attempts,
        };
        warn!(
            file = file_name,
            last_error = %last_err.map(|e| e.to_string()).unwrap_or_default(),
            "all transfer attempts failed"
        );
        self.emit_failed(&err).await;
        Err(err)
    }

    /// Sends a one-shot status string to the paired device.
    pub async fn send_status(&self, text: &str) -> Result<(), SendError> {
        let peer = self.resolve_peer().await?;
        self.transport
            .send_message(peer, PATH_STATUS, text.as_bytes().to_vec())
            .await?;
        debug!(status = text, "status sent");
        Ok(())
    }

    /// One atomic attempt: resolve peer, metadata, then every chunk in order.
    async fn send_once(
        &self,
        file_name: &str,
        bytes: &[u8],
        total_chunks: u32,
    ) -> Result<(), SendError> {
        let peer = self.resolve_peer().await?;

        let metadata = TransferMetadata {
            file_name: file_name.to_string(),
            total_chunks,
            file_size: bytes.len() as u64,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
        };
        self.transport
            .send_message(peer.clone(), PATH_METADATA, metadata.encode()?)
            .await?;
        debug!(peer = %peer, chunks = total_chunks, bytes = bytes.len(), "metadata sent");

        for chunk in ChunkEncoder::new(bytes, self.config.chunk_size) {
            self.check_cancelled()?;

            let sent = chunk.chunk_index + 1;
            let chunk_bytes = chunk.data.len();
            self.transport
                .send_message(peer.clone(), PATH_CHUNK, chunk.encode()?)
                .await?;

            let _ = self
                .events_tx
                .send(SendEvent::Progress {
                    sent_chunks: sent,
                    total_chunks,
                })
                .await;
            debug!(peer = %peer, chunk = sent, total = total_chunks, bytes = chunk_bytes, "chunk sent");

            // Cooperative flow control: the transport has no
            // backpressure signal back from the receiver.
            self.sleep_cancellable(self.config.inter_chunk_delay).await?;
        }

        // Give the receiver time to process the final chunks.
        self.sleep_cancellable(self.config.settle_delay).await?;
        Ok(())
    }

    /// Resolves the target peer: the first connected node.
    async fn resolve_peer(&self) -> Result<String, SendError> {
        let peers = self.transport.connected_peers().await?;
        match peers.into_iter().next() {
            Some(peer) => Ok(peer),
            None => Err(SendError::NoPeerAvailable),
        }
    }

    fn check_cancelled(&self) -> Result<(), SendError> {
        if self.cancel.is_cancelled() {
            Err(SendError::Cancelled)
        } else {
            Ok(())
        }
    }

    async fn sleep_cancellable(&self, duration: Duration) -> Result<(), SendError> {
        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = self.cancel.cancelled() => Err(SendError::Cancelled),
        }
    }

    async fn emit_failed(&self, err: &SendError) {
        let _ = self
            .events_tx
            .send(SendEvent::Failed {
                reason: err.to_string(),
            })
            .await;
    }
}
