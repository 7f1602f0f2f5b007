//! Actor wrapper running the receiver on its own task.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::receiver::TransferReceiver;
use crate::types::{InboundMessage, ReceiveEvent, ReceiverConfig};

/// Owns a [`TransferReceiver`] on a background task.
///
/// The platform message callback pushes into [`inbound`](Self::inbound);
/// the single-consumer queue serializes handling even when the platform
/// delivers on multiple threads, which is what lets the state machine
/// itself stay lock-free. A periodic tick drives idle-session eviction.
pub struct ReceiverHandle {
    inbound_tx: mpsc::Sender<InboundMessage>,
    events_rx: Option<mpsc::Receiver<ReceiveEvent>>,
    cancel: CancellationToken,
}

impl ReceiverHandle {
    /// Spawns the receiver task.
    pub fn spawn(config: ReceiverConfig) -> Self {
        let (inbound_tx, mut inbound_rx) = mpsc::channel::<InboundMessage>(256);
        let (events_tx, events_rx) = mpsc::channel(256);
        let cancel = CancellationToken::new();

        // Sweep a few times per timeout window so eviction lag stays small.
        let sweep_period = config.idle_timeout / 4;
        let mut receiver = TransferReceiver::new(config, events_tx);
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let mut sweep = tokio::time::interval(sweep_period);
            // First tick fires immediately; skip it.
            sweep.tick().await;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    msg = inbound_rx.recv() => match msg {
                        Some(msg) => receiver.handle_message(msg).await,
                        None => break,
                    },
                    _ = sweep.tick() => receiver.evict_idle(),
                }
            }
            receiver.shutdown();
            debug!("receiver task stopped");
        });

        Self {
            inbound_tx,
            events_rx: Some(events_rx),
            cancel,
        }
    }

    /// Sender half for the platform message callback.
    pub fn inbound(&self) -> mpsc::Sender<InboundMessage> {
        self.inbound_tx.clone()
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<ReceiveEvent>> {
        self.events_rx.take()
    }

    /// Stops the receiver task, discarding any in-progress session.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ReceiverHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
