//! Phone-side transfer flow.
//!
//! This crate implements the **receiving half** of the Rectran transfer
//! protocol: a single-session reassembly state machine fed by the
//! platform message callback. The embedding app enqueues every inbound
//! message as an [`InboundMessage`]; completed files come back as
//! [`ReceiveEvent::Completed`].
//!
//! One session at a time: a fresh metadata message supersedes any
//! incomplete session (that is how a retried sender attempt restarts
//! cleanly), and a session idle past the configured timeout is evicted
//! so an abandoned sender cannot pin a partial file forever.
//!
//! All per-message failures are contained: a malformed payload or a
//! sink write error tears down at most the current session and the
//! receiver keeps running.

mod error;
mod handle;
mod receiver;
mod session;
mod types;

pub use error::ReceiveError;
pub use handle::ReceiverHandle;
pub use receiver::TransferReceiver;
pub use types::{InboundMessage, ReceiveEvent, ReceiverConfig};
