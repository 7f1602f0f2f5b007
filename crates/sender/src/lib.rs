//! Watch-side transfer flow.
//!
//! This crate implements the **sending half** of the Rectran transfer
//! protocol. It is a library crate with no platform dependencies — the
//! embedding app provides a [`PeerTransport`] implementation that
//! bridges to the actual device messaging layer.
//!
//! # Pipeline (one attempt)
//!
//! 1. **Resolve** — query connected peers; the first is the target
//! 2. **Metadata** — announce the transfer on the metadata path
//! 3. **Chunks** — push every chunk in order, one confirmed send at a
//!    time, with a short cooperative delay between chunks
//! 4. **Settle** — a grace delay so the receiver can drain
//!
//! Any failure retries the *whole* attempt from the metadata message,
//! up to a bounded number of attempts with linear-growth backoff. The
//! receiver restarts its session on each fresh metadata message, so a
//! retried attempt needs no resume negotiation.

mod error;
mod sender;
mod transport;
mod types;

pub use error::SendError;
pub use sender::TransferSender;
pub use transport::PeerTransport;
pub use types::{SendEvent, SenderConfig};

/// Maximum whole-transfer attempts before giving up.
pub const MAX_RETRY_ATTEMPTS: u32 = 3;
