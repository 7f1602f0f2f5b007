//! Wire protocol types for Rectran watch-phone audio transfer.
//!
//! The watch and phone apps exchange small discrete messages over the
//! platform message layer. Each message is addressed to a logical path
//! and carries a UTF-8 JSON payload. This crate defines those payloads
//! byte-exactly; transport and state machines live in the sender and
//! receiver crates.

pub mod constants;
pub mod messages;

pub use constants::{PATH_CHUNK, PATH_METADATA, PATH_STATUS};
pub use messages::{ChunkMessage, TransferMetadata};
