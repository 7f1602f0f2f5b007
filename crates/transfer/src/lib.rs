//! Chunk encoding and reassembly primitives.
//!
//! The sender splits a finite byte buffer into indexed chunks sized for
//! the small-message transport; the receiver appends them to a staged
//! sink and atomically publishes the file once every chunk has arrived.

mod encoder;
mod sink;
mod validation;

pub use encoder::{ChunkEncoder, chunk_count};
pub use sink::ReassemblySink;
pub use validation::validate_file_name;

/// Default chunk size: 100 KiB.
///
/// Sized under the platform message layer's ~100 KB per-payload cap.
pub const DEFAULT_CHUNK_SIZE: usize = 100 * 1024;

/// Errors produced by the transfer primitives.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),
}
