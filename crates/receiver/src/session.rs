//! In-progress reassembly session state.

use tokio::time::Instant;

use rectran_transfer::ReassemblySink;

/// Receiver-owned state for one in-flight transfer.
///
/// Exactly one session exists at a time; it is owned and mutated only
/// by the receiver's message-handling task. Destroyed on completion, on
/// error, on superseding metadata, or on idle eviction.
pub struct Session {
    /// Peer recorded at session start; chunks from anyone else are dropped.
    pub source_peer: String,
    pub expected_chunks: u32,
    pub received_chunks: u32,
    pub sink: ReassemblySink,
    pub started_at: Instant,
    /// Last metadata or chunk accepted; drives idle eviction.
    pub last_activity: Instant,
}

impl Session {
    pub fn new(source_peer: String, expected_chunks: u32, sink: ReassemblySink) -> Self {
        let now = Instant::now();
        Self {
            source_peer,
            expected_chunks,
            received_chunks: 0,
            sink,
            started_at: now,
            last_activity: now,
        }
    }

    /// Session is complete iff every expected chunk has arrived.
    pub fn is_complete(&self) -> bool {
        self.received_chunks == self.expected_chunks
    }
}
