//! Logical message paths shared by both sides of the transfer.

/// Announces a new transfer and carries [`TransferMetadata`](crate::TransferMetadata).
pub const PATH_METADATA: &str = "/rectran/audio/metadata";

/// Carries one [`ChunkMessage`](crate::ChunkMessage) of file data.
pub const PATH_CHUNK: &str = "/rectran/audio/chunk";

/// Carries a plain UTF-8 status string, outside the transfer state machine.
pub const PATH_STATUS: &str = "/rectran/audio/status";
