//! Transfer message payloads.
//!
//! Field names and encodings match the mobile apps exactly: camelCase
//! keys, chunk data as unwrapped base64. All fields are required — a
//! payload missing any of them fails to decode, and the receiver treats
//! that as a parse rejection rather than guessing defaults.

use serde::{Deserialize, Serialize};

/// Announces a transfer: sent once, before the first chunk.
///
/// Consumed exactly once by the receiver to open a reassembly session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMetadata {
    pub file_name: String,
    pub total_chunks: u32,
    pub file_size: u64,
    /// Epoch milliseconds at which the sender started the transfer.
    pub timestamp: u64,
}

impl TransferMetadata {
    /// Serializes to the UTF-8 JSON payload sent on the metadata path.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parses a metadata payload.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

/// One indexed fragment of the file being transferred.
///
/// Chunks are independent messages with no ordering guarantee on the
/// wire; `chunk_index` is the sole ordering authority. `size` is the
/// decoded byte length of `data`, carried for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMessage {
    pub chunk_index: u32,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub size: u32,
}

impl ChunkMessage {
    /// Builds a chunk message, deriving `size` from the payload.
    pub fn new(chunk_index: u32, data: Vec<u8>) -> Self {
        let size = data.len() as u32;
        Self {
            chunk_index,
            data,
            size,
        }
    }

    /// Serializes to the UTF-8 JSON payload sent on the chunk path.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parses a chunk payload.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
