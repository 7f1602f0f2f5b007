use rectran_protocol::ChunkMessage;

/// Number of chunks needed to cover `len` bytes at `chunk_size`.
///
/// Zero for an empty buffer: a metadata-only transfer with no chunks is
/// valid and completes immediately on the receiver.
pub fn chunk_count(len: usize, chunk_size: usize) -> u32 {
    len.div_ceil(chunk_size) as u32
}

/// Splits a byte buffer into indexed chunk messages.
///
/// Chunk `i` covers bytes `[i*chunk_size, min((i+1)*chunk_size, len))`,
/// so every chunk is full-sized except possibly the last. Indices are
/// 0-based and strictly sequential; concatenating payloads in index
/// order reproduces the buffer exactly.
pub struct ChunkEncoder<'a> {
    buffer: &'a [u8],
    chunk_size: usize,
    next_index: u32,
    offset: usize,
}

impl<'a> ChunkEncoder<'a> {
    /// Creates an encoder over `buffer`.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`](crate::DEFAULT_CHUNK_SIZE)
    /// is used.
    pub fn new(buffer: &'a [u8], chunk_size: usize) -> Self {
        let chunk_size = if chunk_size == 0 {
            crate::DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Self {
            buffer,
            chunk_size,
            next_index: 0,
            offset: 0,
        }
    }

    /// Total number of chunks this encoder will yield.
    pub fn total_chunks(&self) -> u32 {
        chunk_count(self.buffer.len(), self.chunk_size)
    }
}

impl Iterator for ChunkEncoder<'_> {
    type Item = ChunkMessage;

    fn next(&mut self) -> Option<ChunkMessage> {
        if self.offset >= self.buffer.len() {
            return None;
        }
        let end = std::cmp::min(self.offset + self.chunk_size, self.buffer.len());
        let chunk = ChunkMessage::new(self.next_index, self.buffer[self.offset..end].to_vec());
        self.offset = end;
        self.next_index += 1;
        Some(chunk)
    }
}
