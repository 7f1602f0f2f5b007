use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{TransferError, validate_file_name};

/// Append-only file sink for one reassembly session.
///
/// Chunks are written to a `.part` staging path; the final path only
/// appears once [`finalize`](Self::finalize) renames it, so downstream
/// consumers never observe a partial file.
pub struct ReassemblySink {
    file: Option<File>,
    staging_path: PathBuf,
    final_path: PathBuf,
    bytes_written: u64,
}

impl ReassemblySink {
    /// Opens a sink for `file_name` under `base_dir`.
    ///
    /// Creates `base_dir` if needed. The name is validated first so a
    /// hostile metadata payload cannot escape the directory.
    pub fn open(base_dir: &Path, file_name: &str) -> Result<Self, TransferError> {
        validate_file_name(file_name)?;
        fs::create_dir_all(base_dir)?;

        let final_path = base_dir.join(file_name);
        let staging_path = base_dir.join(format!("{file_name}.part"));
        let file = File::create(&staging_path)?;

        debug!(path = %staging_path.display(), "reassembly sink opened");
        Ok(Self {
            file: Some(file),
            staging_path,
            final_path,
            bytes_written: 0,
        })
    }

    /// Appends a chunk payload at the next write position.
    pub fn append(&mut self, data: &[u8]) -> Result<(), TransferError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| TransferError::Io(std::io::Error::other("sink already closed")))?;
        file.write_all(data)?;
        file.flush()?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Total bytes appended so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The path the completed file will appear at.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Flushes, closes, and renames the staging file to the final path.
    ///
    /// On failure the staging file is removed: a session that cannot be
    /// published leaves nothing behind for eviction to miss.
    pub fn finalize(mut self) -> Result<PathBuf, TransferError> {
        match self.rename_into_place() {
            Ok(()) => {
                debug!(path = %self.final_path.display(), bytes = self.bytes_written, "sink finalized");
                Ok(self.final_path.clone())
            }
            Err(e) => {
                let _ = fs::remove_file(&self.staging_path);
                Err(e)
            }
        }
    }

    fn rename_into_place(&mut self) -> Result<(), TransferError> {
        let file = self
            .file
            .take()
            .ok_or_else(|| TransferError::Io(std::io::Error::other("sink already closed")))?;
        file.sync_all()?;
        drop(file);
        fs::rename(&self.staging_path, &self.final_path)?;
        Ok(())
    }

    /// Closes the sink and removes the staging file.
    ///
    /// Used on session teardown; errors removing the file are ignored
    /// since there is nothing useful to do with them mid-teardown.
    pub fn discard(mut self) {
        self.file.take();
        let _ = fs::remove_file(&self.staging_path);
        debug!(path = %self.staging_path.display(), "sink discarded");
    }
}
