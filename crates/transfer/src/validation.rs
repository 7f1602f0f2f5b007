use std::path::{Component, Path};

use crate::TransferError;

/// Validates a file name received in transfer metadata.
///
/// The name is joined under the receiver's audio directory and must be
/// a bare file name: exactly one path component. Anything else is
/// rejected:
/// - Empty names
/// - Names containing a separator (`sub/rec.m4a`, `dir\rec.m4a`)
/// - Absolute paths and Windows prefixes (`/tmp/x`, `C:\x`)
/// - Parent directory traversal (`..`)
pub fn validate_file_name(file_name: &str) -> Result<(), TransferError> {
    if file_name.is_empty() {
        return Err(TransferError::InvalidFileName("empty name".into()));
    }

    if file_name.contains(['/', '\\']) {
        return Err(TransferError::InvalidFileName(format!(
            "path separator not allowed: {file_name}"
        )));
    }

    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(TransferError::InvalidFileName(format!(
            "not a bare file name: {file_name}"
        ))),
    }
}
