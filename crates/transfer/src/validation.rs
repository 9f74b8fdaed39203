use std::path::Path;

use crate::TransferError;

/// Checks that `path` names a readable regular file and returns its size.
///
/// Rejects:
/// - Empty paths
/// - Paths that do not exist
/// - Directories and other non-regular files
pub fn validate_source_file(path: &Path) -> Result<u64, TransferError> {
    if path.as_os_str().is_empty() {
        return Err(TransferError::InvalidSource("empty path".into()));
    }

    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            TransferError::InvalidSource(format!("file not found: {}", path.display()))
        }
        _ => TransferError::Io(e),
    })?;

    if !meta.is_file() {
        return Err(TransferError::InvalidSource(format!(
            "not a regular file: {}",
            path.display()
        )));
    }

    Ok(meta.len())
}
