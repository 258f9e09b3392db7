// K6LogView - platform/fs.rs
//
// Filesystem access for the loader. Keeps std::fs out of the core layer.

use crate::util::error::LoadError;
use std::io;
use std::path::Path;

/// Read the full content of a log file as a string.
///
/// Invalid UTF-8 sequences are replaced rather than rejected so a single bad
/// byte never prevents the rest of the file from being viewed.
pub fn read_file_lossy(path: &Path) -> Result<String, LoadError> {
    if path.is_dir() {
        return Err(LoadError::IsDirectory {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
