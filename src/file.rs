//! File service — the only place n-pad touches the disk.
//!
//! Loading hands back raw bytes; decoding is the document model's job. Very
//! large files ask before they are read.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("opening {} was cancelled", .0.display())]
    Cancelled(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read the whole file at `path`.
///
/// When `threshold > 0` and the file is at least `threshold` bytes,
/// `confirm(len)` decides whether to go on; `false` gives
/// [`FileError::Cancelled`].
pub fn load(
    path: &Path,
    threshold: u64,
    confirm: impl FnOnce(u64) -> bool,
) -> Result<Vec<u8>, FileError> {
    let meta = fs::metadata(path).map_err(|e| FileError::io(path, e))?;
    if !meta.is_file() {
        return Err(FileError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    let len = meta.len();
    if threshold > 0 && len >= threshold && !confirm(len) {
        debug!("declined to open {} ({len} bytes)", path.display());
        return Err(FileError::Cancelled(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| FileError::io(path, e))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Write `bytes` to `path`, creating missing parent directories, and flush
/// them to the device.
pub fn save(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| FileError::io(dir, e))?;
    }

    let mut file = fs::File::create(path).map_err(|e| FileError::io(path, e))?;
    file.write_all(bytes).map_err(|e| FileError::io(path, e))?;
    file.sync_all().map_err(|e| FileError::io(path, e))?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
