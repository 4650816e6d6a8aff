//! Atomic file replacement through `tempfile`.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace the file at `path` with `content` in one rename.
///
/// The temp file is created next to the target so the rename stays on one
/// filesystem. It is removed again if writing or renaming fails, and readers
/// only ever see the old or the new document.
///
/// # Errors
///
/// Returns an `io::Error` if `path` has no parent directory, the temp file
/// cannot be created or written, or the rename fails.
pub async fn atomic_write(path: &Path, content: String) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new(".").to_path_buf(),
        Some(parent) => parent.to_path_buf(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };
    let target = path.to_path_buf();

    // tempfile is blocking
    tokio::task::spawn_blocking(move || -> io::Result<()> {
        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(&target)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}
