//! Filesystem utilities for atomic writes of small state files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `contents` to `destination` through a sibling temp file.
///
/// The temp file is created next to the destination so the final rename
/// stays on one filesystem. On Unix the file is restricted to the owner
/// before any bytes are written.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the temp file
/// cannot be written, or the rename fails even after the fallback attempt.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_sibling(destination);
    {
        let mut file = fs::File::create(&temp_path)?;
        restrict_permissions(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    rename_with_fallback(&temp_path, destination)
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Windows refuses to rename over an existing file.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn temp_sibling(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "state".to_string());
    destination.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
