//! Persistence of the signed-in session.
//!
//! The session is stored as a small JSON document. Writes go through
//! [`crate::fs::write_atomic`], so a crash never leaves a half-written file,
//! and the file is only readable by its owner on Unix.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::fs::write_atomic;
use crate::model::Session;

/// File name used inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in an application data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Session` if the file exists but cannot be read
    /// or does not hold a session.
    pub fn load(&self) -> Result<Option<Session>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TrackerError::Session(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        let session: Session = serde_json::from_slice(&contents).map_err(|e| {
            TrackerError::Session(format!("corrupt session file {}: {}", self.path.display(), e))
        })?;
        if session.access.is_empty() {
            return Err(TrackerError::Session(format!(
                "session file {} has no access token",
                self.path.display()
            )));
        }
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let contents = serde_json::to_vec_pretty(session)?;
        write_atomic(&self.path, &contents).map_err(|e| {
            TrackerError::Session(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TrackerError::Session(format!(
                "cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
