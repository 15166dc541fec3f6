//! Ephemeral file management for render calls.
//! Every artifact a render call stages (source, data, config, output)
//! lives in the configured temp directory under a collision-resistant
//! random name and is removed before the call returns, on success and
//! failure paths alike.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Generates temp artifact paths inside one configured directory.
///
/// Basenames are 20 random bytes hex-encoded, which makes collisions
/// between concurrent calls on the same instance negligible without any
/// locking.
#[derive(Debug, Clone)]
pub struct TempFiles {
    dir: PathBuf,
}

impl TempFiles {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Returns a fresh path inside the temp directory. Nothing is
    /// created on disk.
    pub fn new_path(&self) -> PathBuf {
        let bytes: [u8; 20] = rand::random();
        self.dir.join(hex::encode(bytes))
    }

    /// Starts a scope that deletes every tracked path when dropped.
    pub fn guard(&self) -> CleanupGuard {
        CleanupGuard { paths: Vec::new() }
    }
}

/// Writes an artifact as UTF-8 text.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    Ok(())
}

/// Reads an artifact back as UTF-8 text.
pub fn read_artifact(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Deletes each path that still exists, ignoring already-missing files.
/// Idempotent and infallible by contract.
pub fn cleanup(paths: &[PathBuf]) {
    for path in paths {
        if path.exists() {
            if let Err(e) = fs::remove_file(path) {
                debug!("Failed to remove temp file {}: {}", path.display(), e);
            }
        }
    }
}

/// Scoped release for temp artifacts.
///
/// Replaces callback-chained cleanup: the guard is dropped on every exit
/// path of a render call, including `?`-propagated errors mid-pipeline.
#[derive(Debug)]
pub struct CleanupGuard {
    paths: Vec<PathBuf>,
}

impl CleanupGuard {
    /// Registers a path for deletion at scope exit and hands it back.
    pub fn track(&mut self, path: PathBuf) -> PathBuf {
        self.paths.push(path.clone());
        path
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        cleanup(&self.paths);
    }
}
