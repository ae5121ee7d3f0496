//! Rollback-capable output directory.
//!
//! [`OutputTransaction::begin`] creates the output root and spawns a watcher
//! thread blocked on a one-slot channel. [`OutputTransaction::rollback`] sends
//! the single signal and waits for the watcher to remove the whole tree;
//! [`OutputTransaction::commit`] closes the channel so the watcher exits
//! without touching anything. A transaction dropped without either rolls back.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, SyncSender};
use std::thread::{self, JoinHandle};

/// Creates a single directory with the standard `0o755` mode.
pub(crate) fn dir_builder(recursive: bool) -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
}

/// Output root guarded by a rollback watcher.
#[derive(Debug)]
pub struct OutputTransaction {
    root: PathBuf,
    signal: Option<SyncSender<()>>,
    watcher: Option<JoinHandle<io::Result<bool>>>,
}

impl OutputTransaction {
    /// Creates `root` and starts the rollback watcher.
    ///
    /// In dry mode nothing is created and no watcher is started.
    ///
    /// # Errors
    /// * `Error::OutputExists` if `root` is already present
    /// * `Error::IoFailure` if `root` cannot be created
    pub fn begin<P: AsRef<Path>>(root: P, dry_run: bool) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        info!("Output Path => {}", root.display());

        if dry_run {
            debug!("Dry run: output directory '{}' is not created", root.display());
            return Ok(Self { root, signal: None, watcher: None });
        }

        if root.exists() {
            return Err(Error::OutputExists { path: root.display().to_string() });
        }
        dir_builder(false).create(&root).map_err(|e| Error::io("create directory", &root, e))?;

        let (signal, receiver) = mpsc::sync_channel::<()>(1);
        let watched = root.clone();
        let watcher = thread::spawn(move || match receiver.recv() {
            Ok(()) => {
                info!("Invoked rollback - removing output folder '{}'...", watched.display());
                fs::remove_dir_all(&watched).map(|_| true)
            }
            // Sender dropped: the transaction was committed.
            Err(_) => Ok(false),
        });

        Ok(Self { root, signal: Some(signal), watcher: Some(watcher) })
    }

    /// Keeps the generated tree.
    pub fn commit(mut self) -> Result<()> {
        self.finish(false)
    }

    /// Removes the generated tree and waits until it is gone.
    pub fn rollback(mut self) -> Result<()> {
        self.finish(true)
    }

    fn finish(&mut self, rollback: bool) -> Result<()> {
        let Some(signal) = self.signal.take() else {
            return Ok(());
        };
        if rollback {
            // One-slot buffer, never blocks; a second signal is impossible
            // because the sender is consumed here.
            let _ = signal.send(());
        }
        drop(signal);

        let Some(watcher) = self.watcher.take() else {
            return Ok(());
        };
        match watcher.join() {
            Ok(Ok(removed)) => {
                if removed {
                    info!("Removed output folder '{}'", self.root.display());
                }
                Ok(())
            }
            Ok(Err(e)) => Err(Error::RollbackFailed {
                path: self.root.display().to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(Error::RollbackFailed {
                path: self.root.display().to_string(),
                reason: "rollback watcher panicked".to_string(),
            }),
        }
    }
}

impl Drop for OutputTransaction {
    fn drop(&mut self) {
        if self.signal.is_some() {
            warn!("Output transaction for '{}' was neither committed nor rolled back", self.root.display());
            if let Err(e) = self.finish(true) {
                warn!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_keeps_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("output");

        let transaction = OutputTransaction::begin(&root, false).unwrap();
        fs::write(root.join("file.txt"), "data").unwrap();
        transaction.commit().unwrap();

        assert!(root.join("file.txt").exists());
    }

    #[test]
    fn test_rollback_removes_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("output");

        let transaction = OutputTransaction::begin(&root, false).unwrap();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/file.txt"), "data").unwrap();
        transaction.rollback().unwrap();

        assert!(!root.exists());
    }

    #[test]
    fn test_drop_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("output");

        {
            let _transaction = OutputTransaction::begin(&root, false).unwrap();
            assert!(root.exists());
        }

        assert!(!root.exists());
    }

    #[test]
    fn test_existing_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = OutputTransaction::begin(temp_dir.path(), false);
        assert!(matches!(result, Err(Error::OutputExists { .. })));
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("output");

        let transaction = OutputTransaction::begin(&root, true).unwrap();
        transaction.rollback().unwrap();

        assert!(!root.exists());
    }
}
