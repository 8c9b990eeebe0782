//! All-or-nothing output writes.
//!
//! Every artifact is staged into a temp file beside its target before any
//! target is touched. Targets are then replaced one by one; if a later
//! target cannot be read or replaced, earlier targets are restored to their
//! previous contents (or removed if they did not exist).

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DeclError, Result};

/// A file to be written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn stage(artifact: &Artifact) -> Result<NamedTempFile> {
    let dir = parent_dir(&artifact.path);
    fs::create_dir_all(&dir).map_err(|e| DeclError::Io {
        path: dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut file = NamedTempFile::new_in(&dir).map_err(|e| DeclError::Io {
        path: artifact.path.clone(),
        message: format!("Failed to stage output: {}", e),
    })?;
    file.write_all(artifact.contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| DeclError::Io {
            path: artifact.path.clone(),
            message: format!("Failed to stage output: {}", e),
        })?;
    Ok(file)
}

fn restore(path: &Path, previous: Option<&[u8]>) -> std::io::Result<()> {
    match previous {
        Some(bytes) => fs::write(path, bytes),
        None => fs::remove_file(path),
    }
}

/// Current contents of a target, `None` if it does not exist yet.
fn read_previous(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Put replaced targets back and build the error for the failed write.
fn rollback(replaced: &[(&Artifact, Option<Vec<u8>>)], mut message: String) -> DeclError {
    for (done, before) in replaced {
        if let Err(e) = restore(&done.path, before.as_deref()) {
            message.push_str(&format!("; could not restore {}: {}", done.path.display(), e));
        }
    }

    DeclError::Persist {
        message,
        help: Some("Earlier outputs were rolled back to their previous contents".to_string()),
    }
}

/// Write every artifact or none of them.
///
/// Failures are collapsed into a single [`DeclError::Persist`].
pub fn persist_all(artifacts: &[Artifact]) -> Result<()> {
    let staged = artifacts
        .iter()
        .map(stage)
        .collect::<Result<Vec<_>>>()
        .map_err(|e| DeclError::Persist {
            message: format!("nothing was written: {}", e),
            help: Some("Check that the output directories are writable".to_string()),
        })?;

    let mut replaced = Vec::with_capacity(artifacts.len());
    for (artifact, temp) in artifacts.iter().zip(staged) {
        let previous = match read_previous(&artifact.path) {
            Ok(previous) => previous,
            Err(e) => {
                let message = format!("failed to read {}: {}", artifact.path.display(), e);
                return Err(rollback(&replaced, message));
            }
        };

        if let Err(e) = temp.persist(&artifact.path) {
            let message = format!("failed to replace {}: {}", artifact.path.display(), e.error);
            return Err(rollback(&replaced, message));
        }
        replaced.push((artifact, previous));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_all() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("nested/b.txt");

        persist_all(&[Artifact::new(&a, "alpha"), Artifact::new(&b, "beta")]).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(&b).unwrap(), "beta");
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "old").unwrap();

        persist_all(&[Artifact::new(&a, "new")]).unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "new");
    }

    #[test]
    fn test_staging_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "old").unwrap();
        // A regular file where a directory is needed.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = persist_all(&[
            Artifact::new(&a, "new"),
            Artifact::new(blocker.join("b.txt"), "beta"),
        ])
        .unwrap_err();

        assert!(matches!(err, DeclError::Persist { .. }));
        assert_eq!(fs::read_to_string(&a).unwrap(), "old");
    }

    #[test]
    fn test_replace_failure_rolls_back() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "old").unwrap();
        // Replacing a non-empty directory with a file fails.
        let b = dir.path().join("b");
        fs::create_dir_all(b.join("inside")).unwrap();

        let err = persist_all(&[Artifact::new(&a, "new"), Artifact::new(&b, "beta")]).unwrap_err();

        assert!(matches!(err, DeclError::Persist { .. }));
        assert_eq!(fs::read_to_string(&a).unwrap(), "old");
    }

    #[test]
    fn test_rollback_removes_new_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("fresh.txt");
        let b = dir.path().join("b");
        fs::create_dir_all(b.join("inside")).unwrap();

        assert!(persist_all(&[Artifact::new(&a, "new"), Artifact::new(&b, "beta")]).is_err());
        assert!(!a.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_target_is_never_removed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "keep").unwrap();
        fs::set_permissions(&a, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&a).is_ok() {
            // Running with privileges that ignore file modes.
            return;
        }
        let b = dir.path().join("b");
        fs::create_dir_all(b.join("inside")).unwrap();

        let err = persist_all(&[Artifact::new(&a, "new"), Artifact::new(&b, "beta")]).unwrap_err();
        assert!(matches!(err, DeclError::Persist { .. }));

        fs::set_permissions(&a, fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "keep");
    }
}
