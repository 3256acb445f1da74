use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl CopyError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        CopyError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Remove `path` and create it again, empty.
///
/// Failing to remove is only logged: the directory may not exist yet.
pub fn prepare_directory<P: AsRef<Path>>(path: P) -> Result<(), CopyError> {
    let path = path.as_ref();

    if let Err(e) = std::fs::remove_dir_all(path) {
        warn!("Could not clear {}: {}", path.display(), e);
    }

    std::fs::create_dir_all(path).map_err(|e| CopyError::io(path, e))
}

/// Copy every top-level entry of `from` into `to`, skipping names listed in
/// `ignore`. Returns how many entries were copied.
pub fn copy_prototype<P, Q>(from: P, to: Q, ignore: &[&str]) -> Result<usize, CopyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let from = from.as_ref();
    let to = to.as_ref();

    let mut entries = std::fs::read_dir(from)
        .map_err(|e| CopyError::io(from, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CopyError::io(from, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut copied = 0;
    for entry in entries {
        let name = entry.file_name();
        if ignore.iter().any(|ignored| name == *ignored) {
            continue;
        }

        let source = entry.path();
        let target = to.join(&name);
        if source.is_dir() {
            copy_tree(&source, &target)?;
        } else {
            std::fs::copy(&source, &target).map_err(|e| CopyError::io(&source, e))?;
        }

        info!("Copying tree: {}", name.to_string_lossy());
        copied += 1;
    }

    Ok(copied)
}

/// Mirror the directory `from` at `to`, creating directories as needed and
/// overwriting files that already exist.
pub fn copy_tree<P, Q>(from: P, to: Q) -> Result<(), CopyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let from = from.as_ref();
    let to = to.as_ref();

    for entry in WalkDir::new(from) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| CopyError::InvalidPath(entry.path().to_path_buf()))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| CopyError::io(&target, e))?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|e| CopyError::io(entry.path(), e))?;
        }
    }

    Ok(())
}
