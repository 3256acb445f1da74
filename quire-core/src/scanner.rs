use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A page source file and its text.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub path: PathBuf,
    pub content: String,
}

pub struct PageScanner {
    pages_dir: PathBuf,
}

impl PageScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            pages_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Every file under the pages directory, recursively, in sorted order.
    pub fn scan(&self) -> Result<Vec<SourcePage>, ScanError> {
        info!("Scanning: {}", self.pages_dir.display());

        let mut pages = Vec::new();
        for entry in WalkDir::new(&self.pages_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let content = std::fs::read_to_string(&path).map_err(|source| ScanError::Io {
                path: path.clone(),
                source,
            })?;
            pages.push(SourcePage { path, content });
        }

        Ok(pages)
    }
}
