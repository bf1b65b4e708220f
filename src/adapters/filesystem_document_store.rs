//! `DocumentStore` backed by the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use crate::domain::AppError;
use crate::ports::DocumentStore;

/// Plain file I/O; writes go through a sibling temp file and a rename.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemDocumentStore;

impl FilesystemDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FilesystemDocumentStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String, AppError> {
        fs::read_to_string(path).map_err(AppError::from)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, AppError> {
        fs::metadata(path).and_then(|meta| meta.modified()).map_err(AppError::from)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = temp_path(path);
        fs::write(&temp, content)?;
        if let Err(err) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), AppError> {
        fs::copy(from, to).map(|_| ()).map_err(AppError::from)
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique per write, so concurrent writers never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.tmp-{}-{sequence}", process::id()))
}
