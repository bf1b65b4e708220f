use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::AppError;
use crate::ports::DocumentStore;

/// In-memory document store that counts reads.
///
/// Every write advances a logical clock so modify-times are deterministic.
#[derive(Default)]
pub struct MemoryDocumentStore {
    files: RefCell<HashMap<PathBuf, (String, SystemTime)>>,
    reads: Cell<usize>,
    clock: Cell<u64>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

#[allow(dead_code)]
impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.set_file(path, content);
        self
    }

    /// Create or replace a file, advancing its modify-time.
    pub fn set_file(&self, path: impl AsRef<Path>, content: &str) {
        let modified = self.tick();
        self.files.borrow_mut().insert(path.as_ref().to_path_buf(), (content.to_string(), modified));
    }

    /// Advance a file's modify-time without changing its content.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let modified = self.tick();
        if let Some(entry) = self.files.borrow_mut().get_mut(path.as_ref()) {
            entry.1 = modified;
        }
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).map(|(content, _)| content.clone())
    }

    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn tick(&self) -> SystemTime {
        let next = self.clock.get() + 1;
        self.clock.set(next);
        UNIX_EPOCH + Duration::from_secs(next)
    }
}

fn not_found(path: &Path) -> AppError {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())).into()
}

impl DocumentStore for MemoryDocumentStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, AppError> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied").into());
        }
        self.content(path).ok_or_else(|| not_found(path))
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, AppError> {
        self.files.borrow().get(path).map(|(_, modified)| *modified).ok_or_else(|| not_found(path))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError> {
        if self.fail_writes.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied").into());
        }
        self.set_file(path, content);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), AppError> {
        if self.fail_writes.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied").into());
        }
        let content = self.content(from).ok_or_else(|| not_found(from))?;
        self.set_file(to, &content);
        Ok(())
    }
}
