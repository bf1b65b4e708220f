//! Text document I/O used by the fragment store and prompt catalog.

use std::path::Path;
use std::time::SystemTime;

use crate::domain::AppError;

/// Port for reading and writing the markdown documents the pipeline consumes.
///
/// Paths are used as given; callers resolve them against their working root.
pub trait DocumentStore {
    /// Check whether a file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read(&self, path: &Path) -> Result<String, AppError>;

    /// Last modification time of a file.
    fn modified(&self, path: &Path) -> Result<SystemTime, AppError>;

    /// Replace a file's content in one step, creating parent directories as
    /// needed. Readers never observe a partially written file.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Copy `from` to `to`, overwriting `to`.
    fn copy(&self, from: &Path, to: &Path) -> Result<(), AppError>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> Result<String, AppError> {
        (**self).read(path)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, AppError> {
        (**self).modified(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<(), AppError> {
        (**self).write_atomic(path, content)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), AppError> {
        (**self).copy(from, to)
    }
}
