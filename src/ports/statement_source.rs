use crate::domain::AppError;

/// Read-only access to loaded fragments.
pub trait StatementSource {
    /// Content of the fragment `key`, or an empty string for unknown keys.
    ///
    /// Fails when the backing store has not been loaded.
    fn statement(&self, key: &str) -> Result<String, AppError>;
}

impl<T: StatementSource + ?Sized> StatementSource for &T {
    fn statement(&self, key: &str) -> Result<String, AppError> {
        (**self).statement(key)
    }
}
