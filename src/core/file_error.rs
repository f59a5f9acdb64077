//! Structured file system errors.
//!
//! File operations capture the path and the kind of operation at the call
//! site, so messages name the file without parsing I/O error text.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Types of file operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Opening a file for reading
    Open,
    /// Reading a file or stream completely
    Read,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Open => write!(f, "open"),
            FileOperation::Read => write!(f, "read"),
        }
    }
}

/// File operation error with the path that was being accessed
#[derive(Error, Debug)]
#[error("{operation} {}: {}", .file_path.display(), describe_io_error(.source))]
pub struct FileOperationError {
    /// The type of operation that failed
    pub operation: FileOperation,
    /// The file path that was being accessed
    pub file_path: PathBuf,
    /// The underlying IO error
    #[source]
    pub source: std::io::Error,
}

impl FileOperationError {
    /// Create a new file operation error
    pub fn new(operation: FileOperation, file_path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self {
            operation,
            file_path: file_path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the file did not exist
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Short, lowercase description of an I/O error for one-line messages.
///
/// Common kinds get a fixed phrase; anything else falls back to the error's
/// own text.
fn describe_io_error(error: &std::io::Error) -> String {
    match error.kind() {
        std::io::ErrorKind::NotFound => "no such file or directory".to_string(),
        std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        std::io::ErrorKind::IsADirectory => "is a directory".to_string(),
        _ => error.to_string(),
    }
}

/// Extension trait for Result types to add file operation context
pub trait FileResultExt<T> {
    /// Attach the operation and path to an I/O error
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl AsRef<Path>,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for Result<T, std::io::Error> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl AsRef<Path>,
    ) -> Result<T, FileOperationError> {
        self.map_err(|io_error| FileOperationError::new(operation, file_path, io_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_message() {
        let err = FileOperationError::new(
            FileOperation::Open,
            "non-existent-file.md",
            io::Error::new(io::ErrorKind::NotFound, "os says no"),
        );

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "open non-existent-file.md: no such file or directory");
    }

    #[test]
    fn test_other_errors_use_their_text() {
        let err = FileOperationError::new(
            FileOperation::Read,
            "doc.txt",
            io::Error::other("device on fire"),
        );

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "read doc.txt: device on fire");
    }

    #[test]
    fn test_with_file_context() {
        let result: Result<(), io::Error> = Err(io::Error::from(io::ErrorKind::PermissionDenied));
        let err = result.with_file_context(FileOperation::Open, "page.html").unwrap_err();

        assert_eq!(err.operation, FileOperation::Open);
        assert_eq!(err.to_string(), "open page.html: permission denied");
    }
}
