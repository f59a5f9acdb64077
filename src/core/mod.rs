//! Core error types.
//!
//! - [`file_error`]: file system errors that carry the operation and path.
//! - [`error`]: [`PlatepipeError`], the error returned by a whole run, with
//!   exit code classification and stderr reporting.

pub mod error;
pub mod file_error;

pub use error::{EXIT_FAILURE, EXIT_USAGE, PlatepipeError};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
