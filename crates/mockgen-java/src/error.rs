//! Error types for the Java adapter.

use thiserror::Error;

use mockgen_core::error::MockgenError;
use mockgen_core::text::byte_offset_to_position;
use mockgen_core::types::Location;

use crate::files::FileError;
use crate::parser::SyntaxError;

/// Errors raised while loading Java sources.
#[derive(Debug, Error)]
pub enum JavaError {
    /// A source file failed to parse.
    #[error("{location}: {message}")]
    Parse { location: Location, message: String },

    /// A source root or file could not be read.
    #[error(transparent)]
    File(#[from] FileError),
}

/// Result type for Java adapter operations.
pub type JavaResult<T> = Result<T, JavaError>;

impl JavaError {
    /// Attach a file path and line/column to a syntax error.
    pub fn parse(path: &str, source: &str, err: SyntaxError) -> Self {
        let (line, col) = byte_offset_to_position(source, err.offset);
        JavaError::Parse {
            location: Location::new(path, line, col),
            message: err.message,
        }
    }
}

impl From<JavaError> for MockgenError {
    fn from(err: JavaError) -> Self {
        match err {
            JavaError::Parse { location, message } => MockgenError::Parse { location, message },
            JavaError::File(FileError::NotFound { path }) => MockgenError::file_not_found(path),
            JavaError::File(FileError::Io(e)) => MockgenError::internal(format!("IO error: {}", e)),
        }
    }
}
