//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Local error type. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    /// Chapter name is empty or whitespace-only.
    #[error("Chapter name cannot be empty (prefix '{prefix}')")]
    EmptyName { prefix: String },

    /// Chapter text is absent, as opposed to empty.
    #[error("Chapter text cannot be absent for '{0}'")]
    MissingText(String),

    /// Two chapters resolve to the same identifier.
    #[error("Multiple chapters named {0}")]
    DuplicateChapter(String),

    /// The structure file names the same chapter twice.
    #[error("Duplicate chapter name {id} at structure line {line}")]
    DuplicateReference { id: String, line: usize },

    /// The structure file names a chapter that no batch provides.
    #[error("Chapter not found: {id} at structure line {line}")]
    ChapterNotFound { id: String, line: usize },

    /// A batch file was given more than once.
    #[error("Duplicate chapter batch {}", .0.display())]
    DuplicateSourceFile(PathBuf),

    /// A batch file could not be found.
    #[error("File not found: {}", .0.display())]
    SourceFileNotFound(PathBuf),

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for Error {
    fn from(e: String) -> Error {
        Self::Config(e)
    }
}

/// Result type alias for book building operations.
pub type Result<T> = std::result::Result<T, Error>;
