use std::path::PathBuf;

use http::HeaderMap;
use thiserror::Error;

/// Upload Error
#[derive(Debug, Error)]
pub enum Error {
    /// IO Error
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// Destination exists and overwriting is disabled
    #[error("`{}` already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// Writing a file of the field failed
    #[error("`{field}`: {source}")]
    Write {
        /// The name of the field the file was submitted under.
        field: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Gets the field name of a failed write.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Write { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A breached upload limit.
///
/// Violations are data, not faults: the caller decides how to answer the
/// request.
#[derive(Debug, Clone, Error)]
pub enum Violation {
    /// Files too many
    #[error("files are too many, `{count}` > limit `{max}`")]
    CountExceeded {
        /// Number of files in the request.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Sum of all file sizes is too large
    #[error("payload is too large, `{size}` bytes > limit `{max}` bytes")]
    AggregateSizeExceeded {
        /// Sum of the declared sizes.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// One file is too large
    #[error("file is too large, `{field}` = `{filename}` ({size} bytes) > limit `{max}` bytes")]
    PerFileSizeExceeded {
        /// The field name.
        field: String,
        /// The original filename.
        filename: String,
        /// The declared size.
        size: u64,
        /// Configured maximum.
        max: u64,
        /// The part headers of the file.
        headers: HeaderMap,
    },

    /// Same filename submitted more than once
    #[error("file `{filename}` is duplicate")]
    DuplicateFilename {
        /// The repeated filename.
        filename: String,
    },
}

impl Violation {
    /// Gets the field name, when the violation concerns a single file.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::PerFileSizeExceeded { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Gets the filename, when the violation concerns a single file.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::PerFileSizeExceeded { filename, .. } | Self::DuplicateFilename { filename } => {
                Some(filename)
            }
            _ => None,
        }
    }
}
