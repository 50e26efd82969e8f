use std::path::PathBuf;
use std::time::SystemTimeError;

use thiserror::Error;

/// The primary error type for all operations in the `layerpack` crate.
///
/// A build either produces a fully valid layer or fails with one of these;
/// there is no partial-success mode and the crate never retries internally.
#[derive(Debug, Error)]
pub enum PackError {
    /// An I/O error occurred, typically while reading a source file or
    /// writing to an output sink. Includes the path where the error happened
    /// when one is known.
    #[error("I/O error on path '{path}': {source}", path = .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// An error occurred when trying to strip the root prefix from a file
    /// path while computing its archive-relative name.
    #[error("could not strip prefix '{prefix}' from path '{path}'", prefix = .prefix.display(), path = .path.display())]
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// An entry mapping key was not a relative path.
    #[error("archive entry path is not relative: '{0}'")]
    NonRelativePath(String),

    /// An ignore pattern failed to compile.
    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// A system time error, which can occur when reading file metadata with
    /// a modification time before the Unix epoch.
    #[error("system time error: {0}")]
    SystemTime(#[from] SystemTimeError),
}

impl PackError {
    /// Attach a path to a raw I/O error.
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PackError::Io {
            source,
            path: path.into(),
        }
    }
}

// Generic IO error conversion that doesn't carry a path
impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::Io {
            source: err,
            path: PathBuf::new(),
        }
    }
}
