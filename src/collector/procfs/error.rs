//! Error type shared by the `/proc` and `/sys` collectors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::collector::procfs::parser::ParseError;

/// Error type for collection failures.
///
/// The first failure aborts the whole snapshot; no partial snapshot is
/// ever returned alongside it.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A source file or directory could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A required value in a source file is missing or malformed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl CollectError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }

    /// Kind of the underlying I/O error, for read failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Read { source, .. } => Some(source.kind()),
            Self::Parse { .. } => None,
        }
    }

    /// OS error code of the underlying I/O error, for read failures.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Read { source, .. } => source.raw_os_error(),
            Self::Parse { .. } => None,
        }
    }

    /// The parse failure, for parse errors.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Read { .. } => None,
        }
    }
}
