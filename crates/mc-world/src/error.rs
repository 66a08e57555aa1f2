//! World access error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// World access error type.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The save directory has no `level.dat`.
    #[error("could not find level.dat at {}", .0.display())]
    LevelNotFound(PathBuf),

    /// IO error on a specific file.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file that must decode (level.dat) did not.
    #[error("invalid NBT in {}: {source}", .path.display())]
    Nbt {
        path: PathBuf,
        #[source]
        source: mc_nbt::NbtError,
    },
}

impl WorldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for world access.
pub type Result<T> = std::result::Result<T, WorldError>;
