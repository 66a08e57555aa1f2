//! NBT error types.

use std::io;

use thiserror::Error;

/// Errors raised while decoding NBT.
#[derive(Debug, Error)]
pub enum NbtError {
    /// Underlying reader failed (including unexpected EOF).
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Tag type byte outside the known range.
    #[error("invalid tag type: {0}")]
    InvalidTagType(u8),

    /// The root tag of a file must be a compound.
    #[error("root tag is not a compound (type {0})")]
    RootNotCompound(u8),

    /// Array or list with a negative length prefix.
    #[error("negative length: {0}")]
    NegativeLength(i32),

    /// Nesting exceeded [`crate::MAX_DEPTH`].
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// Result type for NBT operations.
pub type Result<T> = std::result::Result<T, NbtError>;
