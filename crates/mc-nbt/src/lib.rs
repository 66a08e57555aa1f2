//! NBT (Named Binary Tag) support for Minecraft save files.
//!
//! Save files (`level.dat`, region chunks) store a single named root
//! compound. This crate decodes that format into an owned tree and can
//! encode the same tree back, which is how test fixtures are produced.
//!
//! Decompression (gzip / zlib) is left to the caller: pass a reader that
//! already yields raw tag bytes.

mod error;
mod read;
mod value;
mod write;

pub use error::{NbtError, Result};
pub use read::{MAX_DEPTH, read_named, read_root};
pub use value::{NbtCompound, NbtList, NbtValue};

/// NBT tag type IDs
pub(crate) mod tag_type {
    pub const END: u8 = 0;
    pub const BYTE: u8 = 1;
    pub const SHORT: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const BYTE_ARRAY: u8 = 7;
    pub const STRING: u8 = 8;
    pub const LIST: u8 = 9;
    pub const COMPOUND: u8 = 10;
    pub const INT_ARRAY: u8 = 11;
    pub const LONG_ARRAY: u8 = 12;
}

/// Macro for building NBT compounds ergonomically
///
/// # Example
/// ```
/// use mc_nbt::nbt;
///
/// let compound = nbt! {
///     "id" => "TileEntityBarrel",
///     "x" => 42i32,
///     "storage" => nbt! {
///         "current_item" => nbt! { "id" => 4i16, "Damage" => 0i16 },
///     },
/// };
/// assert_eq!(compound.get_int("x"), Some(42));
/// ```
#[macro_export]
macro_rules! nbt {
    // Empty compound
    () => {
        $crate::NbtCompound::new()
    };

    // Compound with entries
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut compound = $crate::NbtCompound::new();
        $(
            compound.insert($key, $value);
        )*
        compound
    }};
}
