//! Accessor over a raw tile entity record.

use mc_nbt::NbtCompound;

use crate::BlockPos;

/// A tile entity as stored in a chunk.
///
/// Wraps the raw compound so callers never touch the save format
/// directly. All accessors return `None` when the field is missing or
/// has the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TileEntity {
    nbt: NbtCompound,
}

impl TileEntity {
    #[must_use]
    pub fn new(nbt: NbtCompound) -> Self {
        Self { nbt }
    }

    /// Type identifier, e.g. `TileEntityBarrel` or `turtle`.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.nbt.get_str("id")
    }

    /// Block position from the integer `x`/`y`/`z` fields.
    #[must_use]
    pub fn position(&self) -> Option<BlockPos> {
        Some(BlockPos::new(
            self.nbt.get_int("x")?,
            self.nbt.get_int("y")?,
            self.nbt.get_int("z")?,
        ))
    }

    /// Item held by a storage container, as `<id>:<damage>`.
    ///
    /// Reads `storage.current_item`. The item id may be numeric (older
    /// saves) or a namespaced string; a missing `Damage` counts as 0.
    #[must_use]
    pub fn stored_item(&self) -> Option<String> {
        let item = self.nbt.get_compound("storage")?.get_compound("current_item")?;
        let id = item.get("id")?;
        let damage = item.get_long("Damage").unwrap_or(0);
        Some(format!("{id}:{damage}"))
    }

    /// ComputerCraft `computerID` of a computer or turtle.
    #[must_use]
    pub fn computer_id(&self) -> Option<i32> {
        self.nbt.get_int("computerID")
    }

    /// The raw record.
    #[must_use]
    pub fn nbt(&self) -> &NbtCompound {
        &self.nbt
    }
}

impl From<NbtCompound> for TileEntity {
    fn from(nbt: NbtCompound) -> Self {
        Self::new(nbt)
    }
}
