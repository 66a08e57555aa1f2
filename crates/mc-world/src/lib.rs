//! Read-only access to Minecraft world saves.
//!
//! Consumers see a world through two narrow capabilities:
//!
//! - [`WorldStore`]: enumerate populated chunks, list a chunk's tile
//!   entities, and look up the tile entity at an exact block position.
//! - [`TileEntity`]: type id, position, stored item and computer id of a
//!   single tile entity record.
//!
//! [`AnvilWorld`] implements the store over a save directory on disk
//! (`level.dat` plus `region/r.<x>.<z>.mca|mcr`). [`MemoryWorld`] keeps
//! tile entities in memory.
//!
//! # Region layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Region file (32 × 32 chunks)                                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  0x0000  locations: 1024 × u32  (offset:24 | sectors:8)       │
//! │  0x1000  timestamps: 1024 × u32                               │
//! │  0x2000  sectors of 4 KiB, chunk at offset × 4096:            │
//! │            u32 length, u8 compression, NBT payload            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod anvil;
mod error;
mod memory;
mod region;
mod tile_entity;

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;

pub use anvil::AnvilWorld;
pub use error::{Result, WorldError};
pub use memory::MemoryWorld;
pub use region::{Compression, RegionFile};
pub use tile_entity::TileEntity;

/// Chunk coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk containing a block position.
    #[must_use]
    pub const fn containing(pos: BlockPos) -> Self {
        Self::new(pos.x >> 4, pos.z >> 4)
    }
}

/// Absolute block coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// `None` if any coordinate leaves the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        match (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) {
            (Some(x), Some(y), Some(z)) => Some(Self::new(x, y, z)),
            _ => None,
        }
    }
}

/// Read-only view of a world's tile entities.
pub trait WorldStore {
    /// Every chunk that has data in the save.
    fn chunks(&self) -> Result<Vec<ChunkPos>>;

    /// Tile entities stored in one chunk. Absent chunks have none.
    fn tile_entities(&self, chunk: ChunkPos) -> Result<Vec<TileEntity>>;

    /// The tile entity at exactly `pos`, if any.
    fn entity_at(&self, pos: BlockPos) -> Result<Option<TileEntity>> {
        let entities = self.tile_entities(ChunkPos::containing(pos))?;
        Ok(entities.into_iter().find(|t| t.position() == Some(pos)))
    }
}

impl<W: WorldStore + ?Sized> WorldStore for &W {
    fn chunks(&self) -> Result<Vec<ChunkPos>> {
        (**self).chunks()
    }

    fn tile_entities(&self, chunk: ChunkPos) -> Result<Vec<TileEntity>> {
        (**self).tile_entities(chunk)
    }

    fn entity_at(&self, pos: BlockPos) -> Result<Option<TileEntity>> {
        (**self).entity_at(pos)
    }
}
