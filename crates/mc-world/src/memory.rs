//! In-memory world store.

use std::collections::BTreeMap;

use crate::{ChunkPos, Result, TileEntity, WorldStore};

/// Tile entities held in memory, grouped by chunk.
#[derive(Debug, Default, Clone)]
pub struct MemoryWorld {
    chunks: BTreeMap<ChunkPos, Vec<TileEntity>>,
}

impl MemoryWorld {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tile entity to the chunk containing its position. Entities
    /// without a position land in chunk `(0, 0)`.
    pub fn insert(&mut self, entity: impl Into<TileEntity>) {
        let entity = entity.into();
        let chunk = entity.position().map(ChunkPos::containing).unwrap_or_default();
        self.insert_in_chunk(chunk, entity);
    }

    /// Add a tile entity to a specific chunk.
    pub fn insert_in_chunk(&mut self, chunk: ChunkPos, entity: impl Into<TileEntity>) {
        self.chunks.entry(chunk).or_default().push(entity.into());
    }

    /// Total number of tile entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorldStore for MemoryWorld {
    fn chunks(&self) -> Result<Vec<ChunkPos>> {
        Ok(self.chunks.keys().copied().collect())
    }

    fn tile_entities(&self, chunk: ChunkPos) -> Result<Vec<TileEntity>> {
        Ok(self.chunks.get(&chunk).cloned().unwrap_or_default())
    }
}
