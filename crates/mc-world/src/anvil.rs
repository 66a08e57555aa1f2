//! World store over a save directory on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mc_nbt::NbtCompound;
use tracing::{debug, info, warn};

use crate::region::REGION_CHUNKS;
use crate::{ChunkPos, Compression, RegionFile, Result, TileEntity, WorldError, WorldStore};

/// A save directory: `level.dat` plus the overworld `region/` files.
#[derive(Debug)]
pub struct AnvilWorld {
    root: PathBuf,
    level: NbtCompound,
    regions: BTreeMap<(i32, i32), RegionFile>,
}

impl AnvilWorld {
    /// Open a save directory.
    ///
    /// Fails if `level.dat` is missing or does not decode. A save without a
    /// `region/` directory opens as an empty world.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let level_path = root.join("level.dat");
        if !level_path.is_file() {
            return Err(WorldError::LevelNotFound(level_path));
        }

        let bytes = fs::read(&level_path).map_err(|e| WorldError::io(&level_path, e))?;
        let level = Compression::Gzip
            .decode(&bytes)
            .map_err(|source| WorldError::Nbt {
                path: level_path.clone(),
                source,
            })?;

        if let Some(name) = level.get_compound("Data").and_then(|d| d.get_str("LevelName")) {
            info!("Opened level '{}' at {}", name, root.display());
        } else {
            info!("Opened level at {}", root.display());
        }

        let regions = Self::discover_regions(&root.join("region"))?;
        debug!("Found {} region files", regions.len());

        Ok(Self {
            root,
            level,
            regions,
        })
    }

    /// Index region files by coordinates. `.mca` wins over `.mcr` for the
    /// same region.
    fn discover_regions(dir: &Path) -> Result<BTreeMap<(i32, i32), RegionFile>> {
        let mut paths: BTreeMap<(i32, i32), PathBuf> = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(BTreeMap::new());
        }

        for entry in fs::read_dir(dir).map_err(|e| WorldError::io(dir, e))? {
            let entry = entry.map_err(|e| WorldError::io(dir, e))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(coords) = RegionFile::parse_name(name) else {
                debug!("Ignoring {}", path.display());
                continue;
            };
            let shadowed = !name.ends_with(".mca")
                && paths
                    .get(&coords)
                    .is_some_and(|p| p.extension().is_some_and(|e| e == "mca"));
            if !shadowed {
                paths.insert(coords, path);
            }
        }

        paths
            .into_iter()
            .map(|((x, z), path)| RegionFile::open(path, x, z).map(|region| ((x, z), region)))
            .collect()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decoded `level.dat` root.
    #[must_use]
    pub fn level(&self) -> &NbtCompound {
        &self.level
    }

    fn region_for(&self, chunk: ChunkPos) -> Option<&RegionFile> {
        self.regions.get(&(
            chunk.x.div_euclid(REGION_CHUNKS),
            chunk.z.div_euclid(REGION_CHUNKS),
        ))
    }
}

/// Tile entity list of a decoded chunk: legacy `Level.TileEntities` or
/// modern top-level `block_entities`.
fn chunk_tile_entities(chunk: &NbtCompound) -> Vec<TileEntity> {
    let list = chunk
        .get_compound("Level")
        .and_then(|level| level.get_list("TileEntities"))
        .or_else(|| chunk.get_list("block_entities"));

    list.map(|l| l.compounds().iter().cloned().map(TileEntity::new).collect())
        .unwrap_or_default()
}

impl WorldStore for AnvilWorld {
    fn chunks(&self) -> Result<Vec<ChunkPos>> {
        Ok(self.regions.values().flat_map(|region| region.chunks()).collect())
    }

    fn tile_entities(&self, chunk: ChunkPos) -> Result<Vec<TileEntity>> {
        let Some(region) = self.region_for(chunk) else {
            return Ok(Vec::new());
        };

        match region.read_chunk(chunk) {
            Ok(Some(nbt)) => Ok(chunk_tile_entities(&nbt)),
            Ok(None) => Ok(Vec::new()),
            Err(e) => {
                warn!(
                    "Skipping chunk ({}, {}) in {}: {}",
                    chunk.x,
                    chunk.z,
                    region.path().display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mc_nbt::nbt;

    use super::*;

    #[test]
    fn test_legacy_tile_entities() {
        let chunk = nbt! {
            "Level" => nbt! {
                "xPos" => 0i32,
                "zPos" => 0i32,
                "TileEntities" => vec![nbt! { "id" => "TileEntityBarrel" }],
            },
        };
        let entities = chunk_tile_entities(&chunk);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind(), Some("TileEntityBarrel"));
    }

    #[test]
    fn test_modern_block_entities() {
        let chunk = nbt! {
            "DataVersion" => 3465i32,
            "block_entities" => vec![
                nbt! { "id" => "minecraft:barrel" },
                nbt! { "id" => "computercraft:turtle_normal" },
            ],
        };
        assert_eq!(chunk_tile_entities(&chunk).len(), 2);
    }

    #[test]
    fn test_chunk_without_entities() {
        let chunk = nbt! { "Level" => nbt! { "Sections" => vec![nbt! {}] } };
        assert!(chunk_tile_entities(&chunk).is_empty());
    }
}
