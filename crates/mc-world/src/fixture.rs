//! Synthetic save directories for tests.
//!
//! ```ignore
//! let dir = tempfile::tempdir()?;
//! SaveBuilder::new("Test")
//!     .tile_entity(nbt! { "id" => "turtle", "x" => 0i32, "y" => 64i32, "z" => 0i32 })
//!     .write(dir.path())?;
//! let world = AnvilWorld::open(dir.path())?;
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use flate2::Compression as Level;
use flate2::write::{GzEncoder, ZlibEncoder};
use mc_nbt::{NbtCompound, nbt};

use crate::region::{REGION_CHUNKS, SECTOR_BYTES};
use crate::{ChunkPos, Compression, TileEntity};

enum ChunkBody {
    /// Legacy layout, `Level.TileEntities`.
    Legacy(Vec<NbtCompound>),
    /// Modern layout, top-level `block_entities`.
    Modern(Vec<NbtCompound>),
    /// Payload written verbatim with the given scheme id.
    Raw(u8, Vec<u8>),
}

/// Builds a save directory with `level.dat` and region files.
pub struct SaveBuilder {
    level_name: String,
    modern: bool,
    extension: &'static str,
    compression: Compression,
    chunks: BTreeMap<ChunkPos, ChunkBody>,
}

impl SaveBuilder {
    #[must_use]
    pub fn new(level_name: &str) -> Self {
        Self {
            level_name: level_name.to_string(),
            modern: false,
            extension: "mca",
            compression: Compression::Zlib,
            chunks: BTreeMap::new(),
        }
    }

    /// Write chunks with top-level `block_entities`.
    #[must_use]
    pub fn modern(mut self) -> Self {
        self.modern = true;
        self
    }

    /// Write `.mcr` region files instead of `.mca`.
    #[must_use]
    pub fn mcregion(mut self) -> Self {
        self.extension = "mcr";
        self
    }

    #[must_use]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Add a tile entity to the chunk containing its `x`/`z`.
    #[must_use]
    pub fn tile_entity(mut self, nbt: NbtCompound) -> Self {
        let chunk = TileEntity::new(nbt.clone())
            .position()
            .map(ChunkPos::containing)
            .unwrap_or_default();
        let modern = self.modern;
        let body = self.chunks.entry(chunk).or_insert_with(|| {
            if modern {
                ChunkBody::Modern(Vec::new())
            } else {
                ChunkBody::Legacy(Vec::new())
            }
        });
        if let ChunkBody::Legacy(list) | ChunkBody::Modern(list) = body {
            list.push(nbt);
        }
        self
    }

    /// Add a populated chunk with no tile entities.
    #[must_use]
    pub fn empty_chunk(mut self, chunk: ChunkPos) -> Self {
        let body = if self.modern {
            ChunkBody::Modern(Vec::new())
        } else {
            ChunkBody::Legacy(Vec::new())
        };
        self.chunks.insert(chunk, body);
        self
    }

    /// Add a chunk whose payload is written verbatim.
    #[must_use]
    pub fn raw_chunk(mut self, chunk: ChunkPos, scheme: u8, payload: Vec<u8>) -> Self {
        self.chunks.insert(chunk, ChunkBody::Raw(scheme, payload));
        self
    }

    /// Write `level.dat` and region files under `dir`.
    pub fn write(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let level = nbt! {
            "Data" => nbt! {
                "LevelName" => self.level_name.as_str(),
                "version" => 19133i32,
            },
        };
        fs::write(dir.join("level.dat"), gzip(&level.to_bytes(""))?)?;

        if self.chunks.is_empty() {
            return Ok(());
        }

        let region_dir = dir.join("region");
        fs::create_dir_all(&region_dir)?;

        let mut regions: BTreeMap<(i32, i32), Vec<(ChunkPos, &ChunkBody)>> = BTreeMap::new();
        for (pos, body) in &self.chunks {
            regions
                .entry((pos.x.div_euclid(REGION_CHUNKS), pos.z.div_euclid(REGION_CHUNKS)))
                .or_default()
                .push((*pos, body));
        }

        for ((rx, rz), chunks) in regions {
            let bytes = self.encode_region(&chunks)?;
            let name = format!("r.{rx}.{rz}.{}", self.extension);
            fs::write(region_dir.join(name), bytes)?;
        }
        Ok(())
    }

    fn encode_region(&self, chunks: &[(ChunkPos, &ChunkBody)]) -> io::Result<Vec<u8>> {
        let sector = SECTOR_BYTES as usize;
        // Location and timestamp tables
        let mut out = vec![0u8; 2 * sector];

        for (pos, body) in chunks {
            let (scheme, payload) = match body {
                ChunkBody::Legacy(list) => {
                    let nbt = nbt! {
                        "Level" => nbt! {
                            "xPos" => pos.x,
                            "zPos" => pos.z,
                            "TileEntities" => list.clone(),
                        },
                    };
                    (self.compression.id(), self.compress(&nbt.to_bytes(""))?)
                }
                ChunkBody::Modern(list) => {
                    let nbt = nbt! {
                        "DataVersion" => 3465i32,
                        "xPos" => pos.x,
                        "zPos" => pos.z,
                        "block_entities" => list.clone(),
                    };
                    (self.compression.id(), self.compress(&nbt.to_bytes(""))?)
                }
                ChunkBody::Raw(scheme, payload) => (*scheme, payload.clone()),
            };

            let offset = out.len() / sector;
            out.extend_from_slice(&(payload.len() as u32 + 1).to_be_bytes());
            out.push(scheme);
            out.extend_from_slice(&payload);
            let padded = out.len().div_ceil(sector) * sector;
            out.resize(padded, 0);
            let sectors = padded / sector - offset;

            let local_x = pos.x.rem_euclid(REGION_CHUNKS);
            let local_z = pos.z.rem_euclid(REGION_CHUNKS);
            let index = (local_x + local_z * REGION_CHUNKS) as usize;
            let entry = ((offset as u32) << 8) | (sectors as u32 & 0xFF);
            out[index * 4..index * 4 + 4].copy_from_slice(&entry.to_be_bytes());
        }
        Ok(out)
    }

    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>> {
        match self.compression {
            Compression::Gzip => gzip(raw),
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Level::default());
                encoder.write_all(raw)?;
                encoder.finish()
            }
            Compression::None => Ok(raw.to_vec()),
        }
    }
}

fn gzip(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Level::default());
    encoder.write_all(raw)?;
    encoder.finish()
}
