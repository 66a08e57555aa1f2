//! Region file access.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use mc_nbt::{NbtCompound, NbtError};
use thiserror::Error;

use crate::{ChunkPos, Result, WorldError};

/// Bytes per region sector.
pub const SECTOR_BYTES: u64 = 4096;

/// Chunks per region edge.
pub const REGION_CHUNKS: i32 = 32;

const LOCATIONS: usize = (REGION_CHUNKS * REGION_CHUNKS) as usize;

/// Chunk payload compression scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zlib,
    None,
}

impl Compression {
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Gzip),
            2 => Some(Self::Zlib),
            3 => Some(Self::None),
            _ => None,
        }
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Gzip => 1,
            Self::Zlib => 2,
            Self::None => 3,
        }
    }

    /// Decompress `bytes` and decode the root compound.
    pub fn decode(self, bytes: &[u8]) -> std::result::Result<NbtCompound, NbtError> {
        match self {
            Self::Gzip => mc_nbt::read_root(&mut GzDecoder::new(bytes)),
            Self::Zlib => mc_nbt::read_root(&mut ZlibDecoder::new(bytes)),
            Self::None => mc_nbt::read_root(&mut &bytes[..]),
        }
    }
}

/// Why a single chunk could not be read.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("chunk length {length} exceeds its {sectors} allocated sectors")]
    Truncated { length: u32, sectors: u8 },

    #[error("unknown compression scheme {0}")]
    UnknownCompression(u8),

    #[error("invalid NBT: {0}")]
    Nbt(#[from] NbtError),
}

/// A region file with its location table loaded.
#[derive(Debug)]
pub struct RegionFile {
    path: PathBuf,
    x: i32,
    z: i32,
    /// `(sector offset, sector count)` per chunk index; `(0, 0)` = absent.
    locations: Box<[(u32, u8); LOCATIONS]>,
}

impl RegionFile {
    /// Parse region coordinates from a file name like `r.-1.2.mca`.
    #[must_use]
    pub fn parse_name(name: &str) -> Option<(i32, i32)> {
        let mut parts = name.split('.');
        if parts.next()? != "r" {
            return None;
        }
        let x = parts.next()?.parse().ok()?;
        let z = parts.next()?.parse().ok()?;
        match (parts.next()?, parts.next()) {
            ("mca" | "mcr", None) => Some((x, z)),
            _ => None,
        }
    }

    /// Open a region file and read its location table.
    ///
    /// Files shorter than one sector are treated as holding no chunks.
    pub fn open(path: impl Into<PathBuf>, x: i32, z: i32) -> Result<Self> {
        let path = path.into();
        let mut file = File::open(&path).map_err(|e| WorldError::io(&path, e))?;
        let mut locations = Box::new([(0u32, 0u8); LOCATIONS]);

        let len = file.metadata().map_err(|e| WorldError::io(&path, e))?.len();
        if len >= SECTOR_BYTES {
            let mut header = vec![0u8; SECTOR_BYTES as usize];
            file.read_exact(&mut header)
                .map_err(|e| WorldError::io(&path, e))?;
            let mut cursor = header.as_slice();
            for slot in locations.iter_mut() {
                let entry = cursor
                    .read_u32::<BigEndian>()
                    .map_err(|e| WorldError::io(&path, e))?;
                *slot = (entry >> 8, (entry & 0xFF) as u8);
            }
        }

        Ok(Self {
            path,
            x,
            z,
            locations,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Chunks that have data in this region.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, (offset, sectors))| *offset != 0 && *sectors != 0)
            .map(|(index, _)| {
                let index = index as i32;
                ChunkPos::new(
                    self.x * REGION_CHUNKS + index % REGION_CHUNKS,
                    self.z * REGION_CHUNKS + index / REGION_CHUNKS,
                )
            })
    }

    /// Read and decode one chunk. `Ok(None)` when the chunk is absent or
    /// belongs to another region.
    pub fn read_chunk(
        &self,
        chunk: ChunkPos,
    ) -> std::result::Result<Option<NbtCompound>, ChunkError> {
        if chunk.x.div_euclid(REGION_CHUNKS) != self.x
            || chunk.z.div_euclid(REGION_CHUNKS) != self.z
        {
            return Ok(None);
        }
        let local_x = chunk.x.rem_euclid(REGION_CHUNKS);
        let local_z = chunk.z.rem_euclid(REGION_CHUNKS);
        let index = (local_x + local_z * REGION_CHUNKS) as usize;
        let (offset, sectors) = self.locations[index];
        if offset == 0 || sectors == 0 {
            return Ok(None);
        }

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(u64::from(offset) * SECTOR_BYTES))?;

        let length = file.read_u32::<BigEndian>()?;
        if length == 0 || u64::from(length) + 4 > u64::from(sectors) * SECTOR_BYTES {
            return Err(ChunkError::Truncated { length, sectors });
        }
        let scheme = file.read_u8()?;
        let compression =
            Compression::from_id(scheme).ok_or(ChunkError::UnknownCompression(scheme))?;

        let mut payload = vec![0u8; length as usize - 1];
        file.read_exact(&mut payload)?;

        Ok(Some(compression.decode(&payload)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        assert_eq!(RegionFile::parse_name("r.0.0.mca"), Some((0, 0)));
        assert_eq!(RegionFile::parse_name("r.-1.12.mcr"), Some((-1, 12)));
        assert_eq!(RegionFile::parse_name("r.0.0.dat"), None);
        assert_eq!(RegionFile::parse_name("r.a.0.mca"), None);
        assert_eq!(RegionFile::parse_name("r.0.mca"), None);
        assert_eq!(RegionFile::parse_name("r.0.0.mca.bak"), None);
        assert_eq!(RegionFile::parse_name("level.dat"), None);
    }

    #[test]
    fn test_compression_ids() {
        for scheme in [Compression::Gzip, Compression::Zlib, Compression::None] {
            assert_eq!(Compression::from_id(scheme.id()), Some(scheme));
        }
        assert_eq!(Compression::from_id(0), None);
        assert_eq!(Compression::from_id(0x82), None);
    }
}
