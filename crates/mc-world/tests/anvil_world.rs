//! Reading synthetic saves written to disk.

use mc_nbt::nbt;
use mc_world::fixture::SaveBuilder;
use mc_world::{AnvilWorld, BlockPos, ChunkPos, Compression, WorldError, WorldStore};

fn barrel(x: i32, y: i32, z: i32) -> mc_nbt::NbtCompound {
    nbt! {
        "id" => "TileEntityBarrel",
        "x" => x,
        "y" => y,
        "z" => z,
        "storage" => nbt! {
            "current_item" => nbt! { "id" => 4i16, "Damage" => 0i16 },
        },
    }
}

#[test]
fn test_missing_level_dat() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnvilWorld::open(dir.path()).unwrap_err();
    assert!(matches!(err, WorldError::LevelNotFound(_)), "{err}");
}

#[test]
fn test_garbage_level_dat() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("level.dat"), b"not gzip at all").unwrap();
    let err = AnvilWorld::open(dir.path()).unwrap_err();
    assert!(matches!(err, WorldError::Nbt { .. }), "{err}");
}

#[test]
fn test_no_region_directory() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Empty").write(dir.path()).unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    assert_eq!(world.root(), dir.path());
    assert!(world.chunks().unwrap().is_empty());
    assert_eq!(
        world
            .level()
            .get_compound("Data")
            .and_then(|d| d.get_str("LevelName")),
        Some("Empty")
    );
}

#[test]
fn test_chunks_across_regions() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Spread")
        .tile_entity(barrel(5, 64, 5))
        .tile_entity(barrel(-1, 64, -1))
        .tile_entity(barrel(33 * 16, 10, 2 * 16 + 3))
        .empty_chunk(ChunkPos::new(3, 4))
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    let mut chunks = world.chunks().unwrap();
    chunks.sort();
    assert_eq!(
        chunks,
        vec![
            ChunkPos::new(-1, -1),
            ChunkPos::new(0, 0),
            ChunkPos::new(3, 4),
            ChunkPos::new(33, 2),
        ]
    );

    let far = world.tile_entities(ChunkPos::new(33, 2)).unwrap();
    assert_eq!(far.len(), 1);
    assert_eq!(far[0].position(), Some(BlockPos::new(528, 10, 35)));
    assert_eq!(far[0].stored_item().as_deref(), Some("4:0"));

    assert!(world.tile_entities(ChunkPos::new(3, 4)).unwrap().is_empty());
    // Region exists, chunk does not
    assert!(world.tile_entities(ChunkPos::new(7, 7)).unwrap().is_empty());
    // No region at all
    assert!(world.tile_entities(ChunkPos::new(1000, 1000)).unwrap().is_empty());
}

#[test]
fn test_entity_at() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Lookup")
        .tile_entity(barrel(-20, 70, 40))
        .tile_entity(nbt! {
            "id" => "turtle",
            "x" => -21i32,
            "y" => 71i32,
            "z" => 40i32,
            "computerID" => 12i32,
        })
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    let turtle = world.entity_at(BlockPos::new(-21, 71, 40)).unwrap().unwrap();
    assert_eq!(turtle.kind(), Some("turtle"));
    assert_eq!(turtle.computer_id(), Some(12));
    assert!(world.entity_at(BlockPos::new(-21, 70, 40)).unwrap().is_none());
}

#[test]
fn test_modern_gzip_mcregion() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Modern")
        .modern()
        .mcregion()
        .compression(Compression::Gzip)
        .tile_entity(barrel(1, 2, 3))
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    let entity = world.entity_at(BlockPos::new(1, 2, 3)).unwrap().unwrap();
    assert_eq!(entity.kind(), Some("TileEntityBarrel"));
}

#[test]
fn test_uncompressed_chunk() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Raw")
        .compression(Compression::None)
        .tile_entity(barrel(0, 0, 0))
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    assert_eq!(world.tile_entities(ChunkPos::new(0, 0)).unwrap().len(), 1);
}

#[test]
fn test_corrupt_chunk_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Corrupt")
        .tile_entity(barrel(0, 0, 0))
        .raw_chunk(ChunkPos::new(1, 0), 2, b"definitely not zlib".to_vec())
        .raw_chunk(ChunkPos::new(2, 0), 9, vec![0; 16])
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    assert_eq!(world.chunks().unwrap().len(), 3);
    assert!(world.tile_entities(ChunkPos::new(1, 0)).unwrap().is_empty());
    assert!(world.tile_entities(ChunkPos::new(2, 0)).unwrap().is_empty());
    assert_eq!(world.tile_entities(ChunkPos::new(0, 0)).unwrap().len(), 1);
}

#[test]
fn test_anvil_shadows_mcregion() {
    let dir = tempfile::tempdir().unwrap();
    SaveBuilder::new("Old")
        .mcregion()
        .tile_entity(barrel(0, 0, 0))
        .write(dir.path())
        .unwrap();
    SaveBuilder::new("New")
        .tile_entity(barrel(16, 0, 0))
        .write(dir.path())
        .unwrap();

    let world = AnvilWorld::open(dir.path()).unwrap();
    assert_eq!(world.chunks().unwrap(), vec![ChunkPos::new(1, 0)]);
}
