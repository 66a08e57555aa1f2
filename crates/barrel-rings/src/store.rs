//! Barrel index bucketed by axis coordinate.

use hashbrown::HashMap;
use mc_world::{BlockPos, WorldStore};
use tracing::info;

use crate::{Axis, ScanConfig};

/// A barrel: its position and what it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub pos: BlockPos,
    /// `None` for an empty barrel.
    pub item: Option<String>,
}

impl Point {
    #[must_use]
    pub fn new(pos: BlockPos, item: Option<String>) -> Self {
        Self { pos, item }
    }

    #[must_use]
    pub fn empty(pos: BlockPos) -> Self {
        Self::new(pos, None)
    }
}

/// Barrels indexed twice: by X coordinate and by Z coordinate.
///
/// Built fresh for each scan.
#[derive(Debug, Default)]
pub struct PointStore {
    by_x: HashMap<i32, Vec<Point>>,
    by_z: HashMap<i32, Vec<Point>>,
    len: usize,
}

impl PointStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every barrel in the world.
    ///
    /// Tile entities of another kind, and barrels without a full integer
    /// position, are skipped.
    pub fn from_world<W: WorldStore + ?Sized>(
        world: &W,
        config: &ScanConfig,
    ) -> mc_world::Result<Self> {
        let mut store = Self::new();
        let chunks = world.chunks()?;
        info!("Scanning {} chunks for {}", chunks.len(), config.container_id);

        for chunk in chunks {
            for entity in world.tile_entities(chunk)? {
                if !entity.kind().is_some_and(|kind| config.is_container(kind)) {
                    continue;
                }
                let Some(pos) = entity.position() else {
                    continue;
                };
                store.add(Point::new(pos, entity.stored_item()));
            }
        }

        info!("Indexed {} barrels", store.len());
        Ok(store)
    }

    /// Insert into both indices. No duplicate check.
    pub fn add(&mut self, point: Point) {
        self.by_x.entry(point.pos.x).or_default().push(point.clone());
        self.by_z.entry(point.pos.z).or_default().push(point);
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn index(&self, axis: Axis) -> &HashMap<i32, Vec<Point>> {
        match axis {
            Axis::X => &self.by_x,
            Axis::Z => &self.by_z,
        }
    }

    /// Barrels sharing one coordinate along `axis`.
    #[must_use]
    pub fn bucket(&self, axis: Axis, coord: i32) -> &[Point] {
        self.index(axis).get(&coord).map(Vec::as_slice).unwrap_or_default()
    }

    /// All buckets along `axis`, in no particular order.
    pub fn buckets(&self, axis: Axis) -> impl Iterator<Item = (i32, &[Point])> {
        self.index(axis)
            .iter()
            .map(|(coord, points)| (*coord, points.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use mc_nbt::nbt;
    use mc_world::MemoryWorld;

    use super::*;

    #[test]
    fn test_add_indexes_both_axes() {
        let mut store = PointStore::new();
        store.add(Point::empty(BlockPos::new(1, 0, 5)));
        store.add(Point::empty(BlockPos::new(1, 1, 6)));
        store.add(Point::empty(BlockPos::new(2, 0, 5)));

        assert_eq!(store.len(), 3);
        assert_eq!(store.bucket(Axis::X, 1).len(), 2);
        assert_eq!(store.bucket(Axis::X, 2).len(), 1);
        assert_eq!(store.bucket(Axis::Z, 5).len(), 2);
        assert_eq!(store.bucket(Axis::Z, 6).len(), 1);
        assert!(store.bucket(Axis::Z, 1).is_empty());
        assert_eq!(store.buckets(Axis::X).count(), 2);
    }

    #[test]
    fn test_from_world_filters() {
        let mut world = MemoryWorld::new();
        world.insert(nbt! {
            "id" => "TileEntityBarrel",
            "x" => 0i32, "y" => 10i32, "z" => 0i32,
            "storage" => nbt! {
                "current_item" => nbt! { "id" => 17i16, "Damage" => 2i16 },
            },
        });
        world.insert(nbt! {
            "id" => "TileEntityBarrel",
            "x" => 1i32, "y" => 10i32, "z" => 0i32,
            "storage" => nbt! {},
        });
        // Wrong kind
        world.insert(nbt! { "id" => "Chest", "x" => 2i32, "y" => 10i32, "z" => 0i32 });
        // No position
        world.insert(nbt! { "id" => "TileEntityBarrel", "x" => 3i32 });

        let store = PointStore::from_world(&world, &ScanConfig::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.bucket(Axis::X, 0),
            &[Point::new(BlockPos::new(0, 10, 0), Some("17:2".to_string()))]
        );
        assert_eq!(store.bucket(Axis::X, 1), &[Point::empty(BlockPos::new(1, 10, 0))]);
    }
}
