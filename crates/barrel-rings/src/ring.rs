//! The eight-barrel ring motif.

use hashbrown::HashMap;
use mc_world::BlockPos;

use crate::{Axis, AxisPos, Point};

/// Barrels per ring.
pub const RING_SIZE: usize = 8;

/// `(dy, dplane)` of each slot relative to the anchor, in slot order.
///
/// Slots 0..4 are the near side, 4..8 the far side mirrored across the
/// plane axis.
pub const MOTIF: [(i32, i32); RING_SIZE] = [
    (0, 0),
    (1, -1),
    (2, -1),
    (3, 0),
    (0, 1),
    (1, 2),
    (2, 2),
    (3, 1),
];

/// Resolve all eight slots around `anchor`, or `None` if any is missing.
/// A slot whose coordinates overflow `i32` counts as missing.
#[must_use]
pub fn match_ring(
    anchor: AxisPos,
    lookup: &HashMap<AxisPos, &Point>,
) -> Option<[Point; RING_SIZE]> {
    let slots: Vec<Point> = MOTIF
        .iter()
        .map(|&(dy, dplane)| {
            let pos = anchor.offset(dy, dplane)?;
            lookup.get(&pos).map(|p| (*p).clone())
        })
        .collect::<Option<_>>()?;
    slots.try_into().ok()
}

/// A complete ring anchored at slot 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    /// World position of slot 0.
    pub anchor: BlockPos,
    pub slots: [Point; RING_SIZE],
}

impl Ring {
    #[must_use]
    pub fn new(anchor: BlockPos, slots: [Point; RING_SIZE]) -> Self {
        Self { anchor, slots }
    }

    /// Anchor coordinate along `axis`.
    #[must_use]
    pub const fn primary(&self, axis: Axis) -> i32 {
        axis.primary(self.anchor)
    }

    /// Swap each near slot with its mirrored far slot.
    pub fn invert(&mut self) {
        for i in 0..RING_SIZE / 2 {
            self.slots.swap(i, i + RING_SIZE / 2);
        }
    }

    /// Slot contents in slot order.
    pub fn items(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots.iter().map(|p| p.item.as_deref())
    }
}
