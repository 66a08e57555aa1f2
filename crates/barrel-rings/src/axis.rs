//! Axis-relative coordinates.

use std::fmt;

use mc_world::BlockPos;

/// Horizontal axis a ring set chains along. Y is never primary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Scan order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Z];

    /// Coordinate along the axis.
    #[must_use]
    pub const fn primary(self, pos: BlockPos) -> i32 {
        match self {
            Self::X => pos.x,
            Self::Z => pos.z,
        }
    }

    /// Coordinate along the other horizontal axis.
    #[must_use]
    pub const fn plane(self, pos: BlockPos) -> i32 {
        match self {
            Self::X => pos.z,
            Self::Z => pos.x,
        }
    }

    /// World position to `(axis, y, plane)`.
    #[must_use]
    pub const fn local(self, pos: BlockPos) -> AxisPos {
        AxisPos {
            axis: self.primary(pos),
            y: pos.y,
            plane: self.plane(pos),
        }
    }

    /// `(axis, y, plane)` back to a world position.
    #[must_use]
    pub const fn world(self, pos: AxisPos) -> BlockPos {
        match self {
            Self::X => BlockPos::new(pos.axis, pos.y, pos.plane),
            Self::Z => BlockPos::new(pos.plane, pos.y, pos.axis),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Z => f.write_str("z"),
        }
    }
}

/// A position expressed relative to an [`Axis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisPos {
    pub axis: i32,
    pub y: i32,
    pub plane: i32,
}

impl AxisPos {
    #[must_use]
    pub const fn new(axis: i32, y: i32, plane: i32) -> Self {
        Self { axis, y, plane }
    }

    /// Shift within the ring's plane. `None` past the edge of `i32`.
    #[must_use]
    pub const fn offset(self, dy: i32, dplane: i32) -> Option<Self> {
        match (self.y.checked_add(dy), self.plane.checked_add(dplane)) {
            (Some(y), Some(plane)) => Some(Self::new(self.axis, y, plane)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_swaps_for_z() {
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(Axis::X.local(pos), AxisPos::new(1, 2, 3));
        assert_eq!(Axis::Z.local(pos), AxisPos::new(3, 2, 1));
    }

    #[test]
    fn test_world_inverts_local() {
        let pos = BlockPos::new(-7, 64, 12);
        for axis in Axis::ALL {
            assert_eq!(axis.world(axis.local(pos)), pos);
        }
    }

    #[test]
    fn test_plane_offset_moves_other_axis() {
        let anchor = Axis::Z.local(BlockPos::new(10, 5, 20));
        let moved = Axis::Z.world(anchor.offset(1, 2).unwrap());
        assert_eq!(moved, BlockPos::new(12, 6, 20));
    }

    #[test]
    fn test_offset_past_i32_is_none() {
        let top = AxisPos::new(0, i32::MAX - 1, 0);
        assert_eq!(top.offset(1, 0), Some(AxisPos::new(0, i32::MAX, 0)));
        assert_eq!(top.offset(2, 0), None);
        assert_eq!(AxisPos::new(0, 0, i32::MIN).offset(0, -1), None);
    }
}
