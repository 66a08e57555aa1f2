//! Chaining rings into ring sets.

use hashbrown::HashMap;
use tracing::debug;

use crate::{Axis, AxisPos, ControlPoint, Point, PointStore, RING_SIZE, Ring, match_ring};

/// Shortest chain of consecutive rings that forms a ring set.
pub const MIN_RUN_LEN: usize = 4;

/// Direction of ring index 0 → n along the primary axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Ascending,
    Descending,
}

impl Orientation {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// Rings at consecutive coordinates along one axis.
///
/// Starts ascending and unvalidated; [`RingSet::validate`] attaches the
/// turtle and fixes ring order so index 0 is nearest to it.
#[derive(Clone, Debug, PartialEq)]
pub struct RingSet {
    pub(crate) axis: Axis,
    pub(crate) rings: Vec<Ring>,
    pub(crate) orientation: Orientation,
    pub(crate) control: Option<ControlPoint>,
}

impl RingSet {
    #[must_use]
    pub fn new(axis: Axis, rings: Vec<Ring>) -> Self {
        Self {
            axis,
            rings,
            orientation: Orientation::Ascending,
            control: None,
        }
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The turtle, once validated.
    #[must_use]
    pub const fn control(&self) -> Option<&ControlPoint> {
        self.control.as_ref()
    }

    #[must_use]
    pub const fn is_validated(&self) -> bool {
        self.control.is_some()
    }

    /// Barrel at polar coordinates `(ring index, slot)`. `None` until
    /// validated, since indices are only meaningful relative to the turtle.
    #[must_use]
    pub fn barrel(&self, index: usize, slot: usize) -> Option<&Point> {
        self.control.as_ref()?;
        self.rings.get(index)?.slots.get(slot)
    }

    /// Mirror every ring across the plane axis.
    pub fn invert(&mut self) {
        self.rings.iter_mut().for_each(Ring::invert);
    }

    /// Reverse ring order and flip orientation.
    pub fn reverse(&mut self) {
        self.rings.reverse();
        self.orientation = match self.orientation {
            Orientation::Ascending => Orientation::Descending,
            Orientation::Descending => Orientation::Ascending,
        };
    }
}

/// Every complete ring along `axis`, sorted by `(axis, y, plane)` of the
/// anchor.
#[must_use]
pub fn find_rings(store: &PointStore, axis: Axis) -> Vec<Ring> {
    let mut rings = Vec::new();

    for (_, bucket) in store.buckets(axis) {
        if bucket.len() < RING_SIZE {
            continue;
        }
        let lookup: HashMap<AxisPos, &Point> =
            bucket.iter().map(|p| (axis.local(p.pos), p)).collect();

        for point in bucket {
            if let Some(slots) = match_ring(axis.local(point.pos), &lookup) {
                rings.push(Ring::new(point.pos, slots));
            }
        }
    }

    rings.sort_by_key(|ring| axis.local(ring.anchor));
    debug!("Matched {} rings along {}", rings.len(), axis);
    rings
}

impl PointStore {
    /// Ring sets along `axis`. Recomputed on every call.
    #[must_use]
    pub fn find_runs(&self, axis: Axis) -> Runs {
        Runs::new(axis, find_rings(self, axis))
    }
}

/// Splits sorted rings into maximal consecutive blocks, yielding those of
/// at least [`MIN_RUN_LEN`].
#[derive(Debug)]
pub struct Runs {
    axis: Axis,
    rings: std::vec::IntoIter<Ring>,
    pending: Option<Ring>,
}

impl Runs {
    /// `rings` must be sorted by primary coordinate.
    #[must_use]
    pub fn new(axis: Axis, rings: Vec<Ring>) -> Self {
        Self {
            axis,
            rings: rings.into_iter(),
            pending: None,
        }
    }
}

impl Iterator for Runs {
    type Item = RingSet;

    fn next(&mut self) -> Option<RingSet> {
        loop {
            let first = self.pending.take().or_else(|| self.rings.next())?;
            let mut last = first.primary(self.axis);
            let mut block = vec![first];

            for ring in self.rings.by_ref() {
                let coord = ring.primary(self.axis);
                if last.checked_add(1) != Some(coord) {
                    self.pending = Some(ring);
                    break;
                }
                last = coord;
                block.push(ring);
            }

            if block.len() >= MIN_RUN_LEN {
                return Some(RingSet::new(self.axis, block));
            }
        }
    }
}
