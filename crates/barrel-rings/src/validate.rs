//! Finding the turtle that owns a ring set.

use mc_world::{BlockPos, TileEntity, WorldStore};
use tracing::debug;

use crate::{Axis, RingSet, ScanConfig};

/// Which end of a ring set a candidate sits at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    First,
    Last,
}

/// A possible turtle position, relative to the anchor of the end ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndCandidate {
    pub end: End,
    /// `(dx, dy, dz)` from the end ring's anchor.
    pub offset: (i32, i32, i32),
    /// Turtle faces the rings mirrored: swap near and far slots.
    pub invert: bool,
    /// Turtle sits past the highest ring: reverse ring order.
    pub reverse: bool,
}

impl EndCandidate {
    const fn new(end: End, offset: (i32, i32, i32), invert: bool, reverse: bool) -> Self {
        Self {
            end,
            offset,
            invert,
            reverse,
        }
    }
}

impl Axis {
    /// Turtle positions to probe, in order.
    #[must_use]
    pub const fn end_candidates(self) -> [EndCandidate; 2] {
        match self {
            Self::X => [
                EndCandidate::new(End::First, (-1, 1, 0), false, false),
                EndCandidate::new(End::Last, (1, 1, 1), true, true),
            ],
            Self::Z => [
                EndCandidate::new(End::First, (1, 1, -1), true, false),
                EndCandidate::new(End::Last, (0, 1, 1), false, true),
            ],
        }
    }
}

/// The turtle a ring set was validated against.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPoint {
    pub pos: BlockPos,
    /// ComputerCraft `computerID`.
    pub id: i32,
    /// The raw tile entity.
    pub entity: TileEntity,
}

impl RingSet {
    /// World position probed for `candidate`. `None` for an empty set or
    /// a position outside the `i32` range.
    #[must_use]
    pub fn candidate_pos(&self, candidate: &EndCandidate) -> Option<BlockPos> {
        let ring = match candidate.end {
            End::First => self.rings.first()?,
            End::Last => self.rings.last()?,
        };
        let (dx, dy, dz) = candidate.offset;
        ring.anchor.offset(dx, dy, dz)
    }

    /// Look for a turtle at either end and orient the set to it.
    ///
    /// Returns whether a turtle was found. On success ring 0 is the ring
    /// nearest the turtle and slots are mirrored if the turtle faces the
    /// set from the far side. Calling this on a validated set is a no-op
    /// that returns `true`.
    pub fn validate<W: WorldStore + ?Sized>(
        &mut self,
        world: &W,
        config: &ScanConfig,
    ) -> mc_world::Result<bool> {
        if self.control.is_some() {
            return Ok(true);
        }

        for candidate in self.axis.end_candidates() {
            let Some(pos) = self.candidate_pos(&candidate) else {
                continue;
            };
            let Some(entity) = world.entity_at(pos)? else {
                continue;
            };
            if !entity.kind().is_some_and(|kind| config.is_control(kind)) {
                continue;
            }
            let Some(id) = entity.computer_id() else {
                continue;
            };

            if candidate.invert {
                self.invert();
            }
            if candidate.reverse {
                self.reverse();
            }
            debug!(
                "Turtle {} at ({}, {}, {}) owns {} rings along {} ({:?} end)",
                id,
                pos.x,
                pos.y,
                pos.z,
                self.len(),
                self.axis,
                candidate.end
            );
            self.control = Some(ControlPoint { pos, id, entity });
            return Ok(true);
        }

        Ok(false)
    }
}
