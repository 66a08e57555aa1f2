//! Barrel ring detection.
//!
//! A *ring* is eight barrels arranged around an axis-aligned tunnel that a
//! turtle can drive through. Rings placed at consecutive coordinates along
//! X or Z form a *ring set*; a ring set with a turtle parked at one of its
//! two ends is reported so the turtle's controller knows what each barrel
//! holds, in turtle-relative polar coordinates `(ring index, slot)`.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐   ┌──────────┐   ┌────────┐
//! │ WorldStore   │──▶│ PointStore  │──▶│ find_runs    │──▶│ validate │──▶│ Report │
//! │ tile entities│   │ by X, by Z  │   │ per axis     │   │ turtle   │   │ text   │
//! └──────────────┘   └─────────────┘   └──────────────┘   └──────────┘   └────────┘
//! ```
//!
//! # Ring layout
//!
//! Looking down the primary axis, slot numbers around the turtle `T`:
//!
//! ```text
//!    3 7     ▲
//!   2   6    │ y
//!   1 T 5    │
//!    0 4     plane ▶
//! ```
//!
//! Slot 0 is the ring's anchor. Slots `i` and `i + 4` mirror each other
//! across the plane axis.

mod axis;
mod config;
mod report;
mod ring;
mod run;
mod scan;
mod store;
mod validate;

pub use axis::{Axis, AxisPos};
pub use config::ScanConfig;
pub use report::{EMPTY_SLOT, Report};
pub use ring::{MOTIF, RING_SIZE, Ring, match_ring};
pub use run::{MIN_RUN_LEN, Orientation, RingSet, Runs};
pub use scan::{scan, scan_report};
pub use store::{Point, PointStore};
pub use validate::{ControlPoint, End, EndCandidate};
