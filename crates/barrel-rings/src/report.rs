//! Text report read by the turtle's controller.
//!
//! ```text
//! Turtle id=<id> x=<x> y=<y> z=<z> len=<rings>
//! <slot0> <slot1> ... <slot7>      ring nearest the turtle
//! ...                              one line per ring
//! ```
//!
//! Empty barrels print as [`EMPTY_SLOT`].

use std::fmt;

use crate::{ControlPoint, RingSet};

/// Token for a barrel holding nothing.
pub const EMPTY_SLOT: &str = "None";

/// A validated ring set ready to print.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    run: &'a RingSet,
    control: &'a ControlPoint,
}

impl RingSet {
    /// `None` for a ring set that was never validated.
    #[must_use]
    pub fn report(&self) -> Option<Report<'_>> {
        Some(Report {
            run: self,
            control: self.control.as_ref()?,
        })
    }

    /// Rendered report text without a trailing newline.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.report().map(|report| report.to_string())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ControlPoint { pos, id, .. } = self.control;
        write!(
            f,
            "Turtle id={} x={} y={} z={} len={}",
            id,
            pos.x,
            pos.y,
            pos.z,
            self.run.len()
        )?;
        for ring in self.run.rings() {
            f.write_str("\n")?;
            for (i, item) in ring.items().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(item.unwrap_or(EMPTY_SLOT))?;
            }
        }
        Ok(())
    }
}
