//! Full-world scan.

use mc_world::WorldStore;
use tracing::{info, trace};

use crate::{Axis, PointStore, RingSet, ScanConfig};

/// Index the world's barrels, then find and validate ring sets along X
/// and then Z. Only validated sets are returned.
pub fn scan<W: WorldStore + ?Sized>(
    world: &W,
    config: &ScanConfig,
) -> mc_world::Result<Vec<RingSet>> {
    let store = PointStore::from_world(world, config)?;
    let mut validated = Vec::new();

    for axis in Axis::ALL {
        let mut found = 0;
        for mut run in store.find_runs(axis) {
            found += 1;
            if run.validate(world, config)? {
                validated.push(run);
            } else {
                trace!(
                    "No turtle for {} rings along {} starting at {:?}",
                    run.len(),
                    axis,
                    run.rings().first().map(|r| r.anchor)
                );
            }
        }
        info!("Found {} ring sets along {}", found, axis);
    }

    info!("{} ring sets have a turtle", validated.len());
    Ok(validated)
}

/// [`scan`] rendered as report blocks, one per validated ring set.
pub fn scan_report<W: WorldStore + ?Sized>(
    world: &W,
    config: &ScanConfig,
) -> mc_world::Result<Vec<String>> {
    Ok(scan(world, config)?
        .iter()
        .filter_map(RingSet::render)
        .collect())
}
