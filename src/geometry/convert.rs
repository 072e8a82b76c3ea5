use crate::config::fosen::EXPECTED_LOOPS;
use crate::domain::{GeodeticReference, LandPolygons, PolygonCollection, PolygonLoop};
use crate::error::{Result, ShorelineError};
use crate::geometry::Projector;

/// Borrow loops 0..4 as a fixed array
///
/// Loops past index 3 are left out.
///
/// # Errors
/// * `InsufficientLoopCount` if fewer than four loops were stitched
pub fn first_four_loops(collection: &PolygonCollection) -> Result<[&PolygonLoop; EXPECTED_LOOPS]> {
    match collection.loops() {
        [a, b, c, d, ..] => Ok([a, b, c, d]),
        loops => Err(ShorelineError::InsufficientLoopCount {
            expected: EXPECTED_LOOPS,
            found: loops.len(),
        }),
    }
}

/// Merge four stitched chains into the three rendered land groups
///
/// Chains 1 and 2 trace the same stretch of shore from opposite ends, so
/// group 2 walks chain 1 forward and chain 2 backward:
///   group 1 = chain 0
///   group 2 = chain 1 + reversed chain 2
///   group 3 = chain 3
pub fn recombine<T: Clone>(chains: [&[T]; EXPECTED_LOOPS]) -> [Vec<T>; 3] {
    let [first, second, third, fourth] = chains;

    let mut joined = Vec::with_capacity(second.len() + third.len());
    joined.extend_from_slice(second);
    joined.extend(third.iter().rev().cloned());

    [first.to_vec(), joined, fourth.to_vec()]
}

/// Project the four stitched loops around `reference` and merge them into
/// land groups
///
/// Every vertex keeps its position in its loop; the only reordering is the
/// reversal in [`recombine`].
pub fn to_geodetic(collection: &PolygonCollection, reference: GeodeticReference) -> Result<LandPolygons> {
    let loops = first_four_loops(collection)?;
    let projector = Projector::new(reference)?;

    let projected = loops.map(|chain| projector.project_points(chain));
    let [a, b, c, d] = &projected;
    let groups = recombine([a.as_slice(), b.as_slice(), c.as_slice(), d.as_slice()]);

    Ok(LandPolygons::new(groups))
}
