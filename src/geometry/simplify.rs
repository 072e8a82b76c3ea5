use geo::{LineString, Simplify};

use crate::domain::{GridPoint, PolygonCollection};

/// Douglas-Peucker reduction of one stitched loop, epsilon in cells
pub fn simplify_loop(points: &[GridPoint], epsilon: f64) -> Vec<GridPoint> {
    if points.len() < 4 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let line: LineString<f64> = points
        .iter()
        .map(|p| geo::coord! { x: p.y, y: p.x })
        .collect();

    let simplified = line.simplify(&epsilon);

    simplified
        .0
        .into_iter()
        .map(|c| GridPoint::new(c.y, c.x))
        .collect()
}

/// Map a 0-3 simplification level to an epsilon in cells
pub fn epsilon_for_level(level: u8) -> f64 {
    match level {
        0 => 0.0,
        1 => 0.5,
        2 => 1.0,
        _ => 2.0,
    }
}

/// Simplify every loop of a collection, keeping loop indices
pub fn simplify_collection(collection: &PolygonCollection, epsilon: f64) -> PolygonCollection {
    collection
        .loops()
        .iter()
        .map(|chain| simplify_loop(chain, epsilon))
        .collect::<Vec<_>>()
        .into()
}
