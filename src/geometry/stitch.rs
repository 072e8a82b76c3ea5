use crate::config::fosen::DISTANCE_CUTOFF;
use crate::domain::{GridPoint, PolygonCollection};
use crate::error::{Result, ShorelineError};

/// Greedy nearest-neighbour chaining of boundary points into loops
///
/// # Algorithm
/// 1. Seed loop 0 with the first point
/// 2. From the current point, scan every unvisited point for the nearest
///    one (first minimum in input order wins ties)
/// 3. If it is further than the cutoff, close the loop and seed a new one
///    with the first unvisited point in input order
/// 4. Otherwise append it and continue from it
///
/// Visited points are flagged rather than removed, so the scan order, and
/// with it the tie-break, always follows the input order. Cost is O(n²).
#[derive(Debug, Clone, Copy)]
pub struct Stitcher {
    cutoff: f64,
}

impl Default for Stitcher {
    fn default() -> Self {
        Self {
            cutoff: DISTANCE_CUTOFF,
        }
    }
}

impl Stitcher {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Partition `points` into ordered loops
    ///
    /// # Errors
    /// * `EmptyBoundarySet` if there is nothing to seed from
    pub fn stitch(&self, points: &[GridPoint]) -> Result<PolygonCollection> {
        if points.is_empty() {
            return Err(ShorelineError::EmptyBoundarySet);
        }

        let mut visited = vec![false; points.len()];
        let mut collection = PolygonCollection::new();

        // Seeds are always the first unvisited index, which only moves forward
        let mut next_seed = 0;
        let mut current = next_seed;
        visited[current] = true;
        collection.start_loop(points[current]);

        for _ in 1..points.len() {
            match nearest_unvisited(points, &visited, &points[current]) {
                Some((index, distance)) if distance <= self.cutoff => {
                    visited[index] = true;
                    collection.extend_current(points[index]);
                    current = index;
                }
                _ => {
                    while visited[next_seed] {
                        next_seed += 1;
                    }
                    visited[next_seed] = true;
                    collection.start_loop(points[next_seed]);
                    current = next_seed;
                }
            }
        }

        Ok(collection)
    }
}

/// Index and distance of the closest unvisited point
///
/// `None` when no distance compares below infinity (e.g. NaN coordinates).
fn nearest_unvisited(
    points: &[GridPoint],
    visited: &[bool],
    from: &GridPoint,
) -> Option<(usize, f64)> {
    let mut smallest = f64::INFINITY;
    let mut nearest = None;

    for (index, point) in points.iter().enumerate() {
        if visited[index] {
            continue;
        }
        let distance = from.distance(point);
        if distance < smallest {
            smallest = distance;
            nearest = Some(index);
        }
    }

    nearest.map(|index| (index, smallest))
}

/// Stitch with the operating-area cutoff
pub fn stitch(points: &[GridPoint]) -> Result<PolygonCollection> {
    Stitcher::default().stitch(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<GridPoint> {
        coords.iter().map(|&c| GridPoint::from(c)).collect()
    }

    /// Deterministic scatter for coverage checks
    fn scatter(n: usize, seed: u64) -> Vec<GridPoint> {
        let mut state = seed;
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % 1000) as f64 / 4.0
        };
        (0..n).map(|_| GridPoint::new(next(), next())).collect()
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(stitch(&[]), Err(ShorelineError::EmptyBoundarySet));
    }

    #[test]
    fn test_single_point() {
        let collection = stitch(&pts(&[(4.0, 2.0)])).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(0).unwrap(), &pts(&[(4.0, 2.0)]));
    }

    #[test]
    fn test_two_clusters_become_two_loops() {
        let a = pts(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (1.0, 1.0)]);
        let b = pts(&[(30.0, 30.0), (31.0, 30.0), (31.0, 33.0), (30.0, 32.0)]);
        // Interleave so the clusters are not contiguous in the input
        let mut input = Vec::new();
        for i in 0..a.len().max(b.len()) {
            input.extend(a.get(i));
            input.extend(b.get(i));
        }

        let collection = Stitcher::new(20.0).stitch(&input).unwrap();
        assert_eq!(collection.len(), 2);

        let mut first = collection.get(0).unwrap().clone();
        let mut second = collection.get(1).unwrap().clone();
        let key = |p: &GridPoint| (p.x as i64, p.y as i64);
        first.sort_by_key(key);
        second.sort_by_key(key);
        let (mut a_sorted, mut b_sorted) = (a.clone(), b.clone());
        a_sorted.sort_by_key(key);
        b_sorted.sort_by_key(key);
        assert_eq!(first, a_sorted);
        assert_eq!(second, b_sorted);
    }

    #[test]
    fn test_walk_follows_nearest_neighbour() {
        let input = pts(&[(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let collection = stitch(&input).unwrap();
        assert_eq!(
            collection.get(0).unwrap(),
            &pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
        );
    }

    #[test]
    fn test_ties_go_to_first_in_input_order() {
        let input = pts(&[(0.0, 0.0), (0.0, -1.0), (0.0, 1.0)]);
        let collection = stitch(&input).unwrap();
        assert_eq!(
            collection.get(0).unwrap(),
            &pts(&[(0.0, 0.0), (0.0, -1.0), (0.0, 1.0)])
        );
    }

    #[test]
    fn test_break_reseeds_from_input_order_not_nearest() {
        let input = pts(&[(0.0, 0.0), (200.0, 0.0), (50.0, 0.0)]);
        let collection = stitch(&input).unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(0).unwrap(), &pts(&[(0.0, 0.0)]));
        assert_eq!(collection.get(1).unwrap(), &pts(&[(200.0, 0.0)]));
        assert_eq!(collection.get(2).unwrap(), &pts(&[(50.0, 0.0)]));
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let input = pts(&[(0.0, 0.0), (20.0, 0.0), (40.5, 0.0)]);
        let collection = stitch(&input).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().len(), 2);
    }

    #[test]
    fn test_every_point_in_exactly_one_loop() {
        for (n, seed) in [(1, 1), (2, 7), (57, 42), (300, 2024)] {
            let input = scatter(n, seed);
            let collection = Stitcher::new(5.0).stitch(&input).unwrap();

            assert_eq!(collection.point_count(), input.len());
            let mut seen = vec![false; input.len()];
            for (_, chain) in collection.iter() {
                for point in chain {
                    let index = input
                        .iter()
                        .enumerate()
                        .position(|(i, p)| !seen[i] && p == point)
                        .expect("stitched point not in input");
                    seen[index] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_nan_points_start_their_own_loops() {
        let input = pts(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]);
        let collection = stitch(&input).unwrap();
        assert_eq!(collection.point_count(), 3);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap(), &pts(&[(0.0, 0.0), (1.0, 0.0)]));
    }
}
