use super::{GeodeticPoint, GridPoint};

/// Ordered chain of boundary points in the grid frame
pub type PolygonLoop = Vec<GridPoint>;

/// Stitched loops keyed by dense index, in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonCollection {
    loops: Vec<PolygonLoop>,
}

impl PolygonCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new loop seeded with `seed` and return its index
    pub fn start_loop(&mut self, seed: GridPoint) -> usize {
        self.loops.push(vec![seed]);
        self.loops.len() - 1
    }

    /// Append to the most recently opened loop
    ///
    /// Does nothing on an empty collection.
    pub fn extend_current(&mut self, point: GridPoint) {
        if let Some(current) = self.loops.last_mut() {
            current.push(point);
        }
    }

    pub fn get(&self, index: usize) -> Option<&PolygonLoop> {
        self.loops.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PolygonLoop> {
        self.loops.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Total number of points across all loops
    pub fn point_count(&self) -> usize {
        self.loops.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PolygonLoop)> {
        self.loops.iter().enumerate()
    }

    pub fn loops(&self) -> &[PolygonLoop] {
        &self.loops
    }
}

impl From<Vec<PolygonLoop>> for PolygonCollection {
    fn from(loops: Vec<PolygonLoop>) -> Self {
        Self { loops }
    }
}

/// Renderable land groups, numbered 1 to 3
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandPolygons {
    groups: [Vec<GeodeticPoint>; 3],
}

impl LandPolygons {
    pub fn new(groups: [Vec<GeodeticPoint>; 3]) -> Self {
        Self { groups }
    }

    /// Group by its 1-based number
    pub fn group(&self, number: usize) -> Option<&[GeodeticPoint]> {
        number
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .map(Vec::as_slice)
    }

    /// Groups with their 1-based numbers
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[GeodeticPoint])> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (i + 1, g.as_slice()))
    }

    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}
