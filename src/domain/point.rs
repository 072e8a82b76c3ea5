/// Point in the local grid frame, in cell units
///
/// `x` points north (rows flipped), `y` points east (columns).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point
    pub fn distance(&self, other: &GridPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for GridPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeodeticPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Origin of a local tangent plane, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticReference {
    pub lat: f64,
    pub lon: f64,
}

impl GeodeticReference {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether the latitude lies strictly inside (-90, 90)
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lat > -90.0 && self.lat < 90.0
    }
}

impl From<GeodeticReference> for GeodeticPoint {
    fn from(r: GeodeticReference) -> Self {
        GeodeticPoint::new(r.lat, r.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_distance() {
        let a = GridPoint::new(0.0, 0.0);
        let b = GridPoint::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_reference_validity() {
        assert!(GeodeticReference::new(63.43, 10.38).is_valid());
        assert!(!GeodeticReference::new(90.0, 0.0).is_valid());
        assert!(!GeodeticReference::new(-90.0, 0.0).is_valid());
        assert!(!GeodeticReference::new(f64::NAN, 0.0).is_valid());
    }
}
