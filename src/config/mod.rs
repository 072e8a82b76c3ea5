use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::GeodeticReference;

/// Operating-area constants for the Fosenkaia harbour radar grid.
///
/// These values belong to one known 617-row occupancy raster and the
/// downstream map that draws it. They are reproduced literally so the
/// generated coordinates stay identical; changing any of them changes the
/// numeric output.
///
///   Raster rows:      617 (row 0 maps to x = 616.5)
///   Stitch cutoff:    20 cells
///   Stitched loops:   4, loop 3 closed through (1.5, 800)
///   Rendered groups:  loop 0 | loop 1 + reversed loop 2 | loop 3
pub mod fosen {
    use crate::domain::{GeodeticReference, GridPoint};

    /// Height of the surveyed raster, used as the row flip offset
    pub const RASTER_HEIGHT_OFFSET: f64 = 617.0;

    /// Largest gap bridged while chaining boundary points
    pub const DISTANCE_CUTOFF: f64 = 20.0;

    /// Number of loops the land polygon recombination is wired for
    pub const EXPECTED_LOOPS: usize = 4;

    /// Loop that receives the closing point
    pub const PATCHED_LOOP: usize = 3;

    /// Closes loop 3 along the southern raster edge
    pub const PATCH_POINT: GridPoint = GridPoint::new(1.5, 800.0);

    /// Radar position at Fosenkaia, shown as the map marker
    pub const RADAR_POSITION: GeodeticReference = GeodeticReference::new(63.435167, 10.393028);

    /// South-west raster corner, origin of the local grid frame
    pub const MAP_CORNER: GeodeticReference =
        GeodeticReference::new(63.43180075539984, 10.383238792419432);

    /// Antenna height above the ellipsoid in meters (carried for reference)
    pub const RADAR_HEIGHT_M: f64 = 39.923;
}

fn default_cutoff() -> f64 {
    fosen::DISTANCE_CUTOFF
}
fn default_simplify() -> u8 {
    0
}
fn default_verbose() -> bool {
    false
}
fn default_marker() -> bool {
    true
}

/// Geodetic point as written in a config file
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ReferenceConfig {
    pub lat: f64,
    pub lon: f64,
}

impl From<ReferenceConfig> for GeodeticReference {
    fn from(r: ReferenceConfig) -> Self {
        GeodeticReference::new(r.lat, r.lon)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub raster: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default = "default_simplify")]
    pub simplify: u8,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default = "default_marker")]
    pub marker: bool,
    #[serde(default)]
    pub origin: Option<ReferenceConfig>,
    #[serde(default)]
    pub radar: Option<ReferenceConfig>,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("shoremap.toml"));
    paths.push(PathBuf::from(".shoremap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shoremap").join("config.toml"));
        paths.push(config_dir.join("shoremap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".shoremap.toml"));
        paths.push(home.join(".config").join("shoremap").join("config.toml"));
    }

    paths
}
