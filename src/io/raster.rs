use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::domain::{GridPoint, OccupancyRaster};

/// A loaded occupancy grid and the sensor position stored with it
#[derive(Debug, Clone)]
pub struct RasterFile {
    pub raster: OccupancyRaster,
    /// Sensor cell as saved: (column, row counted from the bottom edge)
    pub origin: Option<(f64, f64)>,
}

impl RasterFile {
    /// Sensor position in the grid frame (north, east)
    pub fn origin_point(&self) -> Option<GridPoint> {
        self.origin.map(|(col, row)| GridPoint::new(row, col))
    }
}

/// Saved grid layout: the occupancy grid plus optional sensor cell
#[derive(Debug, Deserialize)]
struct RasterDocument {
    occupancy_grid: Vec<Vec<u8>>,
    #[serde(default)]
    origin_x: Option<f64>,
    #[serde(default)]
    origin_y: Option<f64>,
}

/// Load a raster from disk
///
/// `.json` files hold `{"occupancy_grid": [[..], ..], "origin_x", "origin_y"}`;
/// anything else is read as text, one row per line.
pub fn load_raster(path: &Path) -> Result<RasterFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read raster file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_raster(&contents)
            .with_context(|| format!("Failed to parse JSON raster: {}", path.display()))
    } else {
        parse_text_raster(&contents)
            .with_context(|| format!("Failed to parse text raster: {}", path.display()))
    }
}

pub fn parse_json_raster(contents: &str) -> Result<RasterFile> {
    let document: RasterDocument =
        serde_json::from_str(contents).context("Invalid raster document")?;

    let origin = match (document.origin_x, document.origin_y) {
        (Some(x), Some(y)) => Some((x, y)),
        (None, None) => None,
        _ => bail!("origin_x and origin_y must be given together"),
    };

    let raster = OccupancyRaster::from_rows(document.occupancy_grid)?;
    Ok(RasterFile { raster, origin })
}

/// Parse whitespace or comma separated labels, one row per line
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_text_raster(contents: &str) -> Result<RasterFile> {
    let mut rows: Vec<Vec<u8>> = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u8>()
                    .with_context(|| format!("line {}: invalid cell label {:?}", line_no + 1, token))
            })
            .collect::<Result<Vec<u8>>>()?;

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            bail!(
                "line {}: expected {} cells, found {}",
                line_no + 1,
                first.len(),
                row.len()
            );
        }
        rows.push(row);
    }

    let raster = OccupancyRaster::from_rows(rows)?;
    Ok(RasterFile {
        raster,
        origin: None,
    })
}
