use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use std::path::Path;

use crate::config::fosen::RADAR_HEIGHT_M;
use crate::domain::{GeodeticPoint, LandPolygons};

/// Named point drawn on top of the land polygons
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: GeodeticPoint,
}

impl Marker {
    pub fn new(name: impl Into<String>, position: GeodeticPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// GeoJSON positions are [lon, lat]
fn position(p: &GeodeticPoint) -> Vec<f64> {
    vec![p.lon, p.lat]
}

/// Ring of positions, closed by repeating the first vertex if needed
fn closed_ring(points: &[GeodeticPoint]) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = points.iter().map(position).collect();
    if let (Some(first), Some(last)) = (points.first(), points.last())
        && first != last
    {
        ring.push(position(first));
    }
    ring
}

/// Build a feature collection with one polygon per land group and the marker
///
/// Groups with fewer than three vertices cannot form a ring and are skipped.
pub fn to_feature_collection(polygons: &LandPolygons, marker: Option<&Marker>) -> FeatureCollection {
    let mut features = Vec::new();

    for (number, group) in polygons.iter() {
        if group.len() < 3 {
            continue;
        }

        let mut properties = JsonObject::new();
        properties.insert("group".to_string(), serde_json::Value::from(number));
        properties.insert("vertices".to_string(), serde_json::Value::from(group.len()));
        properties.insert("kind".to_string(), serde_json::Value::from("land"));

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![closed_ring(group)]))),
            id: Some(geojson::feature::Id::Number(serde_json::Number::from(number))),
            properties: Some(properties),
            foreign_members: None,
        });
    }

    if let Some(marker) = marker {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), serde_json::Value::from(marker.name.clone()));
        properties.insert("kind".to_string(), serde_json::Value::from("marker"));
        properties.insert("height_m".to_string(), serde_json::Value::from(RADAR_HEIGHT_M));

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(position(&marker.position)))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write the polygons (and marker) as pretty-printed GeoJSON
pub fn save_geojson(path: &Path, polygons: &LandPolygons, marker: Option<&Marker>) -> Result<()> {
    let collection = to_feature_collection(polygons, marker);
    let contents =
        serde_json::to_string_pretty(&collection).context("Failed to serialize GeoJSON")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write GeoJSON file: {}", path.display()))?;
    Ok(())
}
