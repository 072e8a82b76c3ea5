use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use shoremap::config::{FileConfig, fosen};
use shoremap::domain::{GeodeticPoint, GeodeticReference};
use shoremap::geometry::simplify::{epsilon_for_level, simplify_collection};
use shoremap::geometry::{BoundaryExtractor, Projector, Stitcher, to_geodetic};
use shoremap::io::geojson::Marker;
use shoremap::io::{load_raster, save_geojson};
use shoremap::pipeline::close_patched_loop;

/// Trace land polygons from an occupancy grid and write them as GeoJSON
///
/// Examples:
///   # Harbour grid with the built-in Fosenkaia references
///   shoremap --raster occupancy_grid.json
///
///   # Text grid, custom origin, lightly simplified outlines
///   shoremap --raster grid.txt --origin-lat 63.4318 --origin-lon 10.3832 --simplify 1
///
///   # Use a config file
///   shoremap --config my-harbour.toml
#[derive(Parser, Debug)]
#[command(name = "shoremap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches shoremap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Occupancy grid file (.json with "occupancy_grid", or a text grid)
    #[arg(short = 'r', long)]
    raster: Option<PathBuf>,

    /// Output GeoJSON path (defaults to land_polygons.geojson)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Largest gap in cells bridged while stitching boundary points
    #[arg(long, default_value = "20.0")]
    cutoff: f64,

    /// Outline simplification level: 0=off (default), 1=light, 2=medium, 3=aggressive
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
    simplify: u8,

    /// Latitude of the grid origin (south-west corner, use with --origin-lon)
    #[arg(long, requires = "origin_lon", allow_hyphen_values = true)]
    origin_lat: Option<f64>,

    /// Longitude of the grid origin (use with --origin-lat)
    #[arg(long, requires = "origin_lat", allow_hyphen_values = true)]
    origin_lon: Option<f64>,

    /// Latitude of the radar marker (use with --marker-lon)
    #[arg(long, requires = "marker_lon", allow_hyphen_values = true)]
    marker_lat: Option<f64>,

    /// Longitude of the radar marker (use with --marker-lat)
    #[arg(long, requires = "marker_lat", allow_hyphen_values = true)]
    marker_lon: Option<f64>,

    /// Leave the radar marker out of the output
    #[arg(long)]
    no_marker: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let raster_path = args
        .raster
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.raster.clone()));
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()))
        .unwrap_or_else(|| PathBuf::from("land_polygons.geojson"));
    let cutoff = if (args.cutoff - fosen::DISTANCE_CUTOFF).abs() > f64::EPSILON {
        args.cutoff
    } else {
        file_config
            .as_ref()
            .map(|c| c.cutoff)
            .unwrap_or(fosen::DISTANCE_CUTOFF)
    };
    let simplify = if args.simplify != 0 {
        args.simplify
    } else {
        file_config.as_ref().map(|c| c.simplify).unwrap_or(0)
    };
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let show_marker =
        !args.no_marker && file_config.as_ref().map(|c| c.marker).unwrap_or(true);

    let origin = match (args.origin_lat, args.origin_lon) {
        (Some(lat), Some(lon)) => GeodeticReference::new(lat, lon),
        _ => file_config
            .as_ref()
            .and_then(|c| c.origin)
            .map(GeodeticReference::from)
            .unwrap_or(fosen::MAP_CORNER),
    };
    let radar = match (args.marker_lat, args.marker_lon) {
        (Some(lat), Some(lon)) => GeodeticReference::new(lat, lon),
        _ => file_config
            .as_ref()
            .and_then(|c| c.radar)
            .map(GeodeticReference::from)
            .unwrap_or(fosen::RADAR_POSITION),
    };

    let Some(raster_path) = raster_path else {
        bail!("Must provide --raster or set `raster` in the config file");
    };
    if cutoff.is_nan() || cutoff <= 0.0 {
        bail!("--cutoff must be a positive distance, got {}", cutoff);
    }

    println!("shoremap - Occupancy Grid Shoreline Tracer");
    println!("==========================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Raster: {}", raster_path.display());
        println!("  Grid origin: ({:.6}, {:.6})", origin.lat, origin.lon);
        if show_marker {
            println!("  Radar marker: ({:.6}, {:.6})", radar.lat, radar.lon);
        }
        println!("  Stitch cutoff: {} cells", cutoff);
        println!("  Simplify level: {}", simplify);
        println!("  Output: {}", output_path.display());
        println!();
    }

    // Fail on a bad origin before doing any work
    let projector = Projector::new(origin).context("Invalid grid origin")?;

    let spinner = create_spinner("Loading occupancy grid...");
    let start = Instant::now();
    let raster_file = load_raster(&raster_path)?;
    let raster = &raster_file.raster;
    spinner.finish_with_message(format!(
        "Loaded {}x{} grid ({} land cells) [{:.1}s]",
        raster.rows(),
        raster.cols(),
        raster.count(shoremap::domain::LAND),
        start.elapsed().as_secs_f32()
    ));

    if verbose && let Some(sensor) = raster_file.origin_point() {
        let position = projector.project_point(&sensor);
        println!(
            "  Sensor cell ({:.1}, {:.1}) -> ({:.6}, {:.6})",
            sensor.x, sensor.y, position.lat, position.lon
        );
    }

    let spinner = create_spinner("Extracting shoreline cells...");
    let start = Instant::now();
    let boundary = BoundaryExtractor::default()
        .extract(raster)
        .context("Failed to extract boundary")?;
    spinner.finish_with_message(format!(
        "Found {} boundary cells [{:.1}s]",
        boundary.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Stitching boundary loops...");
    let start = Instant::now();
    let mut loops = Stitcher::new(cutoff)
        .stitch(&boundary)
        .context("Failed to stitch boundary points")?;
    spinner.finish_with_message(format!(
        "Stitched {} loops [{:.1}s]",
        loops.len(),
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        for (index, chain) in loops.iter() {
            println!("  Loop {}: {} points", index, chain.len());
        }
        if loops.len() > fosen::EXPECTED_LOOPS {
            println!(
                "  Ignoring {} loops past loop {}",
                loops.len() - fosen::EXPECTED_LOOPS,
                fosen::EXPECTED_LOOPS - 1
            );
        }
    }

    close_patched_loop(&mut loops).context(
        "Land polygons are wired for four stitched loops; check the grid or --cutoff",
    )?;

    if simplify > 0 {
        let before = loops.point_count();
        loops = simplify_collection(&loops, epsilon_for_level(simplify));
        if verbose {
            println!(
                "  Simplified {} -> {} points",
                before,
                loops.point_count()
            );
        }
    }

    let spinner = create_spinner("Converting to WGS84...");
    let start = Instant::now();
    let polygons = to_geodetic(&loops, origin).context("Failed to convert loops")?;
    spinner.finish_with_message(format!(
        "Built {} land polygons with {} vertices [{:.1}s]",
        polygons.iter().count(),
        polygons.vertex_count(),
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        for (number, group) in polygons.iter() {
            println!("  Polygon {}: {} vertices", number, group.len());
        }
    }

    let spinner = create_spinner("Writing GeoJSON...");
    let start = Instant::now();
    let marker = show_marker.then(|| Marker::new("Radar Position", GeodeticPoint::from(radar)));
    save_geojson(&output_path, &polygons, marker.as_ref())?;
    spinner.finish_with_message(format!(
        "Wrote {} [{:.1}s]",
        output_path.display(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
