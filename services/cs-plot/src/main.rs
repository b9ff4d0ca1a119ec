//! Cubed-sphere diagnostics driver.
//!
//! Builds a cubed-sphere mesh and analytic test fields on a lat-lon grid,
//! plots the grid and each field in the requested views and exports the
//! fields to NetCDF.

mod config;
mod fields;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cs_common::{CubedSphere, GridProjection, LatLonGrid, MapSelector};
use netcdf_export::save_netcdf;
use renderer::{CoastlineSource, Plotter, RenderOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::PlotConfig;

#[derive(Parser, Debug)]
#[command(name = "cs-plot")]
#[command(about = "Plot cubed-sphere grids and scalar fields, export fields to NetCDF")]
struct Args {
    /// Configuration file path (default: read CS_GRAPH_DIR / CS_DATA_DIR)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per panel edge
    #[arg(short = 'n', long, default_value_t = 16)]
    resolution: usize,

    /// Grid projection family
    #[arg(short, long, default_value = "gnomonic_equiangular")]
    grid: String,

    /// Map view(s): mercator, sphere
    #[arg(short, long = "projection", default_values_t = vec!["mercator".to_string(), "sphere".to_string()])]
    projections: Vec<String>,

    /// Lat-lon grid longitudes
    #[arg(long, default_value_t = 361)]
    nlon: usize,

    /// Lat-lon grid latitudes
    #[arg(long, default_value_t = 181)]
    nlat: usize,

    /// NetCDF dataset name (default: the mesh name)
    #[arg(long)]
    dataset: Option<String>,

    /// Equirectangular basemap image
    #[arg(long)]
    basemap: Option<PathBuf>,

    /// GeoJSON coastline file for field maps
    #[arg(long, conflicts_with = "no_coastlines")]
    coastlines: Option<PathBuf>,

    /// Draw field maps without coastlines
    #[arg(long)]
    no_coastlines: bool,

    /// Print a JSON summary of the written files
    #[arg(long)]
    summary: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    // Reject bad selectors before anything is written
    for projection in &args.projections {
        projection.parse::<MapSelector>()?;
    }

    let config = PlotConfig::load(args.config.as_deref())?;
    config.ensure_dirs()?;
    info!(
        graph_dir = %config.output.graph_dir.display(),
        data_dir = %config.output.data_dir.display(),
        "Loaded configuration"
    );

    let grid_projection: GridProjection = args.grid.parse()?;
    let mesh = CubedSphere::new(args.resolution, grid_projection)
        .with_context(|| format!("Failed to build {} mesh", args.grid))?;
    let latlon = LatLonGrid::uniform(args.nlon, args.nlat)?;
    let fields = fields::test_fields(&latlon);
    info!(mesh = %mesh.name, cells = mesh.cell_count(), nlon = args.nlon, nlat = args.nlat, "Inputs ready");

    let defaults = RenderOptions::default();
    let options = RenderOptions {
        basemap_image: args.basemap.clone().or_else(|| config.basemap_image.clone()),
        line_width: config.line_width.unwrap_or(defaults.line_width),
        coastlines: match (&args.coastlines, args.no_coastlines) {
            (_, true) => CoastlineSource::None,
            (Some(path), false) => CoastlineSource::File(path.clone()),
            (None, false) => config.coastline_source(),
        },
        ..defaults
    };
    let plotter = Plotter::with_options(config.output.clone(), options);

    let mut figures = Vec::new();
    for projection in &args.projections {
        let report = plotter.plot_grid(&mesh, projection)?;
        figures.push(report.path);

        for field in &fields {
            let report = plotter.plot_scalar_field(field, &mesh, &latlon, projection)?;
            figures.push(report.path);
        }
    }

    let dataset = args.dataset.clone().unwrap_or_else(|| mesh.name.clone());
    let data_file = save_netcdf(&fields, &dataset, &config.output.data_dir)?;

    info!(figures = figures.len(), data_file = %data_file.display(), "All outputs written");

    if args.summary {
        let summary = serde_json::json!({
            "mesh": mesh.name,
            "figures": figures,
            "dataset": data_file,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
