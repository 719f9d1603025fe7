use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use hexmap_viewer::config::ViewerConfig;
use hexmap_viewer::controller::InteractionController;
use hexmap_viewer::export::write_map_json;
use hexmap_viewer::hex::HexLayout;
use hexmap_viewer::provider::JsonMapProvider;
use hexmap_viewer::render::MapMode;
use hexmap_viewer::synthetic::generate_synthetic_map;
use hexmap_viewer::viewer;
use hexmap_viewer::zoom::Zoom;

#[derive(Parser, Debug)]
#[command(name = "hexmap_viewer")]
#[command(about = "View hex-grid strategy game maps with zoom and tile inspection")]
struct Args {
    /// Map file to open (JSON)
    map: Option<PathBuf>,

    /// Map mode: political or physical (overrides the config file)
    #[arg(short, long)]
    mode: Option<String>,

    /// Zoom factor 1-16 (overrides the config file)
    #[arg(short, long)]
    zoom: Option<i64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the tile under the display pixel "X,Y"
    #[arg(long, value_parser = parse_point)]
    inspect: Option<(i64, i64)>,

    /// Generate a synthetic map of "COLSxROWS" tiles instead of opening a file
    #[arg(long, value_parser = parse_size)]
    synthetic: Option<(usize, usize)>,

    /// Seed for --synthetic (random if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Save the rendered base image to a PNG file
    #[arg(long)]
    export_png: Option<PathBuf>,

    /// Export the loaded map as JSON
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Do not open the interactive window
    #[arg(long)]
    no_window: bool,
}

fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got \"{}\"", s))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {}", e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {}", e))?;
    Ok((x, y))
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS but got \"{}\"", s))?;
    let w: usize = w.trim().parse().map_err(|e| format!("bad width: {}", e))?;
    let h: usize = h.trim().parse().map_err(|e| format!("bad height: {}", e))?;
    if w == 0 || h == 0 {
        return Err("map size must be at least 1x1".to_string());
    }
    Ok((w, h))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    let mode_name = args.mode.as_deref().unwrap_or(&config.initial_mode);
    let mode: MapMode = mode_name.parse()?;
    let zoom = Zoom::new(args.zoom.unwrap_or(config.initial_zoom));

    let provider = JsonMapProvider::new(HexLayout::new(config.hex_radius));
    let mut controller = InteractionController::new(provider, mode, zoom);

    let map_path = match args.synthetic {
        Some((cols, rows)) => {
            let seed = args.seed.unwrap_or_else(rand::random);
            println!("Generating {}x{} map with seed: {}", cols, rows, seed);
            let path = PathBuf::from(format!("synthetic_{}.json", seed));
            write_map_json(&generate_synthetic_map(cols, rows, seed), &path)?;
            Some(path)
        }
        None => args.map.clone(),
    };

    if let Some(path) = &map_path {
        match controller.load_file(path) {
            Ok(()) => println!("{}", controller.status()),
            // Keep going with an empty viewer when a window is wanted
            Err(e) if !args.no_window => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
    info!("Zoom: {}", controller.zoom());

    if let Some((x, y)) = args.inspect {
        match controller.handle_click(x, y) {
            Some(text) => println!("{}", text),
            None => println!("No tile at ({}, {})", x, y),
        }
    }

    if let Some(path) = &args.export_png {
        controller.save_png(path)?;
        println!("Saved image to {}", path.display());
    }
    if let Some(path) = &args.export_json {
        controller.export_json(path)?;
        println!("Exported map to {}", path.display());
    }

    if !args.no_window {
        viewer::run_viewer(&mut controller, &config.window_title)?;
    }

    Ok(())
}
