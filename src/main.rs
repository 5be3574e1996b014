//! Gridcaster entry point: parses flags, builds the game state and runs the winit loop.

use std::path::PathBuf;

use clap::Parser;
use gridcaster::{Config, GameState, GridMap};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::shell::App;

mod shell;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "gridcaster")]
#[command(about = "First-person raycasting renderer over a tile grid")]
#[command(version)]
struct Args {
    /// Internal render width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Internal render height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov_degrees: f32,

    /// Initial window size as a multiple of the render size
    #[arg(long, default_value_t = 1.5)]
    scale: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Map layout file of `0`/`1` rows; the built-in map is used when omitted
    #[arg(long)]
    map: Option<PathBuf>,

    /// Let the player walk through walls
    #[arg(long)]
    no_collision: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    log::info!("Starting gridcaster v{}", gridcaster::VERSION);

    let config = Config {
        screen_width: args.width,
        screen_height: args.height,
        fov: args.fov_degrees.to_radians(),
        collision: !args.no_collision,
        ..Config::default()
    };

    let grid = match &args.map {
        Some(path) => {
            log::info!("Loading map from {}", path.display());
            GridMap::parse(&std::fs::read_to_string(path)?, config.block_size)?
        }
        None => GridMap::default_layout(config.block_size)?,
    };
    let state = GameState::new(config, grid)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(state, args.fps, args.scale);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(msg) => Err(msg.into()),
        None => Ok(()),
    }
}
