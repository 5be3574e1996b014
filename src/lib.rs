//! # Gridcaster
//!
//! A first-person raycasting renderer over a 2D tile grid.
//!
//! The library is the engine core and has no windowing dependency:
//!
//! - **Grid**: validated rectangular wall/empty tile map
//! - **Player / Movement**: position and heading, driven by input intents
//! - **Caster**: bounded ray march against the grid
//! - **Projection**: fisheye-corrected distance to screen-space wall slice
//! - **Renderer**: per-column sweep across the field of view onto a `PixelSurface`
//!
//! The binary wraps it in a winit window presented through softbuffer.

pub mod caster;
pub mod color;
pub mod config;
pub mod framebuffer;
pub mod grid;
pub mod movement;
pub mod player;
pub mod projection;
pub mod renderer;
pub mod state;

pub use caster::{EdgePolicy, RayCaster, RayHit};
pub use color::Rgba;
pub use config::Config;
pub use framebuffer::FrameBuffer;
pub use grid::{Cell, GridMap};
pub use movement::{Intents, Movement, wrap_angle};
pub use player::Player;
pub use projection::{Projected, Projection, WallSlice};
pub use renderer::{FrameStats, PixelSurface, clear_background, render_frame};
pub use state::GameState;

/// Errors raised by the engine core.
///
/// Construction errors (map, config) reach the caller. Per-column faults during a
/// frame are recovered inside the renderer and never stop the loop.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RaycastError {
    /// Tile lookup outside the grid
    #[error("tile ({col}, {row}) is outside the grid")]
    OutOfBounds { col: i64, row: i64 },

    /// Ray marched the maximum number of steps without touching a wall
    #[error("ray escaped after {steps} steps without hitting a wall")]
    RayEscaped { steps: u32 },

    /// Corrected distance at or below epsilon
    #[error("degenerate wall distance {distance}")]
    DegenerateDistance { distance: f32 },

    /// A map row differs in length from the first row
    #[error("map row {row} has {found} cells, expected {expected}")]
    InvalidMapShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Map layout contains no rows
    #[error("map has no rows")]
    EmptyMap,

    /// Map layout contains a character other than `0` or `1`
    #[error("invalid map cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    /// Configuration rejected by `Config::validate`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the engine core.
pub type RaycastResult<T> = Result<T, RaycastError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
