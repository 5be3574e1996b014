use rayon::prelude::*;

use crate::caster::RayCaster;
use crate::color::Rgba;
use crate::config::Config;
use crate::grid::GridMap;
use crate::player::Player;
use crate::projection::{Projection, WallSlice};
use crate::{RaycastError, RaycastResult};

/// Pixel sink supplied by the host. Plots outside the surface are ignored.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn plot(&mut self, x: i32, y: i32, color: Rgba);

    /// Vertical run `y0..y1` in column `x`.
    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba) {
        for y in y0..y1 {
            self.plot(x, y, color);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub columns: u32,
    pub drawn: u32,
    pub escaped: u32,
    pub clamped: u32,
}

/// Ray direction for screen column `i`, sweeping left to right across the FOV.
#[inline]
pub fn column_angle(player_angle: f32, fov: f32, screen_width: u32, i: u32) -> f32 {
    let start = player_angle - fov * 0.5;
    start + i as f32 * (fov / screen_width as f32)
}

fn column(
    i: u32,
    player: &Player,
    grid: &GridMap,
    config: &Config,
    caster: &RayCaster,
    projection: &Projection,
) -> RaycastResult<(WallSlice, bool)> {
    let angle = column_angle(player.angle, config.fov, config.screen_width, i);
    let hit = caster.cast(player.pos, angle, grid)?;
    let projected = projection.project(player, &hit);
    Ok((
        projection.slice(i, &projected, config.wall_color),
        projected.clamped,
    ))
}

/// Sky above the horizon, ground below it.
pub fn clear_background<S: PixelSurface + ?Sized>(surface: &mut S, config: &Config) {
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    let mid = h / 2;
    for x in 0..w {
        surface.vline(x, 0, mid, config.ceiling_color);
        surface.vline(x, mid, h, config.floor_color);
    }
}

/// Cast one ray per column and plot the wall slices.
///
/// Columns are cast in parallel against a read-only snapshot of `player`, then plotted in
/// column order. A column whose ray escapes is left untouched.
pub fn render_frame<S: PixelSurface + ?Sized>(
    player: &Player,
    grid: &GridMap,
    config: &Config,
    caster: &RayCaster,
    surface: &mut S,
) -> FrameStats {
    let projection = Projection::from_config(config);
    let snapshot = *player;

    let slices: Vec<RaycastResult<(WallSlice, bool)>> = (0..config.screen_width)
        .into_par_iter()
        .map(|i| column(i, &snapshot, grid, config, caster, &projection))
        .collect();

    let mut stats = FrameStats {
        columns: config.screen_width,
        ..Default::default()
    };

    for (i, outcome) in slices.into_iter().enumerate() {
        match outcome {
            Ok((slice, clamped)) => {
                let top = slice.top as i32;
                surface.vline(
                    slice.column as i32,
                    top,
                    top + slice.height as i32,
                    slice.color,
                );
                stats.drawn += 1;
                if clamped {
                    stats.clamped += 1;
                }
            }
            Err(err @ RaycastError::RayEscaped { .. }) => {
                log::warn!("column {i}: {err}");
                stats.escaped += 1;
            }
            Err(err) => {
                log::warn!("column {i}: skipped, {err}");
            }
        }
    }

    stats
}
