use crate::caster::{EdgePolicy, RayCaster};
use crate::config::Config;
use crate::grid::{Cell, GridMap};
use crate::movement::{Intents, Movement};
use crate::player::Player;
use crate::renderer::{FrameStats, PixelSurface, clear_background, render_frame};
use crate::{RaycastError, RaycastResult};

/// Everything one session owns. The host drives it with [`GameState::tick`] or with
/// [`GameState::apply_input`] followed by [`GameState::render`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub grid: GridMap,
    pub player: Player,
    movement: Movement,
    caster: RayCaster,
}

impl GameState {
    pub fn new(config: Config, grid: GridMap) -> RaycastResult<Self> {
        config.validate()?;
        if grid.block_size() != config.block_size {
            return Err(RaycastError::InvalidConfig(format!(
                "grid block size {} differs from configured {}",
                grid.block_size(),
                config.block_size
            )));
        }

        let [x, y] = spawn_point(&grid);
        let player = Player::new(x, y, config.start_angle);
        if !grid.is_sealed() {
            log::warn!("map border has gaps; rays leaving the grid stop at its edge");
        }
        log::debug!(
            "game state: {}x{} grid, player at ({x}, {y}) facing {}",
            grid.width(),
            grid.height(),
            player.angle
        );

        let caster = RayCaster::from_config(&config).reaching(&grid);
        if caster.max_steps > config.max_steps {
            log::debug!(
                "raised ray step limit from {} to {} to span the map",
                config.max_steps,
                caster.max_steps
            );
        }

        Ok(Self {
            movement: Movement::from_config(&config),
            caster,
            config,
            grid,
            player,
        })
    }

    /// Default configuration over the built-in layout.
    pub fn with_default_map(config: Config) -> RaycastResult<Self> {
        let grid = GridMap::default_layout(config.block_size)?;
        Self::new(config, grid)
    }

    pub fn set_edge_policy(&mut self, edge: EdgePolicy) {
        self.caster = self.caster.with_edge(edge);
    }

    pub fn apply_input(&mut self, intents: &Intents, dt: f32) {
        if intents.is_idle() {
            return;
        }
        self.player = if self.config.collision {
            self.movement
                .apply_blocked(&self.player, intents, dt, &self.grid)
        } else {
            self.movement.apply(&self.player, intents, dt)
        };
    }

    pub fn render<S: PixelSurface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        clear_background(surface, &self.config);
        render_frame(&self.player, &self.grid, &self.config, &self.caster, surface)
    }

    /// One frame: input, then movement, then rendering.
    pub fn tick<S: PixelSurface + ?Sized>(
        &mut self,
        intents: &Intents,
        dt: f32,
        surface: &mut S,
    ) -> FrameStats {
        self.apply_input(intents, dt);
        self.render(surface)
    }
}

/// Grid center if it's open, otherwise the center of the open tile nearest to it.
fn spawn_point(grid: &GridMap) -> [f32; 2] {
    let center = grid.center();
    if !grid.is_wall(center[0], center[1]) {
        return center;
    }

    let b = grid.block_size();
    let mut best: Option<([f32; 2], f32)> = None;
    for row in 0..grid.height() as i64 {
        for col in 0..grid.width() as i64 {
            if grid.cell(col, row) != Ok(Cell::Empty) {
                continue;
            }
            let p = [(col as f32 + 0.5) * b, (row as f32 + 0.5) * b];
            let d = (p[0] - center[0]).hypot(p[1] - center[1]);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((p, d));
            }
        }
    }
    // A map with no open tile still gets a position; every ray stops at distance zero.
    best.map_or(center, |(p, _)| p)
}
