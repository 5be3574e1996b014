use std::f32::consts::TAU;

use crate::config::Config;
use crate::grid::GridMap;
use crate::player::Player;

/// Longest frame time applied in one step; larger gaps (pauses, window drags) are capped.
pub const MAX_DT: f32 = 0.1;

/// Input intents resolved once per tick. Flags combine additively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub quit: bool,
}

impl Intents {
    /// No motion requested.
    pub fn is_idle(&self) -> bool {
        !(self.forward
            || self.backward
            || self.strafe_left
            || self.strafe_right
            || self.rotate_left
            || self.rotate_right)
    }
}

/// Wrap an angle into [0, 2pi). Non-finite input maps to 0.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative can round up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Maps intents to position and heading deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub speed: f32,
    pub turn_speed: f32,
    pub tick_rate: f32,
}

impl Movement {
    pub fn from_config(config: &Config) -> Self {
        Self {
            speed: config.move_speed,
            turn_speed: config.turn_speed,
            tick_rate: config.tick_rate,
        }
    }

    /// Number of nominal ticks `dt` seconds stand for.
    #[inline]
    fn ticks(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, MAX_DT) * self.tick_rate
        } else {
            0.0
        }
    }

    /// Apply `intents` over `dt` seconds, ignoring walls.
    ///
    /// Translation uses the heading from the start of the tick; rotation is applied after.
    pub fn apply(&self, player: &Player, intents: &Intents, dt: f32) -> Player {
        let ticks = self.ticks(dt);
        let step = self.speed * ticks;
        let (s, c) = player.angle.sin_cos();

        // forward axis (c, s); right axis (s, -c)
        let mut fwd = 0.0;
        let mut strafe = 0.0;
        if intents.forward {
            fwd += 1.0;
        }
        if intents.backward {
            fwd -= 1.0;
        }
        if intents.strafe_right {
            strafe += 1.0;
        }
        if intents.strafe_left {
            strafe -= 1.0;
        }

        let dx = (c * fwd + s * strafe) * step;
        let dy = (s * fwd - c * strafe) * step;

        let mut yaw = 0.0;
        if intents.rotate_left {
            yaw -= 1.0;
        }
        if intents.rotate_right {
            yaw += 1.0;
        }

        Player {
            pos: [player.pos[0] + dx, player.pos[1] + dy],
            angle: wrap_angle(player.angle + yaw * self.turn_speed * ticks),
        }
    }

    /// Like [`Movement::apply`], but each axis of the move is dropped if it would end inside a
    /// wall. Only the destination is checked; `Config::validate` keeps a step under one tile.
    pub fn apply_blocked(
        &self,
        player: &Player,
        intents: &Intents,
        dt: f32,
        grid: &GridMap,
    ) -> Player {
        let target = self.apply(player, intents, dt);
        let mut next = Player {
            pos: player.pos,
            angle: target.angle,
        };
        if !grid.is_wall(target.pos[0], next.pos[1]) {
            next.pos[0] = target.pos[0];
        }
        if !grid.is_wall(next.pos[0], target.pos[1]) {
            next.pos[1] = target.pos[1];
        }
        next
    }
}
