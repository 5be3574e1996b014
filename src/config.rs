use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, SQRT_2};

use crate::movement::MAX_DT;
use crate::{RaycastError, RaycastResult, color::Rgba};

/// Engine tunables, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Horizontal field of view, radians
    pub fov: f32,
    /// World units per tile
    pub block_size: f32,
    /// World units per tick
    pub move_speed: f32,
    /// Radians per tick
    pub turn_speed: f32,
    /// Ray march increment, world units
    pub step_size: f32,
    pub max_steps: u32,
    /// Smallest corrected distance used for projection
    pub epsilon: f32,
    /// Nominal ticks per second; speeds are per tick at this rate
    pub tick_rate: f32,
    /// Reject moves into wall tiles
    pub collision: bool,
    pub start_angle: f32,
    pub wall_color: Rgba,
    pub ceiling_color: Rgba,
    pub floor_color: Rgba,
    /// Distance shading strength, 0 disables
    pub fog: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            fov: FRAC_PI_3, // 60 degrees
            block_size: 64.0,
            move_speed: 3.0,
            turn_speed: 0.03,
            step_size: 1.0,
            max_steps: 4096,
            epsilon: 1e-3,
            tick_rate: 60.0,
            collision: true,
            start_angle: FRAC_PI_2,
            wall_color: Rgba::BLUE,
            ceiling_color: Rgba::rgb(30, 30, 70),
            floor_color: Rgba::rgb(40, 40, 40),
            fog: 0.002,
        }
    }
}

impl Config {
    pub fn validate(&self) -> RaycastResult<()> {
        let invalid = |msg: String| Err(RaycastError::InvalidConfig(msg));

        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= PI {
            return invalid(format!("fov must be in (0, pi), got {}", self.fov));
        }
        for (name, value) in [
            ("block_size", self.block_size),
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("step_size", self.step_size),
            ("epsilon", self.epsilon),
            ("tick_rate", self.tick_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        // A larger step could jump clean over a one-tile wall
        if self.step_size > self.block_size {
            return invalid(format!(
                "step_size {} exceeds block_size {}",
                self.step_size, self.block_size
            ));
        }
        // Longest single move: a capped frame, forward plus strafe. Collision only tests the
        // destination, so that move has to stay inside one tile.
        let max_move = self.move_speed * MAX_DT * self.tick_rate * SQRT_2;
        if max_move >= self.block_size {
            return invalid(format!(
                "move_speed {} covers {max_move} units in one step, block_size is {}",
                self.move_speed, self.block_size
            ));
        }
        if self.max_steps == 0 {
            return invalid("max_steps must be at least 1".to_string());
        }
        if !self.fog.is_finite() || self.fog < 0.0 {
            return invalid(format!("fog must be non-negative, got {}", self.fog));
        }
        Ok(())
    }

    /// Angle between adjacent screen columns.
    #[inline]
    pub fn angle_step(&self) -> f32 {
        self.fov / self.screen_width as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_step_larger_than_block_rejected() {
        let config = Config {
            step_size: 65.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RaycastError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_move_longer_than_block_rejected() {
        // 8 units per tick, 6 ticks in a capped frame, diagonal: about 68 units
        let config = Config {
            move_speed: 8.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RaycastError::InvalidConfig(_))
        ));

        let config = Config {
            move_speed: 7.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_values_rejected() {
        let cases = [
            Config {
                screen_width: 0,
                ..Config::default()
            },
            Config {
                fov: PI,
                ..Config::default()
            },
            Config {
                epsilon: 0.0,
                ..Config::default()
            },
            Config {
                max_steps: 0,
                ..Config::default()
            },
            Config {
                move_speed: f32::NAN,
                ..Config::default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_angle_step() {
        let config = Config::default();
        assert!((config.angle_step() * 640.0 - FRAC_PI_3).abs() < 1e-6);
    }
}
