use crate::caster::RayHit;
use crate::color::Rgba;
use crate::config::Config;
use crate::player::Player;
use crate::{RaycastError, RaycastResult};

/// Corrected distance and unclamped on-screen wall height for one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub distance: f32,
    pub height: f32,
    /// Distance was at or below epsilon and got clamped
    pub clamped: bool,
}

/// One vertical strip of wall, already clipped to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSlice {
    pub column: u32,
    pub top: u32,
    /// Rows covered, `top + height <= screen_height`
    pub height: u32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub block_size: f32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub epsilon: f32,
    pub fog: f32,
}

/// Perpendicular distance from the view plane: the raw distance scaled by the cosine of the
/// ray's offset from the heading.
#[inline]
pub fn corrected_distance(player: &Player, hit: &RayHit) -> f32 {
    let dx = hit.x - player.x();
    let dy = hit.y - player.y();
    let raw = dx.hypot(dy);
    let offset = dy.atan2(dx) - player.angle;
    raw * offset.cos()
}

impl Projection {
    pub fn from_config(config: &Config) -> Self {
        Self {
            block_size: config.block_size,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            epsilon: config.epsilon,
            fog: config.fog,
        }
    }

    /// Reject distances the projection can't divide by.
    #[inline]
    pub fn check_distance(&self, distance: f32) -> RaycastResult<f32> {
        if distance.is_finite() && distance > self.epsilon {
            Ok(distance)
        } else {
            Err(RaycastError::DegenerateDistance { distance })
        }
    }

    pub fn project(&self, player: &Player, hit: &RayHit) -> Projected {
        let raw = corrected_distance(player, hit);
        let (distance, clamped) = match self.check_distance(raw) {
            Ok(d) => (d, false),
            Err(err) => {
                log::trace!("{err}, clamping to {}", self.epsilon);
                (self.epsilon, true)
            }
        };
        let height = (self.block_size / distance) * (self.screen_width as f32 * 0.5);
        Projected {
            distance,
            height,
            clamped,
        }
    }

    /// Center a projected wall vertically and clip it to the screen.
    pub fn slice(&self, column: u32, projected: &Projected, base: Rgba) -> WallSlice {
        let screen_h = self.screen_height as f32;
        let top = ((screen_h - projected.height) * 0.5).max(0.0);
        let bottom = ((screen_h + projected.height) * 0.5).min(screen_h);
        let top_px = top as u32;
        let bottom_px = (bottom as u32).max(top_px);

        WallSlice {
            column,
            top: top_px,
            height: bottom_px - top_px,
            color: base.shade(self.shade_factor(projected.distance)),
        }
    }

    #[inline]
    fn shade_factor(&self, distance: f32) -> f32 {
        1.0 / (1.0 + distance * self.fog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_6;

    fn projection() -> Projection {
        Projection {
            block_size: 64.0,
            screen_width: 640,
            screen_height: 480,
            epsilon: 1e-3,
            fog: 0.0,
        }
    }

    fn hit(x: f32, y: f32) -> RayHit {
        RayHit { x, y, steps: 0 }
    }

    #[test]
    fn test_center_ray_not_corrected() {
        let player = Player::new(100.0, 100.0, 0.0);
        let h = hit(228.0, 100.0);
        assert!((corrected_distance(&player, &h) - 128.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_ray_corrected() {
        let player = Player::new(0.0, 0.0, 0.0);
        // raw distance 200 at 30 degrees off-axis
        let h = hit(200.0 * FRAC_PI_6.cos(), 200.0 * FRAC_PI_6.sin());
        let d = corrected_distance(&player, &h);
        assert!((d - 200.0 * FRAC_PI_6.cos()).abs() < 1e-3);
    }

    #[test]
    fn test_height_inverse_distance() {
        let player = Player::new(0.0, 0.0, 0.0);
        let p = projection().project(&player, &hit(64.0, 0.0));
        assert!(!p.clamped);
        assert!((p.height - 320.0).abs() < 1e-3);
        let far = projection().project(&player, &hit(128.0, 0.0));
        assert!((far.height - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_distance_clamped() {
        let player = Player::new(5.0, 5.0, 0.0);
        let p = projection().project(&player, &hit(5.0, 5.0));
        assert!(p.clamped);
        assert_eq!(p.distance, 1e-3);
        assert!(p.height.is_finite());
    }

    #[test]
    fn test_slice_centered() {
        let proj = projection();
        let p = Projected {
            distance: 128.0,
            height: 160.0,
            clamped: false,
        };
        let s = proj.slice(7, &p, Rgba::BLUE);
        assert_eq!(s.column, 7);
        assert_eq!(s.top, 160);
        assert_eq!(s.height, 160);
        assert_eq!(s.color, Rgba::BLUE);
    }

    #[test]
    fn test_slice_clipped() {
        let proj = projection();
        let p = Projected {
            distance: 1.0,
            height: 10_000.0,
            clamped: false,
        };
        let s = proj.slice(0, &p, Rgba::BLUE);
        assert_eq!(s.top, 0);
        assert_eq!(s.height, 480);
    }

    #[test]
    fn test_fog_darkens_far_walls() {
        let proj = Projection {
            fog: 0.01,
            ..projection()
        };
        let near = Projected {
            distance: 10.0,
            height: 100.0,
            clamped: false,
        };
        let far = Projected {
            distance: 300.0,
            ..near
        };
        let near = proj.slice(0, &near, Rgba::WHITE);
        let far = proj.slice(0, &far, Rgba::WHITE);
        assert!(far.color.r < near.color.r);
    }
}
