use crate::config::Config;
use crate::grid::{Cell, GridMap};
use crate::{RaycastError, RaycastResult};

/// How the march treats points outside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Outside the grid counts as wall, so the map edge always stops a ray.
    #[default]
    Solid,
    /// Outside the grid counts as empty; a ray leaving through a gap runs until `max_steps`.
    Void,
}

/// First point along a ray that lies inside a wall tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub x: f32,
    pub y: f32,
    /// Steps taken before contact
    pub steps: u32,
}

impl RayHit {
    /// Euclidean distance from `origin` to the hit.
    #[inline]
    pub fn distance_from(&self, origin: [f32; 2]) -> f32 {
        (self.x - origin[0]).hypot(self.y - origin[1])
    }
}

/// Fixed-increment ray marcher with a hard step bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCaster {
    pub step_size: f32,
    pub max_steps: u32,
    pub edge: EdgePolicy,
}

impl RayCaster {
    pub fn from_config(config: &Config) -> Self {
        Self {
            step_size: config.step_size,
            max_steps: config.max_steps,
            edge: EdgePolicy::Solid,
        }
    }

    pub fn with_edge(mut self, edge: EdgePolicy) -> Self {
        self.edge = edge;
        self
    }

    /// Steps needed to cross `grid` corner to corner.
    pub fn steps_to_cross(&self, grid: &GridMap) -> u32 {
        let [w, h] = grid.world_size();
        ((w.hypot(h) / self.step_size).ceil() as u32).saturating_add(1)
    }

    /// Raise `max_steps` so a ray from anywhere inside `grid` reaches its far edge.
    pub fn reaching(mut self, grid: &GridMap) -> Self {
        self.max_steps = self.max_steps.max(self.steps_to_cross(grid));
        self
    }

    #[inline]
    fn blocked(&self, grid: &GridMap, x: f32, y: f32) -> bool {
        match grid.cell_at(x, y) {
            Ok(cell) => cell == Cell::Wall,
            Err(_) => self.edge == EdgePolicy::Solid,
        }
    }

    /// March from `origin` along `angle` until the point enters a wall.
    ///
    /// The point is advanced by `i * step` from the origin rather than accumulated, so long rays
    /// don't drift.
    pub fn cast(&self, origin: [f32; 2], angle: f32, grid: &GridMap) -> RaycastResult<RayHit> {
        let (sin, cos) = angle.sin_cos();
        let (dx, dy) = (cos * self.step_size, sin * self.step_size);

        for steps in 0..=self.max_steps {
            let t = steps as f32;
            let x = origin[0] + dx * t;
            let y = origin[1] + dy * t;
            if self.blocked(grid, x, y) {
                return Ok(RayHit { x, y, steps });
            }
        }

        Err(RaycastError::RayEscaped {
            steps: self.max_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn caster() -> RayCaster {
        RayCaster {
            step_size: 1.0,
            max_steps: 4096,
            edge: EdgePolicy::Solid,
        }
    }

    fn room() -> GridMap {
        GridMap::from_rows(&["11111", "10001", "10001", "10001", "11111"], 64.0).unwrap()
    }

    #[test]
    fn test_axis_aligned_hits() {
        let grid = room();
        let origin = [160.0, 160.0];
        // interior spans 64..256 on both axes; walls begin at 256 and end at 64
        let cases = [
            (0.0, 96.0),
            (FRAC_PI_2, 96.0),
            (PI, 96.0),
            (3.0 * FRAC_PI_2, 96.0),
        ];
        for (angle, expected) in cases {
            let hit = caster().cast(origin, angle, &grid).unwrap();
            let d = hit.distance_from(origin);
            assert!((d - expected).abs() <= 1.0 + 1e-3, "angle {angle}: {d}");
        }
    }

    #[test]
    fn test_origin_inside_wall() {
        let grid = room();
        let hit = caster().cast([10.0, 10.0], 0.3, &grid).unwrap();
        assert_eq!(hit.steps, 0);
        assert_eq!((hit.x, hit.y), (10.0, 10.0));
    }

    #[test]
    fn test_interior_pillar_blocks() {
        let rows = ["11111", "10001", "10101", "10001", "11111"];
        let grid = GridMap::from_rows(&rows, 64.0).unwrap();
        let hit = caster().cast([96.0, 160.0], 0.0, &grid).unwrap();
        assert!((hit.x - 128.0).abs() <= 1.0);
    }

    #[test]
    fn test_solid_edge_stops_at_gap() {
        let grid = GridMap::from_rows(&["111", "100", "111"], 64.0).unwrap();
        let hit = caster().cast([96.0, 96.0], 0.0, &grid).unwrap();
        assert!((hit.x - 192.0).abs() <= 1.0);
    }

    #[test]
    fn test_void_edge_escapes() {
        let grid = GridMap::from_rows(&["111", "100", "111"], 64.0).unwrap();
        let caster = RayCaster {
            max_steps: 500,
            ..caster()
        }
        .with_edge(EdgePolicy::Void);
        assert_eq!(
            caster.cast([96.0, 96.0], 0.0, &grid),
            Err(RaycastError::RayEscaped { steps: 500 })
        );
    }

    #[test]
    fn test_reaching_covers_wide_grid() {
        let wall = "1".repeat(140);
        let open = format!("1{}1", "0".repeat(138));
        let grid = GridMap::from_rows(&[wall.clone(), open, wall], 64.0).unwrap();
        let short = RayCaster {
            max_steps: 4096,
            ..caster()
        };
        assert!(short.cast([96.0, 96.0], 0.0, &grid).is_err());

        let fitted = short.reaching(&grid);
        assert!(fitted.max_steps >= 140 * 64);
        let hit = fitted.cast([96.0, 96.0], 0.0, &grid).unwrap();
        assert!((hit.x - 139.0 * 64.0).abs() <= 1.0);

        // never lowers a larger budget
        let big = RayCaster {
            max_steps: 100_000,
            ..caster()
        };
        assert_eq!(big.reaching(&grid).max_steps, 100_000);
    }

    #[test]
    fn test_step_bound() {
        let grid = GridMap::from_rows(&["00000000", "00000000"], 64.0).unwrap();
        let caster = RayCaster {
            max_steps: 10,
            ..caster()
        };
        assert!(matches!(
            caster.cast([32.0, 32.0], 0.0, &grid),
            Err(RaycastError::RayEscaped { steps: 10 })
        ));
    }
}
