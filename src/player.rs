use crate::grid::GridMap;
use crate::movement::wrap_angle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: [f32; 2], // (x, y) in world units
    pub angle: f32,    // heading, radians in [0, 2pi)
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: [x, y],
            angle: wrap_angle(angle),
        }
    }

    /// Spawn at the world-space center of `grid`.
    pub fn centered_in(grid: &GridMap, angle: f32) -> Self {
        let [x, y] = grid.center();
        Self::new(x, y, angle)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        [self.angle.cos(), self.angle.sin()]
    }
}
