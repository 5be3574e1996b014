use crate::{RaycastError, RaycastResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

/// Layout the engine starts with: 10 rows by 13 columns, walled border.
pub const DEFAULT_LAYOUT: [&str; 10] = [
    "1111111111111",
    "1000000000001",
    "1001000000001",
    "1000000100001",
    "1000001000001",
    "1000000000001",
    "1000000000001",
    "1001000000001",
    "1000000000001",
    "1111111111111",
];

/// Immutable rectangular tile grid. Row-major, row 0 at world y = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    block_size: f32,
}

impl GridMap {
    /// Build from literal rows of `0`/`1`. Every row must match the first row's length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], block_size: f32) -> RaycastResult<Self> {
        let first = rows.first().ok_or(RaycastError::EmptyMap)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(RaycastError::EmptyMap);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(RaycastError::InvalidMapShape {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '1' => Cell::Wall,
                    '0' => Cell::Empty,
                    _ => return Err(RaycastError::InvalidCell { row, col, ch }),
                });
            }
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
            block_size,
        })
    }

    /// Parse a text layout, one row per line. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str, block_size: f32) -> RaycastResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        Self::from_rows(&rows, block_size)
    }

    pub fn default_layout(block_size: f32) -> RaycastResult<Self> {
        Self::from_rows(&DEFAULT_LAYOUT, block_size)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// World-space extent (x, y).
    pub fn world_size(&self) -> [f32; 2] {
        [
            self.width as f32 * self.block_size,
            self.height as f32 * self.block_size,
        ]
    }

    /// World-space center of the grid.
    pub fn center(&self) -> [f32; 2] {
        let [w, h] = self.world_size();
        [w * 0.5, h * 0.5]
    }

    /// Strict lookup by tile index.
    pub fn cell(&self, col: i64, row: i64) -> RaycastResult<Cell> {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return Err(RaycastError::OutOfBounds { col, row });
        }
        Ok(self.cells[row as usize * self.width + col as usize])
    }

    /// Strict lookup by world coordinate.
    #[inline]
    pub fn cell_at(&self, x: f32, y: f32) -> RaycastResult<Cell> {
        let (col, row) = self.tile_index(x, y);
        self.cell(col, row)
    }

    /// Tile containing a world point. Floors, so small negatives land on tile -1.
    #[inline]
    pub fn tile_index(&self, x: f32, y: f32) -> (i64, i64) {
        (
            (x / self.block_size).floor() as i64,
            (y / self.block_size).floor() as i64,
        )
    }

    /// Fail-safe lookup: anything outside the grid is a wall.
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        !matches!(self.cell_at(x, y), Ok(Cell::Empty))
    }

    /// True when every border tile is a wall, so no ray can leave the grid.
    pub fn is_sealed(&self) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        let wall = |col, row| self.cell(col, row) == Ok(Cell::Wall);
        (0..w).all(|c| wall(c, 0) && wall(c, h - 1)) && (0..h).all(|r| wall(0, r) && wall(w - 1, r))
    }
}
