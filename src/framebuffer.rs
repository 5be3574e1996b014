use crate::color::Rgba;
use crate::renderer::PixelSurface;

/// Software frame of packed 0RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color.to_u32());
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }
}

impl PixelSurface for FrameBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_u32();
        }
    }

    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba) {
        if x < 0 || x as u32 >= self.width {
            return;
        }
        let y0 = y0.max(0) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;
        let w = self.width as usize;
        let packed = color.to_u32();

        let mut idx = y0 * w + x as usize;
        for _ in y0..y1 {
            self.pixels[idx] = packed;
            idx += w;
        }
    }
}
