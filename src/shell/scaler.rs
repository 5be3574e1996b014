use rayon::prelude::*;

/// Precomputed nearest-neighbour mapping from window pixels to frame pixels.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_row: Vec<usize>, // row start offset into the source
    dst_w: usize,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_row: Vec::new(),
            dst_w: 0,
        }
    }

    pub fn build(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
            return Self::empty();
        }

        // Sample at pixel centers so edge pixels get an even share
        let sx = src_w as f32 / dst_w as f32;
        let sy = src_h as f32 / dst_h as f32;

        let src_x = (0..dst_w)
            .map(|x| (((x as f32 + 0.5) * sx) as usize).min(src_w - 1))
            .collect();
        let src_row = (0..dst_h)
            .map(|y| (((y as f32 + 0.5) * sy) as usize).min(src_h - 1) * src_w)
            .collect();

        Self {
            src_x,
            src_row,
            dst_w,
        }
    }

    #[inline]
    pub fn matches(&self, dst_w: usize, dst_h: usize) -> bool {
        self.dst_w == dst_w && self.src_row.len() == dst_h
    }
}

/// Parallel nearest-neighbour stretch. Rows are independent, so each is written on its own task.
pub fn blit_nearest(dst: &mut [u32], src: &[u32], lut: &ScaleLut) {
    if lut.dst_w == 0 {
        return;
    }
    dst.par_chunks_mut(lut.dst_w)
        .zip(lut.src_row.par_iter())
        .for_each(|(dst_row, &row)| {
            let src_row = &src[row..];
            for (d, &x) in dst_row.iter_mut().zip(&lut.src_x) {
                *d = src_row[x];
            }
        });
}
