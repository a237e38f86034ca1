//! Shared color and depth buffers.
//!
//! Both buffers are arrays of atomics so that triangles can be rasterized
//! from multiple worker threads without locking. The depth test claims a
//! pixel through a compare-exchange loop; the color store follows only
//! after the claim succeeds, so the final image carries the nearest
//! fragment at every pixel.

use std::sync::atomic::{AtomicU32, Ordering};

pub struct FrameBuffer {
    color: Vec<AtomicU32>,
    depth: Vec<AtomicU32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        let color = (0..len).map(|_| AtomicU32::new(0)).collect();
        let depth = (0..len)
            .map(|_| AtomicU32::new(f32::MAX.to_bits()))
            .collect();

        Self {
            color,
            depth,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the color buffer with a uniform gray shade (the shade byte is
    /// repeated in every channel, alpha included).
    pub fn clear(&self, shade: u8) {
        let s = shade as u32;
        let pixel = (s << 24) | (s << 16) | (s << 8) | s;
        for cell in &self.color {
            cell.store(pixel, Ordering::Relaxed);
        }
    }

    /// Reset every depth cell to the farthest representable value.
    pub fn clear_depth(&self) {
        let far = f32::MAX.to_bits();
        for cell in &self.depth {
            cell.store(far, Ordering::Relaxed);
        }
    }

    /// Try to claim the pixel at `index` for a fragment at `depth`.
    ///
    /// Returns true when `depth` is strictly nearer than the stored value
    /// and the cell was updated. Racing writers resolve through the
    /// compare-exchange: exactly one of two equal-depth contenders wins.
    #[inline]
    pub fn test_depth(&self, index: usize, depth: f32) -> bool {
        let cell = &self.depth[index];
        let mut current = cell.load(Ordering::Acquire);

        while depth < f32::from_bits(current) {
            match cell.compare_exchange_weak(
                current,
                depth.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }

        false
    }

    /// Write a lit texel into the color buffer. Callers pass the final
    /// modulated color after winning the depth test for `index`.
    #[inline]
    pub fn store_color(&self, index: usize, color: u32) {
        self.color[index].store(color, Ordering::Release);
    }

    /// Color at (x, y). Out-of-bounds coordinates read as black.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.color[(y * self.width + x) as usize].load(Ordering::Acquire)
    }

    /// Depth at (x, y). Out-of-bounds coordinates read as far.
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return f32::MAX;
        }
        f32::from_bits(self.depth[(y * self.width + x) as usize].load(Ordering::Acquire))
    }

    /// Copy the color buffer into a byte slice for presentation
    /// (native-endian u32 per pixel, ARGB8888).
    ///
    /// `out` must hold exactly `width * height * 4` bytes.
    pub fn write_to(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.color.len() * 4);
        for (cell, chunk) in self.color.iter().zip(out.chunks_exact_mut(4)) {
            chunk.copy_from_slice(&cell.load(Ordering::Acquire).to_ne_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_is_strictly_less_than() {
        let fb = FrameBuffer::new(2, 2);
        assert!(fb.test_depth(0, 5.0));
        assert!(!fb.test_depth(0, 5.0));
        assert!(fb.test_depth(0, 4.0));
        assert!(!fb.test_depth(0, 4.5));
    }

    #[test]
    fn clear_repeats_the_shade_byte() {
        let fb = FrameBuffer::new(1, 1);
        fb.clear(0x80);
        assert_eq!(fb.pixel(0, 0), 0x80808080);
    }

    #[test]
    fn clear_depth_resets_claims() {
        let fb = FrameBuffer::new(1, 1);
        assert!(fb.test_depth(0, 1.0));
        fb.clear_depth();
        assert!(fb.test_depth(0, 100.0));
    }

    #[test]
    fn out_of_bounds_reads_are_inert() {
        let fb = FrameBuffer::new(2, 2);
        assert_eq!(fb.pixel(5, 5), 0);
        assert_eq!(fb.depth_at(5, 5), f32::MAX);
    }
}
