//! Textures sampled by the rasterizer.
//!
//! Pixels are stored as packed ARGB8888. Decoding compressed images is
//! delegated to the `image` crate at the boundary; the pipeline itself only
//! ever sees the flat ARGB buffer.

use std::path::Path;

use crate::colors;

pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_argb(a, r, g, b)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wrap an already-decoded RGBA8 buffer (4 bytes per pixel, row-major).
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != (width * height * 4) as usize {
            return None;
        }

        let data = bytes
            .chunks_exact(4)
            .map(|p| colors::pack_argb(p[3], p[0], p[1], p[2]))
            .collect();

        Some(Self {
            data,
            width,
            height,
        })
    }

    /// A single-pixel texture of one color.
    pub fn solid(color: u32) -> Self {
        Self {
            data: vec![color],
            width: 1,
            height: 1,
        }
    }

    /// A square checkerboard with `cells` cells per side.
    pub fn checkerboard(size: u32, cells: u32, color_a: u32, color_b: u32) -> Self {
        let cell = (size / cells).max(1);
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    color_a
                } else {
                    color_b
                }
            })
            .collect();

        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Fetch the pixel at integer coordinates. Callers clamp to bounds.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> u32 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
