//! Packed ARGB8888 color helpers.

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE: u32 = 0xFF0000FF;
pub const MAGENTA: u32 = 0xFFFF00FF;

/// Pack channels into a single ARGB pixel.
#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Scale the r/g/b channels by `amount` in [0, 1], forcing full alpha.
#[inline]
pub fn modulate(color: u32, amount: f32) -> u32 {
    let r = (((color >> 16) & 0xFF) as f32 * amount) as u32;
    let g = (((color >> 8) & 0xFF) as f32 * amount) as u32;
    let b = ((color & 0xFF) as f32 * amount) as u32;
    0xFF000000 | (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_scales_channels() {
        assert_eq!(modulate(WHITE, 0.0), BLACK);
        assert_eq!(modulate(WHITE, 1.0), WHITE);
        let half = modulate(pack_argb(0xFF, 200, 100, 50), 0.5);
        assert_eq!(half, pack_argb(0xFF, 100, 50, 25));
    }

    #[test]
    fn modulate_clamps_overbright() {
        assert_eq!(modulate(WHITE, 2.0), WHITE);
    }
}
