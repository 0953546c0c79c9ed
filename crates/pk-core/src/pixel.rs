/// One 8-bit-per-channel pixel with straight (non-premultiplied) alpha.
///
/// The packed `u32` form is `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    pub const fn from_u32(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Argb {
    fn from(packed: u32) -> Self {
        Self::from_u32(packed)
    }
}

impl From<Argb> for u32 {
    fn from(px: Argb) -> Self {
        px.to_u32()
    }
}

/// Rounding allowance added before truncation.
///
/// Absorbs f64 summation error of normalized kernels (`sum(c * w)` landing a
/// few ulps under `c`). Far below `1/256`, the finest step an integer-input
/// bicubic tap grid can produce exactly.
pub const TRUNCATION_EPSILON: f64 = 1e-6;

/// Converts an accumulated channel value to `u8`: truncation toward zero,
/// then clamping to `[0, 255]`.
#[inline]
pub fn channel_from_f64(v: f64) -> u8 {
    ((v + TRUNCATION_EPSILON) as i32).clamp(0, 255) as u8
}
