use pixel_kernels::{Argb, Image, RasterImage};

/// Deterministic noise-like raster with every channel varying, alpha included.
pub fn hashed_argb(width: usize, height: usize, seed: u32) -> RasterImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let mut h = (x as u32)
                .wrapping_mul(0x9e37_79b1)
                .wrapping_add((y as u32).wrapping_mul(0x85eb_ca77))
                .wrapping_add(seed);
            h ^= h >> 15;
            h = h.wrapping_mul(0x2c1b_3c6d);
            h ^= h >> 12;
            data.push(Argb::from_u32(h));
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}

/// High-contrast opaque checkerboard.
pub fn checkerboard_argb(width: usize, height: usize, cell: usize) -> RasterImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) & 1 == 0;
            data.push(if on {
                Argb::opaque(220, 200, 180)
            } else {
                Argb::opaque(32, 48, 64)
            });
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}
