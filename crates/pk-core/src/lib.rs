//! Foundational primitives for the pixel-kernels workspace.
//!
//! ## Pixels
//! [`Argb`] holds four 8-bit channels with straight alpha. Its packed `u32`
//! form is `0xAARRGGBB`. A [`RasterImage`] is a row-major grid of them.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers and subviews.
//!
//! ## Border Handling
//! Out-of-range coordinates are clamped to the nearest edge pixel. There is
//! no wrap or reflect mode; [`BorderSampler`] is the single access path used
//! by the filters and the resampler.

mod border;
mod error;
mod image;
mod pixel;
mod sample;

pub use border::clamp_index;
pub use error::Error;
pub use image::{Image, ImageView, RasterImage, raster_from_packed, raster_to_packed};
pub use pixel::{Argb, TRUNCATION_EPSILON, channel_from_f64};
pub use sample::BorderSampler;

/// Fails with [`Error::InvalidDimension`] unless both sides are non-zero.
pub fn ensure_non_empty(width: usize, height: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}
