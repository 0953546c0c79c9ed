//! 2D convolution over ARGB rasters, and the filters built on it.
//!
//! Taps are applied in correlation order: `weight(i, j)` multiplies the
//! source pixel at `(x + i, y + j)`. Source coordinates outside the image
//! are clamped to the nearest edge pixel.
//!
//! Only red, green and blue are filtered. The destination alpha is the
//! source alpha at the same position, for every kernel.

pub mod convolve;
pub mod filters;
pub mod kernels;

pub use convolve::{convolve, convolve_into};
pub use filters::{
    DEFAULT_BLUR_RADIUS, DEFAULT_SHARPEN_STRENGTH, GaussianBlurConfig, SharpenConfig,
    gaussian_blur, gaussian_blur_with, sharpen, sharpen_with,
};
pub use kernels::{Kernel2D, gaussian_kernel, sharpen_kernel};
