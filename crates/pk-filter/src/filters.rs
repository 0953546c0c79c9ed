use log::debug;
use pk_core::{Argb, Error, ImageView, RasterImage};

use crate::convolve::convolve;
use crate::kernels::{gaussian_kernel, sharpen_kernel};

pub const DEFAULT_SHARPEN_STRENGTH: f32 = 1.5;
pub const DEFAULT_BLUR_RADIUS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenConfig {
    /// Weight of the negative orthogonal taps. `0.0` is a no-op.
    pub strength: f32,
}

impl Default for SharpenConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_SHARPEN_STRENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaussianBlurConfig {
    /// Kernel half-width; `sigma = radius / 3`. `0` is a no-op.
    pub radius: usize,
}

impl Default for GaussianBlurConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BLUR_RADIUS,
        }
    }
}

/// Unsharp-mask sharpening of the color channels; alpha is preserved.
pub fn sharpen(src: &ImageView<'_, Argb>, strength: f32) -> Result<RasterImage, Error> {
    debug!("sharpen: strength={strength}");
    let kernel = sharpen_kernel(strength)?;
    convolve(src, &kernel)
}

pub fn sharpen_with(src: &ImageView<'_, Argb>, cfg: &SharpenConfig) -> Result<RasterImage, Error> {
    sharpen(src, cfg.strength)
}

/// Gaussian blur of the color channels; alpha is preserved.
pub fn gaussian_blur(src: &ImageView<'_, Argb>, radius: usize) -> Result<RasterImage, Error> {
    debug!("gaussian_blur: radius={radius}");
    convolve(src, &gaussian_kernel(radius))
}

pub fn gaussian_blur_with(
    src: &ImageView<'_, Argb>,
    cfg: &GaussianBlurConfig,
) -> Result<RasterImage, Error> {
    gaussian_blur(src, cfg.radius)
}
