//! Bicubic 2x upscaling for ARGB rasters.
//!
//! Destination pixel `(x, y)` samples the source at `(x / 2, y / 2)`. There
//! is no half-pixel centering, so every even-even destination pixel is an
//! exact copy of a source pixel and odd positions fall halfway between
//! source samples.
//!
//! Interpolation uses the Catmull-Rom kernel over a 4x4 neighbourhood with
//! clamp-to-edge borders. Unlike the convolution filters, alpha is
//! interpolated together with the color channels.

mod upscale;

pub use upscale::{cubic_weight, upscale2x, upscale2x_into};
