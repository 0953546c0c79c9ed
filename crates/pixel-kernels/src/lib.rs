//! Umbrella crate for the `pixel-kernels` workspace.
//!
//! Re-exports the raster types, the convolution filters and the bicubic
//! resampler so callers can depend on a single crate.

pub use pk_core::*;
pub use pk_filter::*;
pub use pk_resample::*;
