use log::{debug, trace};
use pk_core::{
    Argb, BorderSampler, Error, Image, ImageView, RasterImage, channel_from_f64, ensure_non_empty,
};

/// Tap offsets around `floor(s)` along one axis.
const TAPS: [isize; 4] = [-1, 0, 1, 2];

/// Catmull-Rom cubic convolution kernel (`a = -0.5`).
///
/// `cubic_weight(0) == 1` and `cubic_weight(+-1) == cubic_weight(+-2) == 0`
/// hold exactly.
#[inline]
pub fn cubic_weight(t: f64) -> f64 {
    let a = t.abs();
    if a < 1.0 {
        1.5 * a * a * a - 2.5 * a * a + 1.0
    } else if a < 2.0 {
        -0.5 * a * a * a + 2.5 * a * a - 4.0 * a + 2.0
    } else {
        0.0
    }
}

/// Destination size; fails when `2w`, `2h` or their product overflows.
#[inline]
fn dst_dims(src_w: usize, src_h: usize) -> Result<(usize, usize), Error> {
    let (w, h) = (src_w.checked_mul(2), src_h.checked_mul(2));
    match (w, h) {
        (Some(w), Some(h)) if w.checked_mul(h).is_some() => Ok((w, h)),
        _ => Err(Error::InvalidDimension {
            width: src_w,
            height: src_h,
        }),
    }
}

/// Integer base index and the four tap weights for destination index `d`.
///
/// Source position is `d / 2` with no half-pixel offset, so even `d` sits
/// exactly on source sample `d / 2`.
#[inline]
fn axis_taps(d: usize) -> (isize, [f64; 4]) {
    let s = d as f64 / 2.0;
    let s0 = s.floor();
    let frac = s - s0;
    let weights = TAPS.map(|i| cubic_weight(i as f64 - frac));
    (s0 as isize, weights)
}

/// Bicubic 2x upscale. Output is `(2 * width, 2 * height)`.
///
/// All four channels, alpha included, are interpolated over the 4x4
/// neighbourhood with clamp-to-edge borders, then truncated and clamped to
/// `[0, 255]`.
pub fn upscale2x(src: &ImageView<'_, Argb>) -> Result<RasterImage, Error> {
    ensure_non_empty(src.width(), src.height())?;
    let (dst_w, dst_h) = dst_dims(src.width(), src.height())?;
    let mut dst = Image::new_fill(dst_w, dst_h, Argb::default());
    upscale2x_into(src, &mut dst)?;
    Ok(dst)
}

/// Like [`upscale2x`], writing into `dst`. `dst` is reallocated only when its
/// dimensions are not `(2 * width, 2 * height)`.
pub fn upscale2x_into(src: &ImageView<'_, Argb>, dst: &mut RasterImage) -> Result<(), Error> {
    let sampler = BorderSampler::new(*src)?;
    let (dst_w, dst_h) = dst_dims(src.width(), src.height())?;
    debug!(
        "upscale2x: {}x{} -> {dst_w}x{dst_h}",
        src.width(),
        src.height()
    );

    if dst.width() != dst_w || dst.height() != dst_h {
        trace!(
            "upscale2x: reallocating destination {}x{} -> {dst_w}x{dst_h}",
            dst.width(),
            dst.height()
        );
        *dst = Image::new_fill(dst_w, dst_h, Argb::default());
    }

    let cols: Vec<(isize, [f64; 4])> = (0..dst_w).map(axis_taps).collect();
    let src_w = src.width() as isize;
    let src_h = src.height() as isize;

    for (y, dst_row) in dst.data_mut().chunks_exact_mut(dst_w).enumerate() {
        let (y0, wy) = axis_taps(y);
        let rows_inside = y0 >= 1 && y0 + 2 < src_h;

        for (out, &(x0, wx)) in dst_row.iter_mut().zip(&cols) {
            let acc = if rows_inside && x0 >= 1 && x0 + 2 < src_w {
                interpolate_interior(src, x0 as usize, y0 as usize, &wx, &wy)
            } else {
                interpolate_clamped(&sampler, x0, y0, &wx, &wy)
            };
            *out = Argb::new(
                channel_from_f64(acc[0]),
                channel_from_f64(acc[1]),
                channel_from_f64(acc[2]),
                channel_from_f64(acc[3]),
            );
        }
    }

    Ok(())
}

#[inline]
fn accumulate(acc: &mut [f64; 4], px: Argb, w: f64) {
    acc[0] += px.a as f64 * w;
    acc[1] += px.r as f64 * w;
    acc[2] += px.g as f64 * w;
    acc[3] += px.b as f64 * w;
}

fn interpolate_interior(
    src: &ImageView<'_, Argb>,
    x0: usize,
    y0: usize,
    wx: &[f64; 4],
    wy: &[f64; 4],
) -> [f64; 4] {
    let mut acc = [0.0f64; 4];
    for (j, &wj) in wy.iter().enumerate() {
        let row = &src.row(y0 + j - 1)[x0 - 1..x0 + 3];
        for (&wi, &px) in wx.iter().zip(row) {
            accumulate(&mut acc, px, wi * wj);
        }
    }
    acc
}

fn interpolate_clamped(
    sampler: &BorderSampler<'_, Argb>,
    x0: isize,
    y0: isize,
    wx: &[f64; 4],
    wy: &[f64; 4],
) -> [f64; 4] {
    let mut acc = [0.0f64; 4];
    for (&dj, &wj) in TAPS.iter().zip(wy) {
        for (&di, &wi) in TAPS.iter().zip(wx) {
            accumulate(&mut acc, sampler.sample(x0 + di, y0 + dj), wi * wj);
        }
    }
    acc
}
