use log::{debug, trace};
use pk_core::{
    Argb, BorderSampler, Error, Image, ImageView, RasterImage, channel_from_f64, ensure_non_empty,
};

use crate::kernels::Kernel2D;

/// Correlates the color channels of `src` with `kernel`.
///
/// Out-of-range taps are clamped to the nearest edge pixel. Alpha is copied
/// from the source pixel at the same position. Each accumulated channel is
/// truncated toward zero and clamped to `[0, 255]`.
pub fn convolve(src: &ImageView<'_, Argb>, kernel: &Kernel2D) -> Result<RasterImage, Error> {
    ensure_non_empty(src.width(), src.height())?;
    let mut dst = Image::new_fill(src.width(), src.height(), Argb::default());
    convolve_into(src, kernel, &mut dst)?;
    Ok(dst)
}

/// Like [`convolve`], writing into `dst`. `dst` is reallocated only when its
/// dimensions differ from `src`.
pub fn convolve_into(
    src: &ImageView<'_, Argb>,
    kernel: &Kernel2D,
    dst: &mut RasterImage,
) -> Result<(), Error> {
    let sampler = BorderSampler::new(*src)?;
    let (w, h) = (src.width(), src.height());
    debug!("convolve: {w}x{h} radius={}", kernel.radius());

    if dst.width() != w || dst.height() != h {
        trace!(
            "convolve: reallocating destination {}x{} -> {w}x{h}",
            dst.width(),
            dst.height()
        );
        *dst = Image::new_fill(w, h, Argb::default());
    }

    let r = kernel.radius();
    let interior_x = interior_range(w, r);
    let interior_y = interior_range(h, r);

    for (y, dst_row) in dst.data_mut().chunks_exact_mut(w).enumerate() {
        let row_interior = interior_y.contains(&y);
        for (x, out) in dst_row.iter_mut().enumerate() {
            let rgb = if row_interior && interior_x.contains(&x) {
                accumulate_interior(src, kernel, x, y)
            } else {
                accumulate_clamped(&sampler, kernel, x, y)
            };
            let alpha = sampler.sample(x as isize, y as isize).a;
            *out = Argb::new(
                alpha,
                channel_from_f64(rgb[0]),
                channel_from_f64(rgb[1]),
                channel_from_f64(rgb[2]),
            );
        }
    }

    Ok(())
}

/// Positions whose full `[i-r, i+r]` footprint lies inside `[0, len)`.
#[inline]
fn interior_range(len: usize, r: usize) -> core::ops::Range<usize> {
    r..len.saturating_sub(r)
}

fn accumulate_interior(
    src: &ImageView<'_, Argb>,
    kernel: &Kernel2D,
    x: usize,
    y: usize,
) -> [f64; 3] {
    let r = kernel.radius();
    let side = kernel.side();
    let mut acc = [0.0f64; 3];

    for (j, krow) in kernel.weights().chunks_exact(side).enumerate() {
        let row = &src.row(y + j - r)[x - r..x + r + 1];
        for (&kv, px) in krow.iter().zip(row) {
            acc[0] += px.r as f64 * kv;
            acc[1] += px.g as f64 * kv;
            acc[2] += px.b as f64 * kv;
        }
    }

    acc
}

fn accumulate_clamped(
    sampler: &BorderSampler<'_, Argb>,
    kernel: &Kernel2D,
    x: usize,
    y: usize,
) -> [f64; 3] {
    let r = kernel.radius() as isize;
    let side = kernel.side();
    let mut acc = [0.0f64; 3];

    for (j, krow) in kernel.weights().chunks_exact(side).enumerate() {
        let sy = y as isize + j as isize - r;
        for (i, &kv) in krow.iter().enumerate() {
            let px = sampler.sample(x as isize + i as isize - r, sy);
            acc[0] += px.r as f64 * kv;
            acc[1] += px.g as f64 * kv;
            acc[2] += px.b as f64 * kv;
        }
    }

    acc
}

#[cfg(test)]
mod tests {
    use pk_core::{Argb, BorderSampler, Error, Image, ImageView, RasterImage};

    use crate::convolve::{accumulate_clamped, convolve, convolve_into};
    use crate::kernels::{Kernel2D, gaussian_kernel, sharpen_kernel};

    fn gradient(width: usize, height: usize) -> RasterImage {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(Argb::new(
                    (40 + 13 * x + 7 * y) as u8,
                    (x * 31 % 256) as u8,
                    (y * 17 % 256) as u8,
                    ((x * y * 5) % 256) as u8,
                ));
            }
        }
        Image::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn identity_kernel_keeps_image() {
        let img = gradient(5, 4);
        let out = convolve(&img.as_view(), &Kernel2D::identity()).expect("valid input");
        assert_eq!(out, img);
    }

    #[test]
    fn box_kernel_with_clamped_border() {
        // Single row: 0, 30, 60 with a horizontal 1/3 box.
        let img = Image::from_vec(
            3,
            1,
            vec![
                Argb::new(9, 0, 0, 0),
                Argb::new(8, 30, 30, 30),
                Argb::new(7, 60, 60, 60),
            ],
        )
        .expect("valid image");
        let third = 1.0 / 3.0;
        let k = Kernel2D::new(1, vec![0.0, 0.0, 0.0, third, third, third, 0.0, 0.0, 0.0])
            .expect("valid kernel");

        let out = convolve(&img.as_view(), &k).expect("valid input");
        // left: (0+0+30)/3, middle: (0+30+60)/3, right: (30+60+60)/3
        let r: Vec<u8> = out.data().iter().map(|p| p.r).collect();
        assert_eq!(r, vec![10, 30, 50]);
        let a: Vec<u8> = out.data().iter().map(|p| p.a).collect();
        assert_eq!(a, vec![9, 8, 7]);
    }

    #[test]
    fn fractional_sums_truncate_down() {
        let img = Image::from_vec(1, 1, vec![Argb::new(200, 1, 100, 255)]).expect("valid image");
        let k = Kernel2D::new(0, vec![0.998]).expect("valid kernel");

        let out = convolve(&img.as_view(), &k).expect("valid input");
        // 0.998, 99.8, 254.49
        assert_eq!(out.get(0, 0), Some(&Argb::new(200, 0, 99, 254)));

        // 3 * 255/256 = 2.988, 42 * 255/256 = 41.836
        let k = Kernel2D::new(0, vec![255.0 / 256.0]).expect("valid kernel");
        let img = Image::from_vec(1, 1, vec![Argb::new(1, 3, 42, 0)]).expect("valid image");
        let out = convolve(&img.as_view(), &k).expect("valid input");
        assert_eq!(out.get(0, 0), Some(&Argb::new(1, 2, 41, 0)));
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut data = vec![Argb::new(255, 0, 0, 0); 9];
        data[4] = Argb::new(255, 200, 100, 255);
        let img = Image::from_vec(3, 3, data).expect("valid image");

        let out = convolve(&img.as_view(), &sharpen_kernel(1.5).expect("finite"))
            .expect("valid input");
        // center: 7 * 200 = 1400 -> 255; neighbours: -1.5 * 200 -> 0
        assert_eq!(out.get(1, 1), Some(&Argb::new(255, 255, 255, 255)));
        assert_eq!(out.get(1, 0), Some(&Argb::new(255, 0, 0, 0)));
        assert_eq!(out.get(0, 0), Some(&Argb::new(255, 0, 0, 0)));
    }

    #[test]
    fn interior_fast_path_matches_clamped_path() {
        let img = gradient(9, 7);
        let view = img.as_view();
        let sampler = BorderSampler::new(view).expect("non-empty");
        let k = gaussian_kernel(2);

        let out = convolve(&view, &k).expect("valid input");
        for y in 0..img.height() {
            for x in 0..img.width() {
                let rgb = accumulate_clamped(&sampler, &k, x, y);
                let got = out.get(x, y).expect("in bounds");
                assert_eq!(got.r, pk_core::channel_from_f64(rgb[0]));
                assert_eq!(got.g, pk_core::channel_from_f64(rgb[1]));
                assert_eq!(got.b, pk_core::channel_from_f64(rgb[2]));
            }
        }
    }

    #[test]
    fn kernel_larger_than_image() {
        let img = gradient(2, 3);
        let out = convolve(&img.as_view(), &gaussian_kernel(5)).expect("valid input");
        assert_eq!((out.width(), out.height()), (2, 3));
        for (o, i) in out.data().iter().zip(img.data()) {
            assert_eq!(o.a, i.a);
        }
    }

    #[test]
    fn works_on_non_contiguous_subview() {
        let img = gradient(8, 6);
        let sub = img.as_view().subview(2, 1, 4, 3).expect("valid subview");
        let packed = sub.to_image();
        let k = sharpen_kernel(0.75).expect("finite");

        let from_sub = convolve(&sub, &k).expect("valid input");
        let from_packed = convolve(&packed.as_view(), &k).expect("valid input");
        assert_eq!(from_sub, from_packed);
    }

    #[test]
    fn into_reuses_or_resizes_destination() {
        let img = gradient(4, 4);
        let k = gaussian_kernel(1);
        let mut dst = Image::new_fill(1, 1, Argb::default());

        convolve_into(&img.as_view(), &k, &mut dst).expect("valid input");
        assert_eq!((dst.width(), dst.height()), (4, 4));
        assert_eq!(dst, convolve(&img.as_view(), &k).expect("valid input"));
    }

    #[test]
    fn empty_image_is_rejected() {
        let data: Vec<Argb> = Vec::new();
        let view = ImageView::from_slice(0, 0, 0, &data).expect("valid empty view");
        assert_eq!(
            convolve(&view, &Kernel2D::identity()).err(),
            Some(Error::InvalidDimension {
                width: 0,
                height: 0
            })
        );
    }
}
