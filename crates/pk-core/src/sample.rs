use crate::border::clamp_index;
use crate::image::ImageView;
use crate::{Error, ensure_non_empty};

/// Clamp-to-edge pixel access over a non-empty view.
///
/// Every integer coordinate resolves to the nearest in-bounds pixel, so
/// sampling never fails once the sampler exists.
#[derive(Debug, Clone, Copy)]
pub struct BorderSampler<'a, T> {
    view: ImageView<'a, T>,
}

impl<'a, T: Copy> BorderSampler<'a, T> {
    pub fn new(view: ImageView<'a, T>) -> Result<Self, Error> {
        ensure_non_empty(view.width(), view.height())?;
        Ok(Self { view })
    }

    pub fn view(&self) -> &ImageView<'a, T> {
        &self.view
    }

    #[inline]
    pub fn sample(&self, x: isize, y: isize) -> T {
        let (w, h) = (self.view.width(), self.view.height());
        let xi = clamp_index(x, w).unwrap_or(0);
        let yi = clamp_index(y, h).unwrap_or(0);
        // SAFETY: the view is non-empty (checked in `new`) and `clamp_index`
        // returns indices in `[0, len)` for non-empty axes.
        unsafe { *self.view.get_unchecked(xi, yi) }
    }
}
