use pk_core::Error;

/// Square 2D convolution kernel.
///
/// Conventions:
/// - side length is `2*radius + 1`; `weights` is row-major.
/// - `weight(i, j)` is the tap applied to the source pixel at offset
///   `(i, j)` from the destination pixel (no kernel flip).
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    radius: usize,
    weights: Vec<f64>,
}

impl Kernel2D {
    pub fn new(radius: usize, weights: Vec<f64>) -> Result<Self, Error> {
        let side = radius
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .ok_or(Error::InvalidParameter("kernel radius overflows"))?;
        let len = side
            .checked_mul(side)
            .ok_or(Error::InvalidParameter("kernel radius overflows"))?;
        if weights.len() != len {
            return Err(Error::InvalidParameter(
                "kernel weights must hold (2*radius+1)^2 entries",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidParameter("kernel weights must be finite"));
        }
        Ok(Self { radius, weights })
    }

    pub fn identity() -> Self {
        Self {
            radius: 0,
            weights: vec![1.0],
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight for offset `(i, j)` with `i, j` in `[-radius, radius]`.
    pub fn weight(&self, i: isize, j: isize) -> f64 {
        let r = self.radius as isize;
        let col = (i + r) as usize;
        let row = (j + r) as usize;
        self.weights[row * self.side() + col]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// 3x3 unsharp-mask kernel:
///
/// ```text
///  0  -s   0
/// -s 1+4s -s
///  0  -s   0
/// ```
///
/// Not normalized for `s != 0`; overshoot is clamped by the engine.
pub fn sharpen_kernel(strength: f32) -> Result<Kernel2D, Error> {
    if !strength.is_finite() {
        return Err(Error::InvalidParameter("sharpen strength must be finite"));
    }
    let s = f64::from(strength);
    Kernel2D::new(
        1,
        vec![
            0.0, -s, 0.0, //
            -s, 1.0 + 4.0 * s, -s, //
            0.0, -s, 0.0, //
        ],
    )
}

/// Isotropic Gaussian with `sigma = radius / 3`, normalized so that
/// `sum(weights) ~= 1`.
///
/// Radius 0 yields the identity kernel.
pub fn gaussian_kernel(radius: usize) -> Kernel2D {
    if radius == 0 {
        return Kernel2D::identity();
    }

    let side = 2 * radius + 1;
    let sigma = radius as f64 / 3.0;
    let denom = 2.0 * sigma * sigma;

    let mut weights = vec![0.0f64; side * side];
    let mut sum = 0.0;
    for (idx, w) in weights.iter_mut().enumerate() {
        let dx = (idx % side) as f64 - radius as f64;
        let dy = (idx / side) as f64 - radius as f64;
        *w = (-(dx * dx + dy * dy) / denom).exp();
        sum += *w;
    }

    for w in &mut weights {
        *w /= sum;
    }

    Kernel2D { radius, weights }
}
