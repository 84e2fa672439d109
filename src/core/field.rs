use crate::error::{Error, Result};
use ndarray::Array1;

/// Spatial dimension of the box.
pub const DIM: usize = 2;

/// Per-particle 2D quantity stored as two parallel columns.
///
/// Index `i` of `x` and `y` together form the vector of particle `i`. Both
/// columns always have the same length; outside the crate they are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    pub(crate) x: Array1<f64>,
    pub(crate) y: Array1<f64>,
}

impl VectorField {
    /// Build a field from two columns, rejecting columns of unequal length.
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                what: "y column",
                expected: x.len(),
                found: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// A field of `n` zero vectors.
    pub fn zeros(n: usize) -> Self {
        Self {
            x: Array1::zeros(n),
            y: Array1::zeros(n),
        }
    }

    /// Build a field from a list of points.
    pub fn from_points(points: &[[f64; DIM]]) -> Self {
        Self {
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
        }
    }

    /// First component of every particle's vector.
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Second component of every particle's vector.
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Vector of particle `i`. Panics if `i` is out of range, like slice indexing.
    #[inline]
    pub fn get(&self, i: usize) -> [f64; DIM] {
        [self.x[i], self.y[i]]
    }

    #[inline]
    pub fn set(&mut self, i: usize, v: [f64; DIM]) {
        self.x[i] = v[0];
        self.y[i] = v[1];
    }

    /// Returns `self + alpha * other` without touching either operand.
    pub fn scaled_sum(&self, alpha: f64, other: &VectorField) -> VectorField {
        let mut out = self.clone();
        out.x.scaled_add(alpha, &other.x);
        out.y.scaled_add(alpha, &other.y);
        out
    }

    /// Adds `alpha * v` to every vector in place.
    pub fn add_uniform(&mut self, alpha: f64, v: [f64; DIM]) {
        let (dx, dy) = (alpha * v[0], alpha * v[1]);
        self.x.mapv_inplace(|c| c + dx);
        self.y.mapv_inplace(|c| c + dy);
    }

    /// Collect the field as a list of points.
    pub fn to_points(&self) -> Vec<[f64; DIM]> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.y.iter()).all(|c| c.is_finite())
    }
}

#[inline]
pub(crate) fn dot(a: [f64; DIM], b: [f64; DIM]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
pub(crate) fn sub(a: [f64; DIM], b: [f64; DIM]) -> [f64; DIM] {
    [a[0] - b[0], a[1] - b[1]]
}
