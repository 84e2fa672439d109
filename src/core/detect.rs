//! All-pairs overlap detection.
//!
//! Every step builds the full N×N distance matrix; there is no spatial index.
//! A contact is any pair with `0 < distance <= radius[i] + radius[j]`. The
//! lower bound drops the diagonal, which also means two particles with
//! exactly coincident centers are never reported.

use crate::core::field::VectorField;
use crate::core::particle::ParticleSystem;
use crate::error::{Error, Result};
use ndarray::Array2;
use std::collections::BTreeSet;

/// Unordered particle pair, stored with `i < j`.
///
/// Ordering is lexicographic on `(i, j)`, which fixes the order in which
/// impulses are accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    pub i: usize,
    pub j: usize,
}

impl Pair {
    /// Normalize `(a, b)` so that the smaller index comes first.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }
}

/// Euclidean distances between all particle centers.
///
/// Only the upper triangle is computed; it is mirrored into the lower one so
/// `d[[i, j]] == d[[j, i]]` holds bit for bit and the diagonal is exactly 0.
pub fn distance_matrix(position: &VectorField) -> Array2<f64> {
    let n = position.len();
    let mut d = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let (xi, yi) = (position.x[i], position.y[i]);
        for j in (i + 1)..n {
            let dist = (position.x[j] - xi).hypot(position.y[j] - yi);
            d[[i, j]] = dist;
            d[[j, i]] = dist;
        }
    }
    d
}

/// Overlapping pairs given precomputed distances and contact thresholds.
///
/// Both `(i, j)` and `(j, i)` match in a symmetric matrix; each match is
/// folded into its unordered [`Pair`] and collected into an ordered set, so
/// every contact is reported once, in ascending `(i, j)` order.
///
/// Errors with `Error::ShapeMismatch` unless `distances` is square and
/// `radius_sum` has the same shape.
pub fn overlapping_pairs(distances: &Array2<f64>, radius_sum: &Array2<f64>) -> Result<Vec<Pair>> {
    let (rows, cols) = distances.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch {
            what: "distance matrix",
            expected: (rows, rows),
            found: (rows, cols),
        });
    }
    if radius_sum.dim() != distances.dim() {
        return Err(Error::ShapeMismatch {
            what: "radius sums",
            expected: distances.dim(),
            found: radius_sum.dim(),
        });
    }
    Ok(collect_pairs(distances, radius_sum))
}

fn collect_pairs(distances: &Array2<f64>, radius_sum: &Array2<f64>) -> Vec<Pair> {
    let mut pairs = BTreeSet::new();
    for ((i, j), &dist) in distances.indexed_iter() {
        if dist > 0.0 && dist <= radius_sum[[i, j]] {
            pairs.insert(Pair::new(i, j));
        }
    }
    pairs.into_iter().collect()
}

/// Overlapping pairs for the system's current positions.
pub fn detect_collisions(system: &ParticleSystem) -> Vec<Pair> {
    let distances = distance_matrix(system.position());
    collect_pairs(&distances, system.radius_sum())
}
