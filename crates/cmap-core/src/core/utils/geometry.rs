use crate::core::models::contact_map::DenseContactMap;
use crate::core::models::structure::Atom;
use nalgebra::DMatrix;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Distance matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Distance matrix contains a negative or NaN value at ({row}, {col})")]
    InvalidValue { row: usize, col: usize },
    #[error("Distance matrix diagonal is not zero at {0}")]
    NonZeroDiagonal(usize),
    #[error("Distance matrix is not symmetric at ({row}, {col})")]
    NotSymmetric { row: usize, col: usize },
}

/// Squared Euclidean distance. Compare against a squared threshold instead of taking
/// the root; squaring is monotonic on non-negative values, so the comparison is exact.
#[inline]
pub fn squared_distance(p: &Atom, q: &Atom) -> f32 {
    (p - q).norm_squared()
}

/// Symmetric matrix of squared distances between every pair of points, zero on the diagonal.
///
/// Rows are independent and are computed in parallel when the `parallel` feature is on.
pub fn pairwise_squared_distances(points: &[Atom]) -> DMatrix<f32> {
    let n = points.len();
    let mut data = vec![0.0f32; n * n];
    let fill_row = |(i, row): (usize, &mut [f32])| {
        for (j, cell) in row.iter_mut().enumerate() {
            if i != j {
                *cell = squared_distance(&points[i], &points[j]);
            }
        }
    };

    if n > 0 {
        #[cfg(feature = "parallel")]
        data.par_chunks_mut(n).enumerate().for_each(fill_row);

        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(n).enumerate().for_each(fill_row);
    }

    DMatrix::from_row_slice(n, n, &data)
}

/// Squared distances between representative points, one per residue (e.g. C-alpha atoms).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    squared: DMatrix<f32>,
}

impl DistanceMap {
    pub fn from_points(points: &[Atom]) -> Self {
        Self {
            squared: pairwise_squared_distances(points),
        }
    }

    /// Wraps an externally computed squared-distance matrix after checking that it is
    /// square, non-negative, symmetric, and zero on the diagonal.
    pub fn new(squared: DMatrix<f32>) -> Result<Self, GeometryError> {
        let (rows, cols) = squared.shape();
        if rows != cols {
            return Err(GeometryError::NotSquare { rows, cols });
        }
        for i in 0..rows {
            if squared[(i, i)] != 0.0 {
                return Err(GeometryError::NonZeroDiagonal(i));
            }
            for j in 0..cols {
                let value = squared[(i, j)];
                if value.is_nan() || value < 0.0 {
                    return Err(GeometryError::InvalidValue { row: i, col: j });
                }
                if value != squared[(j, i)] {
                    return Err(GeometryError::NotSymmetric { row: i, col: j });
                }
            }
        }
        Ok(Self { squared })
    }

    pub fn size(&self) -> usize {
        self.squared.nrows()
    }

    pub fn squared(&self) -> &DMatrix<f32> {
        &self.squared
    }

    pub fn distance(&self, i: usize, j: usize) -> f32 {
        self.squared[(i, j)].sqrt()
    }

    /// Points within `threshold_angstrom` of each other (inclusive) are in contact.
    pub fn contact_map(&self, threshold_angstrom: f32) -> DenseContactMap {
        let threshold_sq = threshold_angstrom * threshold_angstrom;
        let n = self.size();
        let mut map = DenseContactMap::new(n);
        for i in 0..n {
            for j in i + 1..n {
                if self.squared[(i, j)] <= threshold_sq {
                    map.set_contact(i, j);
                }
            }
        }
        map
    }
}
