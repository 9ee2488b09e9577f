//! nalgebra adapters for remap's matrix types.
//!
//! Thin conversions between [`Jacobian`]/[`AffineMap`] and
//! `DMatrix`/`DVector`. Nothing else in the crate touches nalgebra.

use nalgebra::{DMatrix, DVector, Scalar};

use crate::affine::AffineMap;
use crate::float::Float;
use crate::jacobian::Jacobian;

/// Copy a Jacobian into a dense nalgebra matrix.
pub fn jacobian_to_dmatrix<F: Float + Scalar>(jacobian: &Jacobian<F>) -> DMatrix<F> {
    DMatrix::from_row_slice(jacobian.rows(), jacobian.cols(), jacobian.as_slice())
}

/// Build a Jacobian from a dense nalgebra matrix.
pub fn jacobian_from_dmatrix<F: Float + Scalar>(matrix: &DMatrix<F>) -> Jacobian<F> {
    let mut jac = Jacobian::zeros(matrix.nrows(), matrix.ncols());
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            jac.set(row, col, matrix[(row, col)]);
        }
    }
    jac
}

/// Build an affine map from a nalgebra linear part and translation.
///
/// # Panics
///
/// If `translation.len() != matrix.nrows()`.
pub fn affine_from_parts<F: Float + Scalar>(
    matrix: &DMatrix<F>,
    translation: &DVector<F>,
) -> AffineMap<F> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push(matrix[(row, col)]);
        }
    }
    AffineMap::new(rows, cols, data, translation.as_slice().to_vec())
}
