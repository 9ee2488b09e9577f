//! Closed-form affine maps, the workhorse forward transforms.

use crate::differentiable::Differentiable;
use crate::float::Float;
use crate::jacobian::Jacobian;
use crate::transform::Transform;

/// `x -> A*x + b` with `A` an `m x n` matrix (row-major) and `b` in `R^m`.
///
/// The Jacobian is `A` at every point, so affine maps exercise the whole
/// differentiable-transform machinery with exact derivatives.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineMap<F> {
    rows: usize,
    cols: usize,
    matrix: Vec<F>,
    translation: Vec<F>,
    // in-place apply stages the source here, allocated once
    #[cfg_attr(feature = "serde", serde(skip))]
    scratch: Vec<F>,
}

impl<F: Float> AffineMap<F> {
    /// Build from a row-major `rows x cols` matrix and a translation.
    ///
    /// # Panics
    ///
    /// If the matrix or translation length does not match the dimensions.
    pub fn new(rows: usize, cols: usize, matrix: Vec<F>, translation: Vec<F>) -> Self {
        assert_eq!(matrix.len(), rows * cols, "matrix length must be rows * cols");
        assert_eq!(translation.len(), rows, "translation length must be rows");
        AffineMap {
            rows,
            cols,
            matrix,
            translation,
            scratch: vec![F::zero(); cols],
        }
    }

    /// The identity map on `dims` dimensions.
    pub fn identity(dims: usize) -> Self {
        let mut matrix = vec![F::zero(); dims * dims];
        for i in 0..dims {
            matrix[i * dims + i] = F::one();
        }
        AffineMap::new(dims, dims, matrix, vec![F::zero(); dims])
    }

    /// Per-axis scaling.
    pub fn scaling(factors: &[F]) -> Self {
        let dims = factors.len();
        let mut matrix = vec![F::zero(); dims * dims];
        for (i, &s) in factors.iter().enumerate() {
            matrix[i * dims + i] = s;
        }
        AffineMap::new(dims, dims, matrix, vec![F::zero(); dims])
    }

    /// The same scale factor on every axis.
    pub fn uniform_scaling(factor: F, dims: usize) -> Self {
        AffineMap::scaling(&vec![factor; dims])
    }

    /// Pure translation.
    pub fn translation(offsets: &[F]) -> Self {
        let dims = offsets.len();
        let mut map = AffineMap::identity(dims);
        map.translation.copy_from_slice(offsets);
        map
    }

    /// Row-major view of the linear part.
    pub fn linear(&self) -> &[F] {
        &self.matrix
    }

    /// The translation component.
    pub fn offset(&self) -> &[F] {
        &self.translation
    }
}

impl<F: Float> Transform<F> for AffineMap<F> {
    fn source_dims(&self) -> usize {
        self.cols
    }

    fn target_dims(&self) -> usize {
        self.rows
    }

    fn apply_into(&mut self, source: &[F], target: &mut [F]) {
        assert!(source.len() >= self.cols, "source buffer shorter than {} dims", self.cols);
        assert!(target.len() >= self.rows, "target buffer shorter than {} dims", self.rows);
        for row in 0..self.rows {
            let mut acc = self.translation[row];
            for col in 0..self.cols {
                acc = acc + self.matrix[row * self.cols + col] * source[col];
            }
            target[row] = acc;
        }
    }

    fn apply_in_place(&mut self, point: &mut [F]) {
        assert!(
            point.len() >= self.rows.max(self.cols),
            "point buffer shorter than transform dimensionality"
        );
        self.scratch.resize(self.cols, F::zero());
        self.scratch.copy_from_slice(&point[..self.cols]);
        for row in 0..self.rows {
            let mut acc = self.translation[row];
            for col in 0..self.cols {
                acc = acc + self.matrix[row * self.cols + col] * self.scratch[col];
            }
            point[row] = acc;
        }
    }
}

impl<F: Float> Differentiable<F> for AffineMap<F> {
    fn jacobian(&mut self, _x: &[F]) -> Jacobian<F> {
        Jacobian::from_row_major(self.rows, self.cols, self.matrix.clone())
    }
}
