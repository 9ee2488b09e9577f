//! The forward-transform contract.

use crate::float::Float;

/// A map from an `n`-dimensional source space to an `m`-dimensional target
/// space.
///
/// Implementations read exactly the first [`source_dims`] components of the
/// input and write exactly the first [`target_dims`] components of the
/// output. Any trailing components of the output buffer are left untouched,
/// so callers may carry extra coordinates through a transform unchanged.
///
/// Methods take `&mut self`: implementations may keep internal scratch
/// buffers, and a transform shared across threads must be cloned first.
/// `Clone` is the deep-copy contract: a clone is a fully independent
/// instance, one per concurrent consumer.
///
/// [`source_dims`]: Transform::source_dims
/// [`target_dims`]: Transform::target_dims
pub trait Transform<F: Float>: Clone {
    /// Dimensionality of the source space.
    fn source_dims(&self) -> usize;

    /// Dimensionality of the target space.
    fn target_dims(&self) -> usize;

    /// Apply the forward map, writing the image of `source` into `target`.
    ///
    /// # Panics
    ///
    /// If `source` or `target` is shorter than the declared dimensionality.
    fn apply_into(&mut self, source: &[F], target: &mut [F]);

    /// Apply the forward map with `point` as both input and output.
    ///
    /// Rust's aliasing rules rule out passing one buffer as both arguments
    /// of [`apply_into`], so the in-place case is its own method. The
    /// default stages through a temporary; implementations with internal
    /// scratch can override to avoid the allocation.
    ///
    /// # Panics
    ///
    /// If `point` is shorter than either declared dimensionality.
    ///
    /// [`apply_into`]: Transform::apply_into
    fn apply_in_place(&mut self, point: &mut [F]) {
        let n = self.source_dims();
        assert!(
            point.len() >= n.max(self.target_dims()),
            "point buffer shorter than transform dimensionality"
        );
        let source = point[..n].to_vec();
        self.apply_into(&source, point);
    }
}
