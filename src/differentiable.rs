//! The derivative capability and the descent directions derived from it.

use crate::float::Float;
use crate::jacobian::Jacobian;
use crate::transform::Transform;
use crate::vecmath::{norm, sub_into};

/// A forward transform able to produce its Jacobian at a point.
///
/// One required method; the behavior derived from it (descent directions)
/// lives in the free functions below, so any implementor (analytic,
/// estimated, or regularized) participates in inversion uniformly without
/// inheriting from a base type.
pub trait Differentiable<F: Float>: Transform<F> {
    /// The derivative of the forward map at `x`.
    fn jacobian(&mut self, x: &[F]) -> Jacobian<F>;
}

/// Unit descent direction computed from a Jacobian and a residual.
///
/// `direction = J^T * residual`, normalized. The transpose is a cheap
/// steepest-descent surrogate for the inverse-Jacobian Newton step: it
/// needs no factorization and stays defined when `J` is singular. Returns
/// the pre-normalization magnitude, or `None` when that magnitude is zero
/// or non-finite; the degenerate case is reported, never divided by.
pub fn direction_from_jacobian<F: Float>(
    jacobian: &Jacobian<F>,
    residual: &[F],
    direction: &mut [F],
) -> Option<F> {
    let n = jacobian.cols();
    jacobian.t_mul_vec(residual, direction);
    let magnitude = norm(&direction[..n]);
    if magnitude <= F::zero() || !magnitude.is_finite() {
        return None;
    }
    for d in direction[..n].iter_mut() {
        *d = *d / magnitude;
    }
    Some(magnitude)
}

/// Unit direction from `x` expected to reduce `‖f(x) - target‖`.
///
/// Evaluates the forward map and the Jacobian at `x`, then delegates to
/// [`direction_from_jacobian`]; see there for the degenerate contract.
pub fn direction_toward<F: Float, T: Differentiable<F>>(
    transform: &mut T,
    direction: &mut [F],
    x: &[F],
    target: &[F],
) -> Option<F> {
    let m = transform.target_dims();
    assert!(target.len() >= m, "target buffer shorter than {} dims", m);

    let mut image = vec![F::zero(); m];
    transform.apply_into(x, &mut image);
    let mut residual = vec![F::zero(); m];
    sub_into(&mut residual, target, &image);

    let jacobian = transform.jacobian(x);
    direction_from_jacobian(&jacobian, &residual, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_unit_length() {
        let jac = Jacobian::from_row_major(2, 2, vec![2.0, 0.0, 0.0, 2.0]);
        let mut d = [0.0f64; 2];
        let mag = direction_from_jacobian(&jac, &[3.0, 4.0], &mut d).unwrap();
        assert!((norm(&d) - 1.0).abs() < 1e-12);
        assert_eq!(mag, 10.0);
    }

    #[test]
    fn zero_jacobian_is_degenerate() {
        let jac = Jacobian::<f64>::zeros(2, 2);
        let mut d = [0.0f64; 2];
        assert!(direction_from_jacobian(&jac, &[1.0, 1.0], &mut d).is_none());
    }

    #[test]
    fn zero_residual_is_degenerate() {
        let jac = Jacobian::<f64>::identity(2);
        let mut d = [0.0f64; 2];
        assert!(direction_from_jacobian(&jac, &[0.0, 0.0], &mut d).is_none());
    }
}
