//! Jacobian regularization toward the identity.

use crate::differentiable::Differentiable;
use crate::float::Float;
use crate::jacobian::Jacobian;
use crate::transform::Transform;

/// Wraps a differentiable transform and blends its Jacobian toward the
/// identity: `eps*I + (1-eps)*J`.
///
/// A near-singular `J` yields wild or zero descent directions; blending
/// keeps the direction usable at the cost of biasing it toward the raw
/// residual. Square transforms only. Nothing applies this wrapper
/// automatically; inversion callers opt in.
#[derive(Clone, Debug)]
pub struct Regularized<T, F> {
    transform: T,
    epsilon: F,
}

impl<F: Float, T: Differentiable<F>> Regularized<T, F> {
    /// Wrap `transform` with blend factor `epsilon`.
    ///
    /// # Panics
    ///
    /// If `epsilon` is outside `[0, 1]` or the transform is not square.
    pub fn new(transform: T, epsilon: F) -> Self {
        assert!(
            epsilon >= F::zero() && epsilon <= F::one(),
            "regularization epsilon must lie in [0, 1]"
        );
        assert_eq!(
            transform.source_dims(),
            transform.target_dims(),
            "identity blending requires a square transform"
        );
        Regularized { transform, epsilon }
    }

    /// The identity blend factor.
    pub fn epsilon(&self) -> F {
        self.epsilon
    }

    /// Recover the wrapped transform.
    pub fn into_inner(self) -> T {
        self.transform
    }
}

impl<F: Float, T: Differentiable<F>> Transform<F> for Regularized<T, F> {
    fn source_dims(&self) -> usize {
        self.transform.source_dims()
    }

    fn target_dims(&self) -> usize {
        self.transform.target_dims()
    }

    fn apply_into(&mut self, source: &[F], target: &mut [F]) {
        self.transform.apply_into(source, target);
    }

    fn apply_in_place(&mut self, point: &mut [F]) {
        self.transform.apply_in_place(point);
    }
}

impl<F: Float, T: Differentiable<F>> Differentiable<F> for Regularized<T, F> {
    fn jacobian(&mut self, x: &[F]) -> Jacobian<F> {
        let mut jac = self.transform.jacobian(x);
        jac.blend_identity(self.epsilon);
        jac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::AffineMap;
    use crate::differentiable::direction_from_jacobian;

    #[test]
    fn zero_epsilon_returns_raw_jacobian() {
        let affine = AffineMap::new(2, 2, vec![4.0, 1.0, 0.0, 4.0], vec![0.0, 0.0]);
        let mut wrapped = Regularized::new(affine.clone(), 0.0);
        let mut raw = affine;
        assert_eq!(wrapped.jacobian(&[0.0, 0.0]), raw.jacobian(&[0.0, 0.0]));
    }

    #[test]
    fn full_epsilon_returns_identity() {
        let affine = AffineMap::new(2, 2, vec![0.0; 4], vec![0.0, 0.0]);
        let mut wrapped = Regularized::new(affine, 1.0);
        assert_eq!(wrapped.jacobian(&[1.0, 1.0]), Jacobian::identity(2));
    }

    #[test]
    fn rescues_degenerate_direction() {
        // Zero linear part: the raw direction is degenerate, the blended
        // one follows the residual.
        let flat = AffineMap::new(2, 2, vec![0.0; 4], vec![0.0, 0.0]);
        let mut wrapped = Regularized::new(flat, 0.5);
        let jac = wrapped.jacobian(&[0.0, 0.0]);
        let mut d = [0.0f64; 2];
        let mag = direction_from_jacobian(&jac, &[1.0, 0.0], &mut d).unwrap();
        assert!(mag > 0.0);
        assert!((d[0] - 1.0).abs() < 1e-12 && d[1].abs() < 1e-12);
    }
}
