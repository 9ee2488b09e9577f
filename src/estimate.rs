//! Finite-difference Jacobian estimation for transforms without an
//! analytic derivative.

use crate::differentiable::Differentiable;
use crate::float::Float;
use crate::jacobian::Jacobian;
use crate::transform::Transform;

/// Wraps an arbitrary forward transform and estimates its Jacobian by
/// one-sided differences: column `i` is `(f(x + h*e_i) - f(x)) / h`.
///
/// Each Jacobian query costs `n + 1` forward evaluations. The wrapper is
/// itself a [`Transform`] (delegating) and a [`Differentiable`], so it
/// substitutes transparently wherever an analytic derivative would go.
#[derive(Clone, Debug)]
pub struct FiniteDifference<T, F> {
    transform: T,
    step: F,
}

impl<F: Float, T: Transform<F>> FiniteDifference<T, F> {
    /// Wrap `transform`, probing with the given step.
    ///
    /// # Panics
    ///
    /// If `step` is not a positive finite number.
    pub fn new(transform: T, step: F) -> Self {
        assert!(
            step > F::zero() && step.is_finite(),
            "finite-difference step must be positive and finite"
        );
        FiniteDifference { transform, step }
    }

    /// The probing step `h`.
    pub fn step(&self) -> F {
        self.step
    }

    /// Borrow the wrapped transform.
    pub fn inner(&self) -> &T {
        &self.transform
    }

    /// Recover the wrapped transform.
    pub fn into_inner(self) -> T {
        self.transform
    }
}

impl<F: Float, T: Transform<F>> Transform<F> for FiniteDifference<T, F> {
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

impl<F: Float, T: Transform<F>> Differentiable<F> for FiniteDifference<T, F> {
    fn jacobian(&mut self, x: &[F]) -> Jacobian<F> {
        let n = self.transform.source_dims();
        let m = self.transform.target_dims();
        assert!(x.len() >= n, "point buffer shorter than {} dims", n);

        let mut image = vec![F::zero(); m];
        self.transform.apply_into(x, &mut image);

        let mut probe = x[..n].to_vec();
        let mut probe_image = vec![F::zero(); m];
        let mut column = vec![F::zero(); m];
        let mut jac = Jacobian::zeros(m, n);

        for i in 0..n {
            let xi = probe[i];
            probe[i] = xi + self.step;
            self.transform.apply_into(&probe, &mut probe_image);
            for row in 0..m {
                column[row] = (probe_image[row] - image[row]) / self.step;
            }
            jac.set_column(i, &column);
            probe[i] = xi;
        }

        jac
    }
}
