//! A forward transform and the solver behind one invertible interface.

use remap::estimate::FiniteDifference;
use remap::regularize::Regularized;
use remap::{Differentiable, Float, Transform};

use crate::config::InversionConfig;
use crate::result::{InversionResult, StopReason};
use crate::solver::invert;

/// A transform whose inverse is available, exactly or by estimation.
pub trait InvertibleTransform<F: Float>: Transform<F> {
    /// Estimate the source point mapping to `target`, writing it into
    /// `source`.
    ///
    /// The result carries the achieved residual; callers judge
    /// acceptability against their own threshold.
    fn apply_inverse(&mut self, source: &mut [F], target: &[F]) -> InversionResult<F>;

    /// View with the forward and inverse roles swapped, without
    /// recomputation.
    fn inverse(self) -> Inverted<Self>
    where
        Self: Sized,
    {
        Inverted { inner: self }
    }
}

/// Couples a differentiable forward transform with the gradient-descent
/// solver.
///
/// `apply_into` is the wrapped forward map; `apply_inverse` runs
/// [`invert`] seeded from the target. Cloning yields a fully independent
/// adapter (the wrapped transform is deep-copied and the solver keeps no
/// state between calls), so concurrent inversions take one clone each.
#[derive(Clone, Debug)]
pub struct IterativeInverse<T, F> {
    transform: T,
    config: InversionConfig<F>,
}

impl<F: Float, T: Differentiable<F>> IterativeInverse<T, F> {
    /// Wrap a transform that supplies its own Jacobian.
    pub fn new(transform: T) -> Self
    where
        InversionConfig<F>: Default,
    {
        IterativeInverse {
            transform,
            config: InversionConfig::default(),
        }
    }

    /// Wrap with an explicit solver configuration.
    pub fn with_config(transform: T, config: InversionConfig<F>) -> Self {
        IterativeInverse { transform, config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &InversionConfig<F> {
        &self.config
    }

    /// Mutable access to the solver configuration.
    pub fn config_mut(&mut self) -> &mut InversionConfig<F> {
        &mut self.config
    }

    /// Borrow the wrapped transform.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Recover the wrapped transform.
    pub fn into_inner(self) -> T {
        self.transform
    }

    /// Re-wrap with the Jacobian blended toward the identity by
    /// `config.regularization_epsilon`.
    ///
    /// Explicit opt-in for near-singular forward maps; see
    /// [`Regularized`].
    pub fn regularized(self) -> IterativeInverse<Regularized<T, F>, F> {
        let epsilon = self.config.regularization_epsilon;
        IterativeInverse {
            transform: Regularized::new(self.transform, epsilon),
            config: self.config,
        }
    }

    /// Inversion from a caller-supplied starting estimate instead of the
    /// target itself.
    pub fn apply_inverse_with_guess(
        &mut self,
        source: &mut [F],
        target: &[F],
        guess: &[F],
    ) -> InversionResult<F> {
        let result = invert(&mut self.transform, target, guess, &self.config);
        source[..result.x.len()].copy_from_slice(&result.x);
        result
    }
}

impl<F: Float, T: Transform<F>> IterativeInverse<FiniteDifference<T, F>, F> {
    /// Wrap a transform with no analytic derivative.
    ///
    /// The capability gap is closed here, at construction, by substituting
    /// a [`FiniteDifference`] estimator probing with
    /// `config.jacobian_step`.
    pub fn from_forward(transform: T) -> Self
    where
        InversionConfig<F>: Default,
    {
        IterativeInverse::from_forward_with_config(transform, InversionConfig::default())
    }

    /// [`from_forward`] with an explicit solver configuration.
    ///
    /// [`from_forward`]: IterativeInverse::from_forward
    pub fn from_forward_with_config(transform: T, config: InversionConfig<F>) -> Self {
        let estimator = FiniteDifference::new(transform, config.jacobian_step);
        IterativeInverse {
            transform: estimator,
            config,
        }
    }
}

impl<F: Float, T: Differentiable<F>> Transform<F> for IterativeInverse<T, F> {
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

impl<F: Float, T: Differentiable<F>> InvertibleTransform<F> for IterativeInverse<T, F> {
    fn apply_inverse(&mut self, source: &mut [F], target: &[F]) -> InversionResult<F> {
        let n = self.transform.source_dims();
        let m = self.transform.target_dims();
        assert!(target.len() >= m, "target buffer shorter than {} dims", m);
        assert!(source.len() >= n, "source buffer shorter than {} dims", n);

        // Seed from the target, zero-filling when the source space has
        // more dimensions than the target space.
        let mut guess = vec![F::zero(); n];
        let shared = n.min(m);
        guess[..shared].copy_from_slice(&target[..shared]);

        let result = invert(&mut self.transform, target, &guess, &self.config);
        source[..n].copy_from_slice(&result.x);
        result
    }
}

/// Swapped-role view over an invertible transform.
///
/// The forward map of the view is the wrapped inverse and vice versa; no
/// iteration happens until the (estimated) direction is actually invoked.
#[derive(Clone, Debug)]
pub struct Inverted<W> {
    inner: W,
}

impl<W> Inverted<W> {
    /// Recover the original orientation.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<F: Float, W: InvertibleTransform<F>> Transform<F> for Inverted<W> {
    fn source_dims(&self) -> usize {
        self.inner.target_dims()
    }

    fn target_dims(&self) -> usize {
        self.inner.source_dims()
    }

    fn apply_into(&mut self, source: &[F], target: &mut [F]) {
        self.inner.apply_inverse(target, source);
    }
}

impl<F: Float, W: InvertibleTransform<F>> InvertibleTransform<F> for Inverted<W> {
    fn apply_inverse(&mut self, source: &mut [F], target: &[F]) -> InversionResult<F> {
        // The wrapped forward map is this view's inverse: exact, no
        // iteration.
        let dims = self.inner.target_dims();
        self.inner.apply_into(target, source);
        InversionResult {
            x: source[..dims].to_vec(),
            error: F::zero(),
            iterations: 0,
            stop: StopReason::Converged,
            trace: None,
        }
    }
}
