//! The gradient-descent inverse solver.

use remap::differentiable::{direction_from_jacobian, Differentiable};
use remap::vecmath::{axpy_into, dot, sub_into};
use remap::Float;

use crate::config::InversionConfig;
use crate::line_search::backtrack;
use crate::result::{InversionResult, StopReason, TraceRecord};

/// Estimate a source point whose forward image is `target`.
///
/// Refines `guess` by gradient descent on the squared residual
/// `‖f(x) - target‖²`, taking Armijo-backtracked steps along the
/// normalized `J^T e` direction until the residual norm drops below
/// `config.tolerance`, progress stalls, or the iteration budget runs out.
/// The estimate and its residual are returned for every terminal state.
/// The solver never errors on non-convergence; inspect
/// [`InversionResult::stop`] and [`InversionResult::error`].
///
/// Accepted steps strictly decrease the squared error: a step that would
/// degrade the estimate is refused and the previous estimate returned.
///
/// # Panics
///
/// If `target` or `guess` is shorter than the transform's declared
/// dimensionality.
pub fn invert<F: Float, T: Differentiable<F>>(
    transform: &mut T,
    target: &[F],
    guess: &[F],
    config: &InversionConfig<F>,
) -> InversionResult<F> {
    let n = transform.source_dims();
    let m = transform.target_dims();
    assert!(target.len() >= m, "target buffer shorter than {} dims", m);
    assert!(guess.len() >= n, "guess buffer shorter than {} dims", n);

    let two = F::one() + F::one();

    let mut x = guess[..n].to_vec();
    let mut image = vec![F::zero(); m];
    transform.apply_into(&x, &mut image);
    let mut residual = vec![F::zero(); m];
    sub_into(&mut residual, target, &image);
    let mut cost = dot(&residual, &residual);
    let mut error = cost.sqrt();

    let mut trace = if config.collect_trace {
        Some(Vec::new())
    } else {
        None
    };

    if !error.is_finite() {
        return InversionResult {
            x,
            error,
            iterations: 0,
            stop: StopReason::NonFinite,
            trace,
        };
    }
    if error < config.tolerance {
        return InversionResult {
            x,
            error,
            iterations: 0,
            stop: StopReason::Converged,
            trace,
        };
    }

    let mut direction = vec![F::zero(); n];
    let mut jd = vec![F::zero(); m];
    let mut x_trial = vec![F::zero(); n];
    let mut trial_image = vec![F::zero(); m];
    let mut trial_residual = vec![F::zero(); m];

    for iter in 0..config.max_iterations {
        let jacobian = transform.jacobian(&x);
        if direction_from_jacobian(&jacobian, &residual, &mut direction).is_none() {
            return InversionResult {
                x,
                error,
                iterations: iter,
                stop: StopReason::DegenerateDirection,
                trace,
            };
        }

        // phi(t) = ‖f(x + t*d) - target‖²; its slope at t = 0 is
        // -2 * e^T (J d), strictly negative for a non-degenerate d.
        jacobian.mul_vec(&direction, &mut jd);
        let slope = -(two * dot(&residual, &jd[..m]));

        let searched = {
            let mut eval_cost = |step: F| {
                axpy_into(&mut x_trial, &x, step, &direction);
                transform.apply_into(&x_trial, &mut trial_image);
                sub_into(&mut trial_residual, target, &trial_image);
                let trial_cost = dot(&trial_residual, &trial_residual);
                trial_cost.is_finite().then_some(trial_cost)
            };
            backtrack(cost, slope, config, &mut eval_cost)
        };
        let Some(accepted) = searched else {
            return InversionResult {
                x,
                error,
                iterations: iter,
                stop: StopReason::LineSearchFailed,
                trace,
            };
        };

        // Clamp the accepted step, then take it.
        let step = accepted.step.max(config.min_step).min(config.max_step);
        axpy_into(&mut x_trial, &x, step, &direction);
        transform.apply_into(&x_trial, &mut trial_image);
        sub_into(&mut trial_residual, target, &trial_image);
        let new_cost = dot(&trial_residual, &trial_residual);

        if !(new_cost < cost) {
            // Clamping can undo the sufficient decrease (or push the trial
            // non-finite); keep the last accepted estimate rather than
            // degrade it.
            return InversionResult {
                x,
                error,
                iterations: iter,
                stop: StopReason::Stagnated,
                trace,
            };
        }

        x.copy_from_slice(&x_trial);
        residual.copy_from_slice(&trial_residual);
        cost = new_cost;
        error = cost.sqrt();

        if let Some(rows) = trace.as_mut() {
            rows.push(TraceRecord { iter, error, step });
        }

        if error < config.tolerance {
            return InversionResult {
                x,
                error,
                iterations: iter + 1,
                stop: StopReason::Converged,
                trace,
            };
        }
    }

    InversionResult {
        x,
        error,
        iterations: config.max_iterations,
        stop: StopReason::MaxIterations,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remap::AffineMap;

    #[test]
    fn identity_converges_immediately() {
        let mut identity = AffineMap::identity(2);
        let target = [1.5f64, -2.5];
        let result = invert(&mut identity, &target, &target, &InversionConfig::default());
        assert_eq!(result.stop, StopReason::Converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.error, 0.0);
        assert_eq!(result.x, target.to_vec());
    }

    #[test]
    fn zero_iteration_budget_reports_exhaustion() {
        let mut scale = AffineMap::uniform_scaling(2.0f64, 2);
        let config = InversionConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let result = invert(&mut scale, &[4.0, 4.0], &[4.0, 4.0], &config);
        assert_eq!(result.stop, StopReason::MaxIterations);
        assert_eq!(result.iterations, 0);
        assert!(result.error.is_finite());
    }

    #[test]
    fn non_finite_start_stops_immediately() {
        let mut identity = AffineMap::identity(2);
        let result = invert(
            &mut identity,
            &[f64::NAN, 0.0],
            &[0.0, 0.0],
            &InversionConfig::default(),
        );
        assert_eq!(result.stop, StopReason::NonFinite);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn max_step_clamp_can_stagnate() {
        // Force every accepted step up to a size that overshoots so far
        // the error grows; the solver must refuse it and keep the start.
        let mut scale = AffineMap::uniform_scaling(2.0f64, 1);
        let config = InversionConfig {
            min_step: 1e6,
            max_step: f64::INFINITY,
            ..Default::default()
        };
        let guess = [1.0f64];
        let result = invert(&mut scale, &[4.0], &guess, &config);
        assert_eq!(result.stop, StopReason::Stagnated);
        assert_eq!(result.x, guess.to_vec());
    }
}
