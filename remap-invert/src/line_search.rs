//! Backtracking Armijo line search on the squared residual.

use remap::Float;

use crate::config::InversionConfig;

/// A trial step accepted by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchOutcome<F> {
    /// The accepted step size.
    pub step: F,
    /// Squared residual at the accepted step.
    pub cost: F,
}

/// Backtrack from `initial_step` until the sufficient-decrease condition
/// `phi(t) <= phi(0) + c * t * phi'(0)` holds, shrinking by `beta` each try.
///
/// `phi` is the squared residual along the descent direction; `slope0` is
/// its directional derivative `phi'(0)` and must be negative; a
/// non-descent slope fails immediately. `eval_cost(t)` returns the squared
/// residual of the trial point, or `None` for an invalid (non-finite)
/// trial, which rejects that trial and keeps shrinking. Returns `None`
/// once the try budget is exhausted.
pub fn backtrack<F: Float>(
    cost0: F,
    slope0: F,
    config: &InversionConfig<F>,
    eval_cost: &mut dyn FnMut(F) -> Option<F>,
) -> Option<LineSearchOutcome<F>> {
    if slope0 >= F::zero() {
        return None;
    }

    let mut step = config.initial_step;
    for _ in 0..config.max_line_search_tries {
        if let Some(cost) = eval_cost(step) {
            let bound = cost0 + config.c * step * slope0;
            if cost.is_finite() && cost <= bound {
                return Some(LineSearchOutcome { step, cost });
            }
        }
        step = step * config.beta;
    }

    None
}
