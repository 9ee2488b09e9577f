//! Inversion outcomes.

use std::fmt;

/// Why an inversion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Residual norm fell below the configured tolerance.
    Converged,
    /// Iteration budget exhausted before reaching tolerance.
    MaxIterations,
    /// No trial step satisfied the sufficient-decrease condition.
    LineSearchFailed,
    /// The descent direction had zero or non-finite magnitude (singular or
    /// zero Jacobian); the estimate so far was kept.
    DegenerateDirection,
    /// The clamped step failed to shrink the squared error; the previous
    /// estimate was kept.
    Stagnated,
    /// The forward map produced a non-finite residual at the start point.
    NonFinite,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Converged => write!(f, "residual below tolerance"),
            StopReason::MaxIterations => write!(f, "maximum iterations reached"),
            StopReason::LineSearchFailed => write!(f, "line search failed"),
            StopReason::DegenerateDirection => write!(f, "degenerate descent direction"),
            StopReason::Stagnated => write!(f, "step did not reduce the error"),
            StopReason::NonFinite => write!(f, "non-finite residual at start point"),
        }
    }
}

/// One recorded solver iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRecord<F> {
    /// Iteration index.
    pub iter: usize,
    /// Residual norm after the accepted step.
    pub error: F,
    /// The step size that was taken.
    pub step: F,
}

/// Outcome of one inversion call.
///
/// Non-convergence is a normal terminal state, not an error: the estimate
/// and its residual are always returned, and the caller judges `error`
/// against its own acceptance threshold.
#[derive(Debug, Clone)]
pub struct InversionResult<F> {
    /// The source-point estimate.
    pub x: Vec<F>,
    /// Euclidean norm (unsquared) of `target - f(x)` at the estimate.
    pub error: F,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Terminal state.
    pub stop: StopReason,
    /// Per-iteration rows, present when `collect_trace` was set.
    pub trace: Option<Vec<TraceRecord<F>>>,
}

impl<F> InversionResult<F> {
    /// Whether the residual met the configured tolerance.
    pub fn converged(&self) -> bool {
        self.stop == StopReason::Converged
    }
}
