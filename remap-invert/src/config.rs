//! Solver configuration.

/// Parameters controlling one gradient-descent inversion.
///
/// Built with struct-update syntax over [`Default`]:
///
/// ```
/// let config = remap_invert::InversionConfig {
///     tolerance: 1e-9,
///     max_iterations: 500,
///     ..Default::default()
/// };
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InversionConfig<F> {
    /// Stop once the residual norm falls below this (default: 1e-6).
    pub tolerance: F,
    /// Iteration budget for one inversion call (default: 100).
    pub max_iterations: usize,
    /// Armijo sufficient-decrease constant (default: 1e-4).
    pub c: F,
    /// Backtracking shrink factor in (0, 1) (default: 0.5).
    pub beta: F,
    /// Step size each line search starts from (default: 1.0).
    pub initial_step: F,
    /// Trial budget for one line search (default: 40).
    pub max_line_search_tries: usize,
    /// Lower clamp on an accepted step (default: 0, disabled).
    pub min_step: F,
    /// Upper clamp on an accepted step (default: +inf, disabled).
    pub max_step: F,
    /// Finite-difference step used when the adapter wraps a plain forward
    /// transform (default: 1e-6).
    pub jacobian_step: F,
    /// Identity blend consumed by the adapter's opt-in `regularized()`
    /// (default: 0, disabled).
    pub regularization_epsilon: F,
    /// Record per-iteration trace rows into the result (default: false).
    pub collect_trace: bool,
}

impl Default for InversionConfig<f64> {
    fn default() -> Self {
        InversionConfig {
            tolerance: 1e-6,
            max_iterations: 100,
            c: 1e-4,
            beta: 0.5,
            initial_step: 1.0,
            max_line_search_tries: 40,
            min_step: 0.0,
            max_step: f64::INFINITY,
            jacobian_step: 1e-6,
            regularization_epsilon: 0.0,
            collect_trace: false,
        }
    }
}

impl Default for InversionConfig<f32> {
    fn default() -> Self {
        InversionConfig {
            tolerance: 1e-3,
            max_iterations: 100,
            c: 1e-4,
            beta: 0.5,
            initial_step: 1.0,
            max_line_search_tries: 40,
            min_step: 0.0,
            max_step: f32::INFINITY,
            jacobian_step: 1e-3,
            regularization_epsilon: 0.0,
            collect_trace: false,
        }
    }
}
