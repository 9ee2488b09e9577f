//! remap-invert: estimated inverses for transforms without a closed form.
//!
//! [`invert`] refines a source-point estimate by gradient descent with an
//! Armijo backtracking line search, consuming any
//! [`Differentiable`](remap::Differentiable) transform, whether analytic,
//! finite-difference estimated, or regularized. [`IterativeInverse`]
//! packages a forward transform with the solver behind a single invertible
//! interface.
//!
//! Non-convergence is a normal outcome here, not an error: every call
//! returns the best estimate found together with its residual norm, and
//! the caller decides whether that accuracy is acceptable.

pub mod config;
pub mod invertible;
pub mod line_search;
pub mod result;
pub mod solver;

pub use config::InversionConfig;
pub use invertible::{Inverted, InvertibleTransform, IterativeInverse};
pub use line_search::{backtrack, LineSearchOutcome};
pub use result::{InversionResult, StopReason, TraceRecord};
pub use solver::invert;
