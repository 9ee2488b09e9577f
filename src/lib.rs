//! remap: real-coordinate transforms built for iterative inversion.
//!
//! - [`Transform`]: the forward-map contract between `R^n` and `R^m`
//! - [`Differentiable`]: the Jacobian capability consumed by solvers
//! - [`FiniteDifference`]: derivative estimation for transforms without one
//! - [`Regularized`]: identity-blended Jacobians for ill-conditioned maps
//! - [`AffineMap`]: the closed-form workhorse transform
//!
//! The gradient-descent inverse solver that consumes these lives in the
//! `remap-invert` crate.

pub mod affine;
pub mod differentiable;
pub mod estimate;
pub mod float;
pub mod jacobian;
#[cfg(feature = "nalgebra")]
pub mod nalgebra_support;
pub mod regularize;
pub mod transform;
pub mod vecmath;

pub use affine::AffineMap;
pub use differentiable::{direction_from_jacobian, direction_toward, Differentiable};
pub use estimate::FiniteDifference;
pub use float::Float;
pub use jacobian::Jacobian;
pub use regularize::Regularized;
pub use transform::Transform;
