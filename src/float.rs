use std::fmt::{Debug, Display};

use num_traits::Float as NumFloat;

/// Marker trait for the base floating-point types (`f32`, `f64`).
///
/// Coordinates, Jacobian entries, and solver parameters all share one
/// scalar type; this bundles the numeric and utility bounds they need.
pub trait Float:
    NumFloat + Copy + Default + Debug + Display + Send + Sync + 'static
{
}

impl Float for f32 {}
impl Float for f64 {}
