//! Jacobian machinery against a nonlinear fixture: analytic vs estimated
//! derivatives, descent directions, regularization.

use approx::assert_relative_eq;

use remap::{
    direction_toward, AffineMap, Differentiable, FiniteDifference, Jacobian, Regularized,
    Transform,
};

// ============================================================
// Fixture: polar coordinates to Cartesian
// ============================================================

/// `(r, theta) -> (r cos theta, r sin theta)`, with an analytic Jacobian.
#[derive(Clone, Debug)]
struct PolarToCartesian;

impl Transform<f64> for PolarToCartesian {
    fn source_dims(&self) -> usize {
        2
    }

    fn target_dims(&self) -> usize {
        2
    }

    fn apply_into(&mut self, source: &[f64], target: &mut [f64]) {
        let (r, theta) = (source[0], source[1]);
        target[0] = r * theta.cos();
        target[1] = r * theta.sin();
    }
}

impl Differentiable<f64> for PolarToCartesian {
    fn jacobian(&mut self, x: &[f64]) -> Jacobian<f64> {
        let (r, theta) = (x[0], x[1]);
        Jacobian::from_row_major(
            2,
            2,
            vec![
                theta.cos(),
                -r * theta.sin(),
                theta.sin(),
                r * theta.cos(),
            ],
        )
    }
}

// ============================================================
// Finite-difference estimation
// ============================================================

#[test]
fn finite_difference_matches_analytic_polar_jacobian() {
    let probes = [[2.0, 0.3], [0.5, -1.2], [4.0, 2.9]];
    for probe in probes {
        let expected = PolarToCartesian.jacobian(&probe);
        let mut fd = FiniteDifference::new(PolarToCartesian, 1e-7);
        let estimated = fd.jacobian(&probe);
        for row in 0..2 {
            for col in 0..2 {
                assert_relative_eq!(
                    estimated.get(row, col),
                    expected.get(row, col),
                    epsilon = 1e-5,
                    max_relative = 1e-4
                );
            }
        }
    }
}

#[test]
fn finite_difference_cost_is_n_plus_one_evaluations() {
    /// Counts forward evaluations.
    #[derive(Clone, Debug)]
    struct Counting {
        inner: PolarToCartesian,
        evals: usize,
    }

    impl Transform<f64> for Counting {
        fn source_dims(&self) -> usize {
            self.inner.source_dims()
        }
        fn target_dims(&self) -> usize {
            self.inner.target_dims()
        }
        fn apply_into(&mut self, source: &[f64], target: &mut [f64]) {
            self.evals += 1;
            self.inner.apply_into(source, target);
        }
    }

    let counting = Counting {
        inner: PolarToCartesian,
        evals: 0,
    };
    let mut fd = FiniteDifference::new(counting, 1e-7);
    let _ = fd.jacobian(&[1.0, 0.5]);
    assert_eq!(fd.inner().evals, 3); // n + 1 with n = 2
}

// ============================================================
// Descent directions
// ============================================================

#[test]
fn direction_points_toward_target_for_scaling() {
    let mut scale = AffineMap::uniform_scaling(2.0f64, 2);
    let x = [1.0, 1.0]; // image (2, 2)
    let target = [6.0, 2.0]; // residual (4, 0)
    let mut d = [0.0f64; 2];
    let mag = direction_toward(&mut scale, &mut d, &x, &target).unwrap();
    assert!(mag > 0.0);
    assert_relative_eq!(d[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(d[1], 0.0, epsilon = 1e-12);
}

#[test]
fn direction_at_singular_point_is_degenerate_not_a_panic() {
    // The polar Jacobian drops rank at r = 0; with the residual aligned to
    // its null direction the transpose product vanishes.
    let mut polar = PolarToCartesian;
    let x = [0.0, 0.0]; // image (0, 0), J = [[1, 0], [0, 0]]
    let target = [0.0, 5.0]; // residual (0, 5) lands in the null space of J^T
    let mut d = [0.0f64; 2];
    assert!(direction_toward(&mut polar, &mut d, &x, &target).is_none());
}

// ============================================================
// Regularization
// ============================================================

#[test]
fn regularized_direction_survives_the_singular_point() {
    let mut blended = Regularized::new(PolarToCartesian, 0.5);
    let x = [0.0, 0.0];
    let target = [0.0, 5.0];
    let mut d = [0.0f64; 2];
    let mag = direction_toward(&mut blended, &mut d, &x, &target).unwrap();
    assert!(mag > 0.0 && mag.is_finite());
}

#[test]
fn regularized_forward_map_is_untouched() {
    let mut raw = PolarToCartesian;
    let mut blended = Regularized::new(PolarToCartesian, 0.3);
    let p = [1.5, 0.7];
    let mut expected = [0.0f64; 2];
    let mut got = [0.0f64; 2];
    raw.apply_into(&p, &mut expected);
    blended.apply_into(&p, &mut got);
    assert_eq!(got, expected);
}
