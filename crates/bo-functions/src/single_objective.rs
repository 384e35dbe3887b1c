//! Single-objective benchmark functions.
//!
//! Formulas follow the standard test-function definitions; domains match
//! the ranges the benchmark searches over.

use bo_types::SearchSpace;

use crate::TestFunction;

fn float_space(dim: usize, low: f64, high: f64) -> SearchSpace {
    let mut space = SearchSpace::new();
    for i in 0..dim {
        space = space.add_float(format!("x{i}"), low, high);
    }
    space
}

// ---------------------------------------------------------------------------
// Hartmann 6-D
// ---------------------------------------------------------------------------

const HARTMANN6_ALPHA: [f64; 4] = [1.0, 1.2, 3.0, 3.2];

const HARTMANN6_A: [[f64; 6]; 4] = [
    [10.0, 3.0, 17.0, 3.5, 1.7, 8.0],
    [0.05, 10.0, 17.0, 0.1, 8.0, 14.0],
    [3.0, 3.5, 1.7, 10.0, 17.0, 8.0],
    [17.0, 8.0, 0.05, 10.0, 0.1, 14.0],
];

const HARTMANN6_P: [[f64; 6]; 4] = [
    [0.1312, 0.1696, 0.5569, 0.0124, 0.8283, 0.5886],
    [0.2329, 0.4135, 0.8307, 0.3736, 0.1004, 0.9991],
    [0.2348, 0.1451, 0.3522, 0.2883, 0.3047, 0.6650],
    [0.4047, 0.8828, 0.8732, 0.5743, 0.1091, 0.0381],
];

fn hartmann6_value(x: &[f64]) -> f64 {
    assert_eq!(x.len(), 6, "Hartmann6 requires exactly 6 dimensions");

    let mut result = 0.0;
    for i in 0..4 {
        let mut inner = 0.0;
        for (j, xj) in x.iter().enumerate() {
            inner += HARTMANN6_A[i][j] * (xj - HARTMANN6_P[i][j]).powi(2);
        }
        result += HARTMANN6_ALPHA[i] * (-inner).exp();
    }
    -result
}

/// Hartmann 6-D function on [0, 1]^6. Global minimum f* ≈ -3.32237.
pub struct Hartmann6 {
    space: SearchSpace,
}

impl Hartmann6 {
    pub fn new() -> Self {
        Self {
            space: float_space(6, 0.0, 1.0),
        }
    }
}

impl Default for Hartmann6 {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFunction for Hartmann6 {
    fn name(&self) -> &str {
        "Hartmann6"
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        hartmann6_value(x)
    }
}

/// Hartmann 6-D with the first two dimensions restricted to an 11-point
/// grid of categorical choices over [0, 1].
pub struct Hartmann6Cat2 {
    space: SearchSpace,
}

impl Hartmann6Cat2 {
    pub fn new() -> Self {
        let choices: Vec<f64> = (0..=10).map(|i| f64::from(i) / 10.0).collect();
        let mut space = SearchSpace::new()
            .add_categorical("x0", choices.clone())
            .add_categorical("x1", choices);
        for i in 2..6 {
            space = space.add_float(format!("x{i}"), 0.0, 1.0);
        }
        Self { space }
    }
}

impl Default for Hartmann6Cat2 {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFunction for Hartmann6Cat2 {
    fn name(&self) -> &str {
        "Hartmann6Cat2"
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        hartmann6_value(x)
    }
}

// ---------------------------------------------------------------------------
// Styblinski-Tang
// ---------------------------------------------------------------------------

/// Styblinski-Tang function on [-5, 5]^d.
///
/// Global minimum f* ≈ -39.16599·d at x_i ≈ -2.903534.
pub struct StyblinskiTang {
    dim: usize,
    name: String,
    space: SearchSpace,
}

impl StyblinskiTang {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            name: format!("StyblinskiTang{dim}"),
            space: float_space(dim, -5.0, 5.0),
        }
    }
}

impl TestFunction for StyblinskiTang {
    fn name(&self) -> &str {
        &self.name
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.dim);
        0.5 * x
            .iter()
            .map(|&xi| xi.powi(4) - 16.0 * xi.powi(2) + 5.0 * xi)
            .sum::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Five-well potential
// ---------------------------------------------------------------------------

/// Five-well potential function on [-20, 20]^2.
///
/// Multimodal with five local minima; the global minimum
/// f* ≈ -1.4616 sits near (4.92, -9.89).
pub struct FiveWellPotential {
    space: SearchSpace,
}

impl FiveWellPotential {
    pub fn new() -> Self {
        Self {
            space: float_space(2, -20.0, 20.0),
        }
    }
}

impl Default for FiveWellPotential {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFunction for FiveWellPotential {
    fn name(&self) -> &str {
        "FiveWellPotential"
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), 2, "FiveWellPotential requires exactly 2 dimensions");
        let (x1, x2) = (x[0], x[1]);

        let wells = 1.0
            - 1.0 / (1.0 + 0.05 * (x1.powi(2) + (x2 - 10.0).powi(2)))
            - 1.0 / (1.0 + 0.05 * ((x1 - 10.0).powi(2) + x2.powi(2)))
            - 1.5 / (1.0 + 0.03 * ((x1 + 10.0).powi(2) + x2.powi(2)))
            - 2.0 / (1.0 + 0.05 * ((x1 - 5.0).powi(2) + (x2 + 10.0).powi(2)))
            - 1.0 / (1.0 + 0.1 * ((x1 + 5.0).powi(2) + (x2 + 10.0).powi(2)));

        let envelope = 1.0 + 0.0001 * (x1.powi(2) + x2.powi(2)).powf(1.2);
        wells * envelope
    }
}

// ---------------------------------------------------------------------------
// Sum-of-squares variants
// ---------------------------------------------------------------------------

/// Axis-parallel hyper-ellipsoid Σ (i+1)·x_i² on [-5, 5]^d.
///
/// Unimodal, convex. Global minimum f(0,...,0) = 0.
pub struct SumOfSquares {
    dim: usize,
    name: String,
    space: SearchSpace,
}

impl SumOfSquares {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            name: format!("SumOfSquares{dim}"),
            space: float_space(dim, -5.0, 5.0),
        }
    }
}

impl TestFunction for SumOfSquares {
    fn name(&self) -> &str {
        &self.name
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.dim);
        x.iter()
            .enumerate()
            .map(|(i, &xi)| (i + 1) as f64 * xi * xi)
            .sum()
    }
}

/// Sum of different powers Σ |x_i|^(i+2) on [-1, 1]^d.
///
/// Unimodal. Global minimum f(0,...,0) = 0.
pub struct SumOfDiffSquares {
    dim: usize,
    name: String,
    space: SearchSpace,
}

impl SumOfDiffSquares {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            name: format!("SumOfDiffSquares{dim}"),
            space: float_space(dim, -1.0, 1.0),
        }
    }
}

impl TestFunction for SumOfDiffSquares {
    fn name(&self) -> &str {
        &self.name
    }

    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn evaluate_one(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.dim);
        x.iter()
            .enumerate()
            .map(|(i, &xi)| xi.abs().powi(i as i32 + 2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hartmann6_known_minimum() {
        let f = Hartmann6::new();
        let x_star = [0.20169, 0.150011, 0.476874, 0.275332, 0.311652, 0.6573];
        assert_relative_eq!(f.evaluate_one(&x_star), -3.32237, max_relative = 1e-4);
    }

    #[test]
    fn hartmann6_cat2_matches_continuous_on_grid_points() {
        let cat = Hartmann6Cat2::new();
        let cont = Hartmann6::new();
        let x = [0.2, 0.1, 0.476874, 0.275332, 0.311652, 0.6573];
        assert!(cat.space().parameters[0].kind.contains(x[0]));
        assert!(cat.space().parameters[1].kind.contains(x[1]));
        assert_relative_eq!(cat.evaluate_one(&x), cont.evaluate_one(&x));
    }

    #[test]
    fn styblinski_tang_known_minimum() {
        let f = StyblinskiTang::new(8);
        let x_star = vec![-2.903534; 8];
        assert_relative_eq!(
            f.evaluate_one(&x_star),
            -39.16599 * 8.0,
            max_relative = 1e-4
        );
    }

    #[test]
    fn five_well_global_basin_beats_origin() {
        let f = FiveWellPotential::new();
        let at_min = f.evaluate_one(&[4.92, -9.89]);
        assert!(at_min < -1.45 && at_min > -1.47, "got {at_min}");
        assert!(at_min < f.evaluate_one(&[0.0, 0.0]));
    }

    #[test]
    fn sum_of_squares_zero_at_origin() {
        let f = SumOfSquares::new(40);
        assert_eq!(f.evaluate_one(&vec![0.0; 40]), 0.0);
        let near = f.evaluate_one(&vec![0.1; 40]);
        let far = f.evaluate_one(&vec![1.0; 40]);
        assert!(near < far);
    }

    #[test]
    fn sum_of_diff_squares_weights_later_dims_less() {
        let f = SumOfDiffSquares::new(3);
        // |0.5|^2 + |0.5|^3 + |0.5|^4
        assert_relative_eq!(
            f.evaluate_one(&[0.5, 0.5, 0.5]),
            0.25 + 0.125 + 0.0625
        );
    }
}
