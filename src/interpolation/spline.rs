//! Natural cubic spline kernel
//!
//! On each interval `[t_i, t_{i+1}]` the spline is
//!
//! ```text
//! s_i(t) = a_i + b_i·dt + c_i·dt² + d_i·dt³,   dt = t - t_i
//! ```
//!
//! with `a_i` the sample values and `c_i` (half the second derivative at
//! knot `i`) solved from a tridiagonal system. Natural boundary conditions
//! pin `c_0 = c_{n-1} = 0`. With two samples the spline is a straight line.

use super::{Accelerator, Interpolant};

/// Natural cubic spline over borrowed samples
pub(crate) struct CubicSpline<'a> {
    times: &'a [f64],
    values: &'a [f64],
    /// Linear coefficient per interval
    b: Vec<f64>,
    /// Quadratic coefficient per knot
    c: Vec<f64>,
    /// Cubic coefficient per interval
    d: Vec<f64>,
}

impl<'a> CubicSpline<'a> {
    /// Build the spline; `times` must be strictly increasing with at least two entries
    pub(crate) fn new(times: &'a [f64], values: &'a [f64]) -> Self {
        let n = times.len();
        let h: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();

        // lower[i] * c[i-1] + diag[i] * c[i] + upper[i] * c[i+1] = rhs[i]
        let mut lower = vec![0.0; n - 1];
        let mut diag = vec![1.0; n];
        let mut upper = vec![0.0; n - 1];
        let mut rhs = vec![0.0; n];

        for i in 1..n - 1 {
            lower[i - 1] = h[i - 1];
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            upper[i] = h[i];
            rhs[i] = 3.0
                * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
        }

        let c = solve_tridiagonal(&lower, &diag, &upper, &rhs);

        let mut b = Vec::with_capacity(n - 1);
        let mut d = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            b.push((values[i + 1] - values[i]) / h[i] - h[i] * (2.0 * c[i] + c[i + 1]) / 3.0);
            d.push((c[i + 1] - c[i]) / (3.0 * h[i]));
        }

        Self {
            times,
            values,
            b,
            c,
            d,
        }
    }
}

impl Interpolant for CubicSpline<'_> {
    fn eval(&self, t: f64, acc: &mut Accelerator) -> f64 {
        let i = acc.find(self.times, t);
        let dt = t - self.times[i];
        self.values[i] + dt * (self.b[i] + dt * (self.c[i] + dt * self.d[i]))
    }

    fn eval_deriv(&self, t: f64, acc: &mut Accelerator) -> f64 {
        let i = acc.find(self.times, t);
        let dt = t - self.times[i];
        self.b[i] + dt * (2.0 * self.c[i] + 3.0 * dt * self.d[i])
    }

    fn eval_deriv2(&self, t: f64, acc: &mut Accelerator) -> f64 {
        let i = acc.find(self.times, t);
        let dt = t - self.times[i];
        2.0 * self.c[i] + 6.0 * dt * self.d[i]
    }
}

/// Solve a tridiagonal system with the Thomas algorithm
///
/// `lower` and `upper` hold the sub- and super-diagonals (length `n - 1`).
/// The natural spline system is strictly diagonally dominant for strictly
/// increasing knots, so no pivoting is needed.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    // Forward sweep
    if n > 1 {
        c_prime[0] = upper[0] / diag[0];
    }
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = diag[i] - lower[i - 1] * c_prime[i - 1];
        if i < n - 1 {
            c_prime[i] = upper[i] / denom;
        }
        d_prime[i] = (rhs[i] - lower[i - 1] * d_prime[i - 1]) / denom;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tridiagonal_solve() {
        // [2 1 0; 1 2 1; 0 1 2] x = [4 8 8] has solution [1 2 3]
        let x = solve_tridiagonal(&[1.0, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[4.0, 8.0, 8.0]);
        for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_natural_boundary() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let values = [0.0, 1.0, 0.0, 1.0];
        let spline = CubicSpline::new(&times, &values);
        let mut acc = Accelerator::new();

        // Zero curvature at both ends
        assert!(spline.eval_deriv2(0.0, &mut acc).abs() < 1e-12);
        assert!(spline.eval_deriv2(3.0, &mut acc).abs() < 1e-12);

        // Passes through every knot but the last
        for (t, v) in times.iter().zip(values.iter()).take(3) {
            assert!((spline.eval(*t, &mut acc) - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_points_is_linear() {
        let times = [1.0, 3.0];
        let values = [2.0, 6.0];
        let spline = CubicSpline::new(&times, &values);
        let mut acc = Accelerator::new();

        assert!((spline.eval(2.0, &mut acc) - 4.0).abs() < 1e-12);
        assert!((spline.eval_deriv(1.5, &mut acc) - 2.0).abs() < 1e-12);
        assert_eq!(spline.eval_deriv2(2.5, &mut acc), 0.0);
    }

    #[test]
    fn test_reproduces_straight_line() {
        // A natural spline through collinear points is that line
        let times = [0.0, 0.5, 2.0, 2.5, 4.0];
        let values: Vec<f64> = times.iter().map(|t| 3.0 * t - 1.0).collect();
        let spline = CubicSpline::new(&times, &values);
        let mut acc = Accelerator::new();

        for t in [0.25, 1.0, 2.2, 3.9] {
            assert!((spline.eval(t, &mut acc) - (3.0 * t - 1.0)).abs() < 1e-12);
            assert!((spline.eval_deriv(t, &mut acc) - 3.0).abs() < 1e-12);
            assert!(spline.eval_deriv2(t, &mut acc).abs() < 1e-12);
        }
    }

    #[test]
    fn test_continuity_at_knots() {
        let times = [0.0, 1.0, 2.5, 3.0, 5.0];
        let values = [1.0, -1.0, 2.0, 0.5, 0.0];
        let spline = CubicSpline::new(&times, &values);
        let mut acc = Accelerator::new();

        // Evaluating the left interval polynomial at its right end must match
        // the right interval at its left end for value, slope and curvature.
        for i in 1..times.len() - 1 {
            let h = times[i] - times[i - 1];
            let j = i - 1;
            let left_value =
                values[j] + h * (spline.b[j] + h * (spline.c[j] + h * spline.d[j]));
            let left_slope = spline.b[j] + h * (2.0 * spline.c[j] + 3.0 * h * spline.d[j]);
            let left_curve = 2.0 * spline.c[j] + 6.0 * h * spline.d[j];

            assert!((left_value - spline.eval(times[i], &mut acc)).abs() < 1e-12);
            assert!((left_slope - spline.eval_deriv(times[i], &mut acc)).abs() < 1e-12);
            assert!((left_curve - spline.eval_deriv2(times[i], &mut acc)).abs() < 1e-12);
        }
    }
}
