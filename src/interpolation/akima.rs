//! Akima spline kernel
//!
//! A cubic Hermite interpolant whose knot slopes are weighted averages of the
//! neighbouring secant slopes. The weights come from how much the secants
//! change on either side, which keeps a single outlier from disturbing the
//! curve far away. Two extra secants are extrapolated past each end.

use super::{Accelerator, Interpolant};

/// Akima spline over borrowed samples
pub(crate) struct Akima<'a> {
    times: &'a [f64],
    values: &'a [f64],
    /// Knot slopes
    b: Vec<f64>,
    /// Quadratic coefficient per interval
    c: Vec<f64>,
    /// Cubic coefficient per interval
    d: Vec<f64>,
}

impl<'a> Akima<'a> {
    /// Build the spline; requires at least five strictly increasing samples
    pub(crate) fn new(times: &'a [f64], values: &'a [f64]) -> Self {
        let n = times.len();

        // Secants padded with two extrapolated slopes at each end:
        // m[k + 2] is the secant of interval k.
        let mut m = vec![0.0; n + 3];
        for k in 0..n - 1 {
            m[k + 2] = (values[k + 1] - values[k]) / (times[k + 1] - times[k]);
        }
        m[1] = 2.0 * m[2] - m[3];
        m[0] = 3.0 * m[2] - 2.0 * m[3];
        m[n + 1] = 2.0 * m[n] - m[n - 1];
        m[n + 2] = 3.0 * m[n] - 2.0 * m[n - 1];

        let slopes: Vec<f64> = (0..n)
            .map(|i| {
                // Secants of intervals i-2, i-1, i, i+1
                let (m_a, m_b, m_c, m_d) = (m[i], m[i + 1], m[i + 2], m[i + 3]);
                let ne = (m_d - m_c).abs();
                let nw = (m_b - m_a).abs();
                if ne + nw == 0.0 {
                    0.5 * (m_b + m_c)
                } else {
                    (ne * m_b + nw * m_c) / (ne + nw)
                }
            })
            .collect();

        let mut c = Vec::with_capacity(n - 1);
        let mut d = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let h = times[i + 1] - times[i];
            let secant = m[i + 2];
            c.push((3.0 * secant - 2.0 * slopes[i] - slopes[i + 1]) / h);
            d.push((slopes[i] + slopes[i + 1] - 2.0 * secant) / (h * h));
        }

        Self {
            times,
            values,
            b: slopes,
            c,
            d,
        }
    }
}

impl Interpolant for Akima<'_> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_akima_exact_on_lines() {
        let times = [0.0, 1.0, 2.0, 4.0, 5.0, 7.0];
        let values: Vec<f64> = times.iter().map(|t| 0.5 * t + 2.0).collect();
        let model = Akima::new(&times, &values);
        let mut acc = Accelerator::new();

        for t in [0.0, 0.3, 1.5, 3.0, 6.9] {
            assert!((model.eval(t, &mut acc) - (0.5 * t + 2.0)).abs() < 1e-12);
            assert!((model.eval_deriv(t, &mut acc) - 0.5).abs() < 1e-12);
            assert!(model.eval_deriv2(t, &mut acc).abs() < 1e-12);
        }
    }

    #[test]
    fn test_akima_hits_knots() {
        let times = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [0.0, 2.0, 1.0, 3.0, 2.5, 4.0];
        let model = Akima::new(&times, &values);
        let mut acc = Accelerator::new();

        for i in 0..times.len() - 1 {
            assert!((model.eval(times[i], &mut acc) - values[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_akima_flat_step_does_not_overshoot() {
        // A step between two flat runs stays within the data range
        let times = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let values = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let model = Akima::new(&times, &values);
        let mut acc = Accelerator::new();

        for k in 0..=60 {
            let t = k as f64 * 0.1;
            let v = model.eval(t, &mut acc);
            assert!(
                (-1e-12..=1.0 + 1e-12).contains(&v),
                "overshoot at t={}: {}",
                t,
                v
            );
        }
    }
}
