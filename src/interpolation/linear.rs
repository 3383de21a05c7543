//! Piecewise-linear kernel

use super::{Accelerator, Interpolant};

/// Piecewise-linear model over borrowed samples
pub(crate) struct Linear<'a> {
    times: &'a [f64],
    values: &'a [f64],
}

impl<'a> Linear<'a> {
    pub(crate) fn new(times: &'a [f64], values: &'a [f64]) -> Self {
        Self { times, values }
    }

    /// Interval index and slope of the segment containing `t`
    fn segment(&self, t: f64, acc: &mut Accelerator) -> (usize, f64) {
        let i = acc.find(self.times, t);
        let h = self.times[i + 1] - self.times[i];
        (i, (self.values[i + 1] - self.values[i]) / h)
    }
}

impl Interpolant for Linear<'_> {
    fn eval(&self, t: f64, acc: &mut Accelerator) -> f64 {
        let (i, slope) = self.segment(t, acc);
        self.values[i] + slope * (t - self.times[i])
    }

    fn eval_deriv(&self, t: f64, acc: &mut Accelerator) -> f64 {
        self.segment(t, acc).1
    }

    // A piecewise-linear model has no curvature.
    fn eval_deriv2(&self, _t: f64, _acc: &mut Accelerator) -> f64 {
        0.0
    }
}
