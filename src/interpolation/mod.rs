//! Scalar interpolation of a single sampled channel
//!
//! Given a series of `(time, value)` samples this module evaluates a
//! continuous model of the channel, or its first or second derivative, at an
//! arbitrary time inside the sampled range.
//!
//! # Kernels
//!
//! - `linear`: piecewise-linear interpolation. The first derivative is the
//!   local slope and is constant between knots. The second derivative of a
//!   piecewise-linear model is degenerate and always evaluates to `0.0`.
//! - `cubic-spline`: natural cubic spline (zero curvature at both ends),
//!   continuous through the second derivative.
//! - `akima`: Akima's locally weighted cubic, continuous through the first
//!   derivative and much less prone to overshoot around outliers.
//!
//! # Knot convention
//!
//! A query that lands exactly on an interior knot is evaluated on the interval
//! to its right; a query on the last knot uses the last interval. This only
//! matters for derivatives of kernels that are not smooth at the knots.
//!
//! Each call builds its own model and lookup cache and drops them before
//! returning, so nothing is shared between calls or threads.

mod akima;
mod linear;
mod spline;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{check_count, Result, StateError};

use self::akima::Akima;
use self::linear::Linear;
use self::spline::CubicSpline;

/// Interpolation method used to build a continuous model from samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kernel {
    /// Piecewise-linear interpolation
    #[default]
    Linear,
    /// Natural cubic spline
    #[serde(alias = "cspline", alias = "cubic_spline")]
    CubicSpline,
    /// Akima spline
    Akima,
}

impl Kernel {
    /// All available kernels
    pub const ALL: [Kernel; 3] = [Kernel::Linear, Kernel::CubicSpline, Kernel::Akima];

    /// Minimum number of samples the kernel can be built from
    pub fn min_samples(self) -> usize {
        match self {
            Kernel::Linear | Kernel::CubicSpline => 2,
            Kernel::Akima => 5,
        }
    }

    /// Canonical name of the kernel
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Linear => "linear",
            Kernel::CubicSpline => "cubic-spline",
            Kernel::Akima => "akima",
        }
    }

    /// Build the model for this kernel over already validated samples
    fn build<'a>(self, times: &'a [f64], values: &'a [f64]) -> Box<dyn Interpolant + 'a> {
        match self {
            Kernel::Linear => Box::new(Linear::new(times, values)),
            Kernel::CubicSpline => Box::new(CubicSpline::new(times, values)),
            Kernel::Akima => Box::new(Akima::new(times, values)),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Kernel {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Kernel::Linear),
            "cubic-spline" | "cubic_spline" | "cspline" => Ok(Kernel::CubicSpline),
            "akima" => Ok(Kernel::Akima),
            _ => Err(StateError::UnknownKernel(s.to_string())),
        }
    }
}

/// Which derivative of the interpolated model to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivative {
    /// The interpolated value itself
    Value,
    /// Rate of change
    First,
    /// Rate of the rate of change
    Second,
}

impl Derivative {
    /// The numeric order of the derivative
    pub fn order(self) -> usize {
        match self {
            Derivative::Value => 0,
            Derivative::First => 1,
            Derivative::Second => 2,
        }
    }
}

impl TryFrom<i32> for Derivative {
    type Error = StateError;

    fn try_from(order: i32) -> Result<Self> {
        match order {
            0 => Ok(Derivative::Value),
            1 => Ok(Derivative::First),
            2 => Ok(Derivative::Second),
            _ => Err(StateError::InvalidDerivativeOrder {
                order,
                supported: "0, 1 or 2",
            }),
        }
    }
}

/// Cached interval index for repeated lookups within one call
///
/// Holds the index `i` of the last interval `[times[i], times[i + 1])` that
/// was found. Lookups near the cached interval skip the binary search.
#[derive(Debug, Default)]
pub(crate) struct Accelerator {
    cache: usize,
}

impl Accelerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Locate the interval containing `t`
    ///
    /// `t` must lie inside `[times[0], times[n - 1]]`. The returned index is
    /// always in `0..n - 1`.
    pub(crate) fn find(&mut self, times: &[f64], t: f64) -> usize {
        let last = times.len() - 1;
        let cache = self.cache.min(last - 1);

        let index = if t < times[cache] {
            bsearch(times, t, 0, cache)
        } else if t >= times[cache + 1] {
            bsearch(times, t, cache, last)
        } else {
            cache
        };

        self.cache = index;
        index
    }
}

/// Binary search for `i` in `[lo, hi)` such that `times[i] <= t < times[i + 1]`
fn bsearch(times: &[f64], t: f64, mut lo: usize, mut hi: usize) -> usize {
    while hi > lo + 1 {
        let mid = (lo + hi) / 2;
        if times[mid] > t {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// A continuous model built from one channel of samples
pub(crate) trait Interpolant {
    /// Value of the model at `t`
    fn eval(&self, t: f64, acc: &mut Accelerator) -> f64;

    /// First derivative of the model at `t`
    fn eval_deriv(&self, t: f64, acc: &mut Accelerator) -> f64;

    /// Second derivative of the model at `t`
    fn eval_deriv2(&self, t: f64, acc: &mut Accelerator) -> f64;

    /// Evaluate the requested derivative at `t`
    fn evaluate(&self, t: f64, derivative: Derivative, acc: &mut Accelerator) -> f64 {
        match derivative {
            Derivative::Value => self.eval(t, acc),
            Derivative::First => self.eval_deriv(t, acc),
            Derivative::Second => self.eval_deriv2(t, acc),
        }
    }
}

/// Check every precondition of [`interpolate`] without evaluating anything
///
/// Returns the parsed derivative order on success.
pub fn validate(
    values: &[f64],
    times: &[f64],
    time: f64,
    kernel: Kernel,
    derivative: i32,
) -> Result<Derivative> {
    validate_samples(values, times, time, kernel)?;
    Derivative::try_from(derivative)
}

/// Check sample count, shape, ordering and domain of one channel
pub fn validate_samples(values: &[f64], times: &[f64], time: f64, kernel: Kernel) -> Result<()> {
    check_sample_count(times, kernel)?;
    check_count("channel values vs. times", times.len(), values.len())?;
    check_monotonic(times)?;
    check_domain(times, time)
}

/// Fail unless `kernel` has enough samples to fit
pub(crate) fn check_sample_count(times: &[f64], kernel: Kernel) -> Result<()> {
    let required = kernel.min_samples();
    if times.len() < required {
        return Err(StateError::InsufficientSamples {
            kernel,
            required,
            actual: times.len(),
        });
    }
    Ok(())
}

/// Fail at the first time that does not exceed its predecessor
pub(crate) fn check_monotonic(times: &[f64]) -> Result<()> {
    match times.windows(2).position(|w| w[1] <= w[0] || w[1].is_nan()) {
        Some(index) => Err(StateError::NonMonotonicTimes { index: index + 1 }),
        None => Ok(()),
    }
}

/// Fail unless `time` lies in the closed sampled range; `times` must be non-empty
pub(crate) fn check_domain(times: &[f64], time: f64) -> Result<()> {
    let start = times[0];
    let end = times[times.len() - 1];
    if !(start..=end).contains(&time) {
        return Err(StateError::OutOfDomain { time, start, end });
    }
    Ok(())
}

/// Evaluate samples that already passed [`validate`]
pub(crate) fn evaluate_validated(
    values: &[f64],
    times: &[f64],
    time: f64,
    kernel: Kernel,
    derivative: Derivative,
) -> f64 {
    // The last knot is evaluated at the far end of the last interval; return
    // the sample itself so values are exact at every knot.
    let last = times.len() - 1;
    if derivative == Derivative::Value && time == times[last] {
        return values[last];
    }

    let model = kernel.build(times, values);
    let mut acc = Accelerator::new();
    model.evaluate(time, derivative, &mut acc)
}

/// Interpolate a single channel at `time`
///
/// # Arguments
///
/// * `values` - Sampled values, one per entry of `times`
/// * `times` - Strictly increasing sample times
/// * `time` - Query time, must lie within `[times[0], times[n - 1]]`
/// * `kernel` - Interpolation method
/// * `derivative` - 0 for the value, 1 or 2 for the first or second derivative
///
/// # Errors
///
/// `InsufficientSamples`, `ShapeMismatch`, `NonMonotonicTimes`, `OutOfDomain`
/// or `InvalidDerivativeOrder`, checked in that order before any model is built.
pub fn interpolate(
    values: &[f64],
    times: &[f64],
    time: f64,
    kernel: Kernel,
    derivative: i32,
) -> Result<f64> {
    log::trace!(
        "interpolate: {} samples over [{:?}, {:?}] at t={} ({}, d={})",
        times.len(),
        times.first(),
        times.last(),
        time,
        kernel,
        derivative
    );

    let derivative = validate(values, times, time, kernel, derivative)?;
    Ok(evaluate_validated(values, times, time, kernel, derivative))
}
