//! Power-series polynomial evaluation with derivatives
//!
//! Compact ephemeris models describe each axis as an ordinary polynomial in
//! time. This module evaluates such a polynomial and any number of its
//! derivatives in a single pass using repeated synthetic division
//! (Horner's scheme carried through the derivatives).

use crate::errors::{Result, StateError};

/// Power-series polynomial representation and evaluation
///
/// Coefficients are ordered from lowest to highest degree:
/// `[c₀, c₁, c₂, ..., cₙ]` where the polynomial is
/// `f(t) = c₀ + c₁·t + c₂·t² + ... + cₙ·tⁿ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a new polynomial, failing if `coefficients` is empty
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(StateError::EmptyCoefficients);
        }
        Ok(Self { coefficients })
    }

    /// Evaluate the polynomial at `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }

    /// Evaluate the first derivative at `t`
    pub fn derivative(&self, t: f64) -> f64 {
        self.nth_derivative(t, 1)
    }

    /// Evaluate the `n`th derivative at `t`
    ///
    /// Orders above the degree return `0.0`.
    pub fn nth_derivative(&self, t: f64, n: usize) -> f64 {
        if n > self.degree() {
            return 0.0;
        }
        synthetic_division(&self.coefficients, t, n)[n]
    }

    /// Evaluate the value and every derivative up to `max_order` at `t`
    ///
    /// Element `k` of the result is the `k`th derivative. The result stops at
    /// the degree: it holds `max_order.min(degree) + 1` entries, and every
    /// omitted higher derivative is zero.
    pub fn derivatives(&self, t: f64, max_order: usize) -> Vec<f64> {
        synthetic_division(&self.coefficients, t, max_order.min(self.degree()))
    }

    /// Get the degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Get a reference to the coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Evaluate a polynomial given as raw coefficients at `time`
///
/// # Arguments
///
/// * `coeffs` - Coefficients, lowest degree first
/// * `time` - Evaluation point
/// * `derivative` - Derivative order; 0 for the value. Orders above the
///   degree return `0.0`
///
/// # Errors
///
/// `EmptyCoefficients` if `coeffs` is empty, `InvalidDerivativeOrder` if
/// `derivative` is negative.
pub fn evaluate_polynomial(coeffs: &[f64], time: f64, derivative: i32) -> Result<f64> {
    log::trace!(
        "evaluate_polynomial: degree {} at t={} (d={})",
        coeffs.len().saturating_sub(1),
        time,
        derivative
    );

    let order = check_polynomial(coeffs, derivative)?;
    Ok(evaluate_checked(coeffs, time, order))
}

/// Check the preconditions of [`evaluate_polynomial`], returning the order
pub(crate) fn check_polynomial(coeffs: &[f64], derivative: i32) -> Result<usize> {
    check_coefficients(coeffs)?;
    usize::try_from(derivative).map_err(|_| StateError::InvalidDerivativeOrder {
        order: derivative,
        supported: "non-negative",
    })
}

pub(crate) fn check_coefficients(coeffs: &[f64]) -> Result<()> {
    if coeffs.is_empty() {
        return Err(StateError::EmptyCoefficients);
    }
    Ok(())
}

/// Evaluate coefficients that passed [`check_polynomial`]
pub(crate) fn evaluate_checked(coeffs: &[f64], time: f64, order: usize) -> f64 {
    if order > coeffs.len() - 1 {
        return 0.0;
    }
    synthetic_division(coeffs, time, order)[order]
}

/// Value and derivatives `0..=top` of a non-empty coefficient slice at `t`
///
/// `top` must not exceed the degree.
fn synthetic_division(coeffs: &[f64], t: f64, top: usize) -> Vec<f64> {
    let degree = coeffs.len() - 1;
    let mut res = vec![coeffs[degree]; top + 1];

    // After processing coefficient k, res[j] holds the j-th synthetic
    // division remainder divided by j!.
    for k in (0..degree).rev() {
        res[0] = t * res[0] + coeffs[k];
        for j in 1..=top.min(k) {
            res[j] = t * res[j] + res[j - 1];
        }
    }

    let mut factorial = 1.0;
    for (j, r) in res.iter_mut().enumerate().skip(2) {
        factorial *= j as f64;
        *r *= factorial;
    }

    res
}
