//! Position and velocity reconstruction
//!
//! The three axes are evaluated with no coupling between them. All three
//! channels are validated before any of them is evaluated, so a bad channel
//! never produces a partially computed vector.

use nalgebra::Vector3;

use crate::errors::{check_count, Result};
use crate::interpolation::{self, Derivative, Kernel};
use crate::polynomial;

use super::VECTOR_CHANNELS;

/// Interpolate a 3-vector from sampled channels at `time`
fn interpolate_vector(
    coords: &[Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
    derivative: Derivative,
) -> Result<Vector3<f64>> {
    check_count("vector channels", VECTOR_CHANNELS, coords.len())?;
    for channel in coords {
        interpolation::validate_samples(channel, times, time, kernel)?;
    }

    let axis = |i: usize| {
        interpolation::evaluate_validated(&coords[i], times, time, kernel, derivative)
    };
    let result = Vector3::new(axis(0), axis(1), axis(2));

    log::debug!(
        "interpolated vector ({}, d={}) at t={}: {:?}",
        kernel,
        derivative.order(),
        time,
        result
    );
    Ok(result)
}

/// Evaluate a 3-vector from per-axis polynomial coefficients at `time`
fn evaluate_vector(coeffs: &[Vec<f64>], time: f64, order: usize) -> Result<Vector3<f64>> {
    check_count("polynomial coefficient sets", VECTOR_CHANNELS, coeffs.len())?;
    for axis in coeffs {
        polynomial::check_coefficients(axis)?;
    }

    let axis = |i: usize| polynomial::evaluate_checked(&coeffs[i], time, order);
    let result = Vector3::new(axis(0), axis(1), axis(2));

    log::debug!("evaluated polynomial vector (d={}) at t={}: {:?}", order, time, result);
    Ok(result)
}

/// Interpolate the position at `time` from sampled X/Y/Z channels
///
/// # Arguments
///
/// * `coords` - Exactly three channels, each with one value per entry of `times`
/// * `times` - Strictly increasing sample times shared by all channels
/// * `time` - Query time inside the sampled range
/// * `kernel` - Interpolation method applied to every axis
pub fn get_position(
    coords: &[Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
) -> Result<Vector3<f64>> {
    interpolate_vector(coords, times, time, kernel, Derivative::Value)
}

/// Interpolate the velocity at `time` as the first derivative of each channel
pub fn get_velocity(
    coords: &[Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
) -> Result<Vector3<f64>> {
    interpolate_vector(coords, times, time, kernel, Derivative::First)
}

/// Evaluate the position at `time` from X/Y/Z polynomial coefficients
///
/// `coeffs` holds three coefficient lists, lowest degree first:
///
/// ```text
/// x = cx_0 + cx_1·t + ... + cx_n·tⁿ
/// y = cy_0 + cy_1·t + ... + cy_n·tⁿ
/// z = cz_0 + cz_1·t + ... + cz_n·tⁿ
/// ```
pub fn get_position_from_coeffs(coeffs: &[Vec<f64>], time: f64) -> Result<Vector3<f64>> {
    evaluate_vector(coeffs, time, 0)
}

/// Evaluate the velocity at `time` by differentiating the position polynomials
pub fn get_velocity_from_coeffs(coeffs: &[Vec<f64>], time: f64) -> Result<Vector3<f64>> {
    evaluate_vector(coeffs, time, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StateError;

    fn channels() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 10.0, 20.0],
            vec![5.0, 5.0, 5.0],
            vec![-1.0, 1.0, -1.0],
        ]
    }

    #[test]
    fn test_position_axes_are_independent() {
        let times = [0.0, 1.0, 2.0];
        let pos = get_position(&channels(), &times, 0.5, Kernel::Linear).unwrap();

        assert_eq!(pos, Vector3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_velocity_is_slope() {
        let times = [0.0, 1.0, 2.0];
        let vel = get_velocity(&channels(), &times, 1.5, Kernel::Linear).unwrap();

        assert_eq!(vel, Vector3::new(10.0, 0.0, -2.0));
    }

    #[test]
    fn test_channel_count() {
        let times = [0.0, 1.0, 2.0];
        let mut coords = channels();
        coords.pop();

        assert_eq!(
            get_position(&coords, &times, 1.0, Kernel::Linear),
            Err(StateError::ShapeMismatch {
                context: "vector channels",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_bad_channel_is_reported_before_evaluation() {
        let times = [0.0, 1.0, 2.0];
        let mut coords = channels();
        coords[2].pop();

        assert!(matches!(
            get_velocity(&coords, &times, 1.0, Kernel::CubicSpline),
            Err(StateError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn test_polynomial_position_and_velocity() {
        // x = 1 + t, y = t², z = 3
        let coeffs = vec![vec![1.0, 1.0], vec![0.0, 0.0, 1.0], vec![3.0]];

        let pos = get_position_from_coeffs(&coeffs, 2.0).unwrap();
        assert_eq!(pos, Vector3::new(3.0, 4.0, 3.0));

        let vel = get_velocity_from_coeffs(&coeffs, 2.0).unwrap();
        assert_eq!(vel, Vector3::new(1.0, 4.0, 0.0));
    }

    #[test]
    fn test_polynomial_validation() {
        let coeffs = vec![vec![1.0], vec![], vec![2.0]];
        assert_eq!(
            get_position_from_coeffs(&coeffs, 0.0),
            Err(StateError::EmptyCoefficients)
        );

        let coeffs = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        assert!(matches!(
            get_velocity_from_coeffs(&coeffs, 0.0),
            Err(StateError::ShapeMismatch { expected: 3, actual: 4, .. })
        ));
    }
}
