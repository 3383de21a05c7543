//! Orientation and angular rate reconstruction from quaternion samples
//!
//! Quaternions are stored as four channels in scalar-first order
//! `[w, x, y, z]`. Interpolating each component independently does not keep
//! the result on the unit sphere, so normalization happens twice:
//!
//! 1. every input sample is normalized (once per sample set), and
//! 2. the interpolated 4-vector is normalized before it is returned.
//!
//! A quaternion with zero norm is left unchanged by either step. Very small
//! and very large components are rescaled before the norm is taken.

use nalgebra::{Quaternion, UnitQuaternion, Vector3, Vector4};

use crate::errors::{check_count, Result, StateError};
use crate::interpolation::{self, Derivative, Kernel};

use super::QUATERNION_CHANNELS;

/// Normalize a scalar-first quaternion 4-vector to unit length
///
/// Zero vectors are returned as-is. Components are first divided by the
/// largest magnitude so the squared norm neither underflows nor overflows.
pub fn normalize_components(components: Vector4<f64>) -> Vector4<f64> {
    let scale = components.amax();
    if scale == 0.0 {
        return components;
    }
    (components / scale)
        .try_normalize(0.0)
        .unwrap_or(components)
}

/// Normalize every sample of a quaternion sample set in place
///
/// `rotations` must hold exactly four channels of equal length. Sample `i` is
/// the quaternion `(rotations[0][i], rotations[1][i], rotations[2][i], rotations[3][i])`.
pub fn normalize_samples(rotations: &mut [Vec<f64>]) -> Result<()> {
    check_count("quaternion channels", QUATERNION_CHANNELS, rotations.len())?;
    let n = rotations[0].len();
    for channel in rotations.iter().skip(1) {
        check_count("quaternion channel length", n, channel.len())?;
    }

    for i in 0..n {
        let q = normalize_components(Vector4::new(
            rotations[0][i],
            rotations[1][i],
            rotations[2][i],
            rotations[3][i],
        ));
        for (channel, value) in rotations.iter_mut().zip(q.iter()) {
            channel[i] = *value;
        }
    }

    Ok(())
}

/// Check the channel count and every channel's samples
fn validate_channels(
    rotations: &[Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
) -> Result<()> {
    check_count("quaternion channels", QUATERNION_CHANNELS, rotations.len())?;
    for channel in rotations {
        interpolation::validate_samples(channel, times, time, kernel)?;
    }
    Ok(())
}

/// Interpolate each of the four channels and normalize the assembled result
fn interpolate_quaternion(
    rotations: &[Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
    derivative: Derivative,
) -> Vector4<f64> {
    let component = |i: usize| {
        interpolation::evaluate_validated(&rotations[i], times, time, kernel, derivative)
    };
    let raw = Vector4::new(component(0), component(1), component(2), component(3));
    let result = normalize_components(raw);

    log::debug!(
        "interpolated quaternion ({}, d={}) at t={}: {:?}",
        kernel,
        derivative.order(),
        time,
        result
    );
    result
}

/// Interpolate the orientation at `time` as a unit scalar-first quaternion
///
/// The channels are normalized in place sample by sample before
/// interpolation. Normalization is idempotent, so the same channels can be
/// passed to any number of calls.
///
/// # Arguments
///
/// * `rotations` - Exactly four channels `[w, x, y, z]`, one value per entry of `times`
/// * `times` - Strictly increasing sample times
/// * `time` - Query time inside the sampled range
/// * `kernel` - Interpolation method applied to every component
pub fn get_rotation(
    rotations: &mut [Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
) -> Result<Vector4<f64>> {
    validate_channels(rotations, times, time, kernel)?;
    normalize_samples(rotations)?;
    Ok(interpolate_quaternion(rotations, times, time, kernel, Derivative::Value))
}

/// Interpolate the quaternion rate at `time`
///
/// Samples are normalized in place as in [`get_rotation`], the first
/// derivative of each component is interpolated, and the assembled 4-vector
/// is scaled to unit length. The result therefore carries the direction of
/// the quaternion rate, not its magnitude.
pub fn get_angular_velocity(
    rotations: &mut [Vec<f64>],
    times: &[f64],
    time: f64,
    kernel: Kernel,
) -> Result<Vector4<f64>> {
    validate_channels(rotations, times, time, kernel)?;
    normalize_samples(rotations)?;
    Ok(interpolate_quaternion(rotations, times, time, kernel, Derivative::First))
}

/// Orientation between two named reference frames from a coefficient model
///
/// Coefficient-driven frame rotations are not available yet; this always
/// returns [`StateError::Unsupported`].
pub fn get_rotation_between_frames(
    from: &str,
    to: &str,
    _coefficients: &[f64],
    _time: f64,
) -> Result<Vector3<f64>> {
    Err(StateError::Unsupported(format!(
        "coefficient rotation model from {} to {}",
        from, to
    )))
}

/// Angular velocity between two named reference frames from a coefficient model
///
/// Always returns [`StateError::Unsupported`], see [`get_rotation_between_frames`].
pub fn get_angular_velocity_between_frames(
    from: &str,
    to: &str,
    _coefficients: &[f64],
    _time: f64,
) -> Result<Vector3<f64>> {
    Err(StateError::Unsupported(format!(
        "coefficient angular velocity model from {} to {}",
        from, to
    )))
}

/// A quaternion sample set that is normalized once and queried many times
///
/// # Examples
///
/// ```rust
/// use ephemstate::interpolation::Kernel;
/// use ephemstate::state::OrientationSamples;
///
/// let samples = OrientationSamples::new(
///     vec![vec![2.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0], vec![0.0, 1.0]],
///     vec![0.0, 10.0],
/// )
/// .unwrap();
///
/// let q = samples.rotation(0.0, Kernel::Linear).unwrap();
/// assert_eq!(q[0], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationSamples {
    channels: [Vec<f64>; QUATERNION_CHANNELS],
    times: Vec<f64>,
}

impl OrientationSamples {
    /// Validate and normalize a quaternion sample set
    ///
    /// Fails with `ShapeMismatch` unless exactly four channels are given, each
    /// with one value per time, and with `NonMonotonicTimes` unless `times`
    /// strictly increases. Queries only check the kernel's sample count and
    /// the query time afterwards.
    pub fn new(mut rotations: Vec<Vec<f64>>, times: Vec<f64>) -> Result<Self> {
        check_count("quaternion channels", QUATERNION_CHANNELS, rotations.len())?;
        for channel in &rotations {
            check_count("quaternion channel length", times.len(), channel.len())?;
        }
        interpolation::check_monotonic(&times)?;

        normalize_samples(&mut rotations)?;

        let channels: [Vec<f64>; QUATERNION_CHANNELS] = rotations.try_into().map_err(
            |v: Vec<Vec<f64>>| StateError::ShapeMismatch {
                context: "quaternion channels",
                expected: QUATERNION_CHANNELS,
                actual: v.len(),
            },
        )?;

        Ok(Self { channels, times })
    }

    /// Sample times
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Normalized channels in `[w, x, y, z]` order
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    fn query(&self, time: f64, kernel: Kernel, derivative: Derivative) -> Result<Vector4<f64>> {
        interpolation::check_sample_count(&self.times, kernel)?;
        interpolation::check_domain(&self.times, time)?;
        Ok(interpolate_quaternion(
            &self.channels,
            &self.times,
            time,
            kernel,
            derivative,
        ))
    }

    /// Interpolated unit orientation at `time`, scalar first
    pub fn rotation(&self, time: f64, kernel: Kernel) -> Result<Vector4<f64>> {
        self.query(time, kernel, Derivative::Value)
    }

    /// Normalized interpolated quaternion rate at `time`, scalar first
    pub fn angular_velocity(&self, time: f64, kernel: Kernel) -> Result<Vector4<f64>> {
        self.query(time, kernel, Derivative::First)
    }

    /// Interpolated orientation at `time` as a unit quaternion
    pub fn unit_quaternion(&self, time: f64, kernel: Kernel) -> Result<UnitQuaternion<f64>> {
        let q = self.rotation(time, kernel)?;
        Ok(UnitQuaternion::from_quaternion(Quaternion::new(
            q[0], q[1], q[2], q[3],
        )))
    }
}
