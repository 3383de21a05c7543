//! Continuous-time state reconstruction
//!
//! Position and velocity are assembled from three independently interpolated
//! (or polynomially evaluated) axes. Orientation and its rate are assembled
//! from four quaternion channels with normalization before and after
//! interpolation.
//!
//! Every entry point validates the channel count first, then the inputs of
//! every channel, and only then evaluates anything.

pub mod position;
pub mod rotation;

pub use self::position::{
    get_position, get_position_from_coeffs, get_velocity, get_velocity_from_coeffs,
};
pub use self::rotation::{
    get_angular_velocity, get_angular_velocity_between_frames, get_rotation,
    get_rotation_between_frames, normalize_components, normalize_samples, OrientationSamples,
};

/// Number of channels in a position or velocity sample set
pub const VECTOR_CHANNELS: usize = 3;

/// Number of channels in a quaternion sample set (scalar first)
pub const QUATERNION_CHANNELS: usize = 4;
