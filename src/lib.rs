//! Ephemstate: continuous-time spacecraft state from sampled ephemerides
//!
//! This crate reconstructs position, velocity, orientation and orientation
//! rate at an arbitrary time from discrete, time-tagged samples or from a
//! compact polynomial model. Loading and parsing mission metadata is left to
//! the caller; everything here is a pure function over in-memory arrays.
//!
//! # Main Components
//!
//! - `interpolation`: single-channel interpolation with selectable kernels
//! - `polynomial`: power-series evaluation with derivatives
//! - `state`: 3-vector and quaternion reconstruction built on the above
//! - `errors`: the error taxonomy shared by every operation
//!
//! # Example
//!
//! ```rust
//! use ephemstate::{get_position, Kernel};
//!
//! let coords = vec![vec![1.0, 2.0, 3.0]; 3];
//! let times = [0.0, 1.0, 2.0];
//!
//! let position = get_position(&coords, &times, 1.0, Kernel::Linear).unwrap();
//! assert_eq!(position.as_slice(), &[2.0, 2.0, 2.0]);
//! ```

pub mod errors;
pub mod interpolation;
pub mod polynomial;
pub mod state;

// Re-export commonly used types
pub use errors::{Result, StateError};
pub use interpolation::{interpolate, Derivative, Kernel};
pub use polynomial::{evaluate_polynomial, Polynomial};
pub use state::{
    get_angular_velocity, get_position, get_position_from_coeffs, get_rotation, get_velocity,
    get_velocity_from_coeffs, OrientationSamples,
};
