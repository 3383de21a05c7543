//! Error types for state reconstruction
//!
//! Every precondition of the interpolation and evaluation routines maps to a
//! distinct variant here so callers can branch on the cause of a failure.

use thiserror::Error;

use crate::interpolation::Kernel;

/// Main error type for ephemstate functionality
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Wrong number of channels, or a channel whose length disagrees with the times
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being checked (e.g. "position channels")
        context: &'static str,
        /// The required count
        expected: usize,
        /// The count that was supplied
        actual: usize,
    },

    /// Too few time/value pairs for the selected kernel
    #[error("Insufficient samples for {kernel} interpolation: need at least {required}, got {actual}")]
    InsufficientSamples {
        /// The kernel that was requested
        kernel: Kernel,
        /// Minimum number of samples the kernel needs
        required: usize,
        /// Number of samples supplied
        actual: usize,
    },

    /// A polynomial was given no coefficients
    #[error("Polynomial coefficient list is empty")]
    EmptyCoefficients,

    /// Query time lies strictly outside the sampled range
    #[error("Time {time} is outside sample range ({start}..{end})")]
    OutOfDomain {
        /// The requested time
        time: f64,
        /// First sample time
        start: f64,
        /// Last sample time
        end: f64,
    },

    /// Requested derivative order is not supported by the operation
    #[error("Invalid derivative order {order}, supported orders are {supported}")]
    InvalidDerivativeOrder {
        /// The order that was requested
        order: i32,
        /// Human readable description of the accepted range
        supported: &'static str,
    },

    /// Sample times are not strictly increasing
    #[error("Sample times must be strictly increasing (violated at index {index})")]
    NonMonotonicTimes {
        /// Index of the first time that is not greater than its predecessor
        index: usize,
    },

    /// A kernel name that could not be parsed
    #[error("Unknown interpolation kernel: {0}")]
    UnknownKernel(String),

    /// Capability that is declared but not available
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Extension of the Result type for ephemstate operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Helper to build a shape mismatch error when `actual != expected`
pub(crate) fn check_count(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(StateError::ShapeMismatch {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_count() {
        assert!(check_count("channels", 3, 3).is_ok());

        let err = check_count("channels", 3, 4).unwrap_err();
        assert_eq!(
            err,
            StateError::ShapeMismatch {
                context: "channels",
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_messages_name_the_cause() {
        let err = StateError::OutOfDomain {
            time: 5.0,
            start: 0.0,
            end: 2.0,
        };
        assert_eq!(err.to_string(), "Time 5 is outside sample range (0..2)");

        let err = StateError::InsufficientSamples {
            kernel: Kernel::Akima,
            required: 5,
            actual: 3,
        };
        assert!(err.to_string().contains("akima"));
        assert!(err.to_string().contains("at least 5"));
    }
}
