//! Error types for simdtier operations.
//!
//! Most misuse of the vector types is caught at compile time (unsupported
//! backends, casts without an implementation). The errors here cover what
//! can only be known at run time: lane indices, lane-count mismatches when
//! moving vectors between backends, and slice kernel input validation.

use std::fmt;

/// Errors that can occur during simdtier operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimdError {
    /// A lane index outside `[0, lanes)` was passed to a lane accessor.
    LaneOutOfRange {
        /// Name of the operation that rejected the index.
        operation: &'static str,
        /// The index that was requested.
        index: usize,
        /// Number of lanes of the vector.
        lanes: usize,
    },
    /// A conversion between vector types that cannot be performed.
    InvalidCast {
        /// Source type description.
        from: String,
        /// Destination type description.
        to: String,
        /// Human-readable error message.
        message: String,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for SimdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdError::LaneOutOfRange {
                operation,
                index,
                lanes,
            } => write!(
                f,
                "Lane index out of range in {}: index {} but the vector has {} lanes",
                operation, index, lanes
            ),
            SimdError::InvalidCast { from, to, message } => {
                write!(f, "Invalid cast from {} to {}: {}", from, to, message)
            }
            SimdError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for SimdError {}

/// Result type alias for simdtier operations.
pub type Result<T> = std::result::Result<T, SimdError>;

/// Creates a lane index error.
pub fn lane_error(operation: &'static str, index: usize, lanes: usize) -> SimdError {
    SimdError::LaneOutOfRange {
        operation,
        index,
        lanes,
    }
}

/// Creates a cast error.
pub fn cast_error(
    from: impl Into<String>,
    to: impl Into<String>,
    message: impl Into<String>,
) -> SimdError {
    SimdError::InvalidCast {
        from: from.into(),
        to: to.into(),
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> SimdError {
    SimdError::ValidationError {
        message: message.into(),
    }
}

/// Checks `index` against `lanes`, naming `operation` in the error.
#[inline(always)]
pub(crate) fn check_lane(operation: &'static str, index: usize, lanes: usize) -> Result<()> {
    if index < lanes {
        Ok(())
    } else {
        Err(lane_error(operation, index, lanes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_error_display() {
        let error = lane_error("insert", 5, 4);
        let display = format!("{}", error);
        assert!(display.contains("Lane index out of range"));
        assert!(display.contains("insert"));
        assert!(display.contains("index 5"));
        assert!(display.contains("4 lanes"));
    }

    #[test]
    fn test_cast_error_display() {
        let error = cast_error("Float32<AVX2>", "Float32<SSE2>", "lane counts differ (8 vs 4)");
        let display = format!("{}", error);
        assert!(display.contains("Invalid cast"));
        assert!(display.contains("Float32<AVX2>"));
        assert!(display.contains("Float32<SSE2>"));
        assert!(display.contains("lane counts differ"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("input slices must have same length");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("input slices must have same length"));
    }

    #[test]
    fn test_check_lane_bounds() {
        assert_eq!(check_lane("extract", 0, 4), Ok(()));
        assert_eq!(check_lane("extract", 3, 4), Ok(()));
        assert_eq!(check_lane("extract", 4, 4), Err(lane_error("extract", 4, 4)));
        assert!(check_lane("extract", usize::MAX, 8).is_err());
    }

    #[test]
    fn test_error_equality() {
        let error1 = validation_error("test message");
        let error2 = validation_error("test message");
        let error3 = validation_error("different message");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
        assert_ne!(lane_error("insert", 4, 4), lane_error("extract", 4, 4));
    }

    #[test]
    fn test_error_trait() {
        let error = lane_error("insert", 9, 8);
        let _: &dyn std::error::Error = &error;
    }
}
