//! Error types for elemcmp

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using elemcmp's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in elemcmp operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A tensor could not be resized to the requested shape
    #[error("Cannot resize tensor from {from:?} to {to:?}: {reason}")]
    ResizeFailed {
        /// Shape before the resize
        from: Vec<usize>,
        /// Requested shape
        to: Vec<usize>,
        /// Why the resize was rejected
        reason: &'static str,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Shapes cannot be broadcast together
    #[error("Cannot broadcast shapes {lhs:?} and {rhs:?}")]
    BroadcastError {
        /// Left-hand side shape
        lhs: Vec<usize>,
        /// Right-hand side shape
        rhs: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Typed access with an element type that does not match the tensor dtype
    #[error("DType mismatch: expected {expected:?}, got {got:?}")]
    DTypeMismatch {
        /// DType of the tensor
        expected: DType,
        /// DType requested by the caller
        got: DType,
    },

    /// DType is known but its element type is compiled out
    #[error("DType {dtype:?} requires the '{feature}' feature")]
    FeatureRequired {
        /// The dtype that needs the feature
        dtype: DType,
        /// Cargo feature to enable
        feature: &'static str,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("Operation requires contiguous tensor")]
    NotContiguous,

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a broadcast error
    pub fn broadcast(lhs: &[usize], rhs: &[usize]) -> Self {
        Self::BroadcastError {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a resize error
    pub fn resize_failed(from: &[usize], to: &[usize], reason: &'static str) -> Self {
        Self::ResizeFailed {
            from: from.to_vec(),
            to: to.to_vec(),
            reason,
        }
    }
}
