//! Error types used by the geometry model and the codecs built on top of it.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, Error)]
pub enum GeomError {
    /// The geometry type cannot be a member of the target collection kind.
    #[error("geometry type is not supported by this collection")]
    UnsupportedType,

    /// An allocation guard or allocation attempt failed.
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// Structurally invalid input data.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// The input buffer is shorter than the structure it declares.
    #[error("unexpected end of input data")]
    NotEnoughData,

    /// A coordinate transform failed after some members of a collection were
    /// already transformed, leaving the collection in a mixed state.
    #[error("transform failed after some members were already transformed")]
    PartialTransform,

    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

/// Error giving a value back to the caller when its ownership was refused.
///
/// Mutations that take ownership never consume their argument on failure; the
/// rejected value is returned inside this error so the caller can keep it.
#[derive(Debug)]
pub struct Rejected<T> {
    /// The value that was not accepted.
    pub value: T,
    /// Why it was rejected.
    pub error: GeomError,
}

impl<T> Rejected<T> {
    pub(crate) fn new(value: T, error: GeomError) -> Self {
        Self { value, error }
    }

    /// Drops the rejected value and returns the underlying error.
    pub fn into_error(self) -> GeomError {
        self.error
    }
}

impl<T> From<Rejected<T>> for GeomError {
    fn from(value: Rejected<T>) -> Self {
        value.error
    }
}
