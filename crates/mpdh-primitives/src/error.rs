/// Unified error type for all primitives operations.
///
/// Covers randomness, curve membership and encoding failures.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("secure random source failed: {0}")]
    EntropyFailure(String),

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("invalid point: {0}")]
    InvalidPoint(String),

    #[error("point at infinity")]
    PointAtInfinity,

    #[error("invalid scalar length: expected at most {max} bytes, got {got}")]
    InvalidScalarLength { max: usize, got: usize },

    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::MalformedEncoding(e.to_string())
    }
}
