use mpdh_primitives::PrimitivesError;

use crate::config::CurveKind;

/// Error types for protocol operations.
///
/// Every variant is fatal for the operation that produced it; nothing is
/// retried and no partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("secure random source failed: {0}")]
    EntropyFailure(String),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("invalid point: {0}")]
    InvalidPoint(String),
    #[error("shared point is the point at infinity")]
    PointAtInfinity,
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("recovered secret does not match direct computation")]
    RecoveryMismatch,
    #[error("sender shared secret was rejected by the verifier")]
    SenderMismatch,
    #[error("key set is inconsistent: the shares do not sum to the public key")]
    SplitMismatch,
    #[error("unknown curve {0:?}; expected one of p256, secp256k1")]
    UnknownCurve(String),
    #[error("configured for {configured} but running over {actual}")]
    CurveMismatch {
        configured: CurveKind,
        actual: &'static str,
    },
}

impl From<PrimitivesError> for ProtocolError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::EntropyFailure(msg) => ProtocolError::EntropyFailure(msg),
            PrimitivesError::InvalidPoint(msg) => ProtocolError::InvalidPoint(msg),
            PrimitivesError::PointAtInfinity => ProtocolError::PointAtInfinity,
            PrimitivesError::MalformedEncoding(msg) => ProtocolError::MalformedEncoding(msg),
            e @ PrimitivesError::InvalidScalarLength { .. } => {
                ProtocolError::MalformedEncoding(e.to_string())
            }
            e @ PrimitivesError::UnsupportedCurve(_) => {
                ProtocolError::MalformedEncoding(e.to_string())
            }
        }
    }
}
