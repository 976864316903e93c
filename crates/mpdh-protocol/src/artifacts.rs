//! Encoding and decoding of the artifacts passed between protocol steps.
//!
//! Point decoding is role aware: a bad recipient key is `InvalidPublicKey`,
//! a bad ephemeral key is `InvalidPoint`.

use mpdh_primitives::ec::{DhCurve, Point, SharedSecret};
use mpdh_primitives::PrimitivesError;

use crate::share::{Holder, KeyShare};
use crate::ProtocolError;

/// Decode a recipient public key from PEM.
pub fn decode_public_key<C: DhCurve>(pem: &str) -> Result<Point<C>, ProtocolError> {
    Point::from_pem(pem).map_err(|e| match e {
        PrimitivesError::InvalidPoint(msg) => ProtocolError::InvalidPublicKey(msg),
        PrimitivesError::PointAtInfinity => {
            ProtocolError::InvalidPublicKey("point at infinity".to_string())
        }
        other => other.into(),
    })
}

/// Decode an ephemeral public key from PEM.
pub fn decode_ephemeral_key<C: DhCurve>(pem: &str) -> Result<Point<C>, ProtocolError> {
    Point::from_pem(pem).map_err(|e| match e {
        PrimitivesError::PointAtInfinity => {
            ProtocolError::InvalidPoint("point at infinity".to_string())
        }
        other => other.into(),
    })
}

/// Encode a public or ephemeral public key as PEM.
pub fn encode_point<C: DhCurve>(point: &Point<C>) -> Result<String, ProtocolError> {
    Ok(point.to_pem()?)
}

/// Decode a key share from minimal-length hex.
pub fn decode_share<C: DhCurve>(holder: Holder, text: &str) -> Result<KeyShare<C>, ProtocolError> {
    KeyShare::from_hex(holder, text)
}

/// Encode a key share as minimal-length hex.
pub fn encode_share<C: DhCurve>(share: &KeyShare<C>) -> String {
    share.to_hex()
}

/// Encode a shared secret as minimal-length hex.
pub fn encode_secret<C: DhCurve>(secret: &SharedSecret<C>) -> String {
    secret.to_hex()
}
