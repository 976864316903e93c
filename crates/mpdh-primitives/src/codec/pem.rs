//! PEM armored `SubjectPublicKeyInfo` for curve points.
//!
//! The DER structure carries `id-ecPublicKey` with the curve's named-curve
//! OID as its parameter and the uncompressed SEC1 point as the key bits.
//! Output uses 64-column base64 lines and `\n` line endings.

use elliptic_curve::pkcs8::der::pem::{self as rfc7468, LineEnding};
use elliptic_curve::pkcs8::der::{Decode, Document};
use elliptic_curve::pkcs8::SubjectPublicKeyInfoRef;
use elliptic_curve::ALGORITHM_OID;

use crate::ec::{DhCurve, Point};
use crate::PrimitivesError;

/// PEM type label for public keys.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Encode a point as a `-----BEGIN PUBLIC KEY-----` document.
pub fn point_to_pem<C: DhCurve>(point: &Point<C>) -> Result<String, PrimitivesError> {
    let der = C::to_spki_der(point.as_affine())?;
    rfc7468::encode_string(PUBLIC_KEY_LABEL, LineEnding::LF, &der)
        .map_err(|e| PrimitivesError::MalformedEncoding(e.to_string()))
}

/// Decode a `-----BEGIN PUBLIC KEY-----` document into a validated point.
///
/// # Returns
/// - `MalformedEncoding` if the PEM armor or DER structure is broken
/// - `UnsupportedCurve` if the key is for a different curve
/// - `InvalidPoint` if the key bits are not a point on the curve
/// - `PointAtInfinity` if the key bits encode the identity
pub fn point_from_pem<C: DhCurve>(text: &str) -> Result<Point<C>, PrimitivesError> {
    let (label, doc) = Document::from_pem(text.trim_start())
        .map_err(|e| PrimitivesError::MalformedEncoding(format!("PEM: {}", e)))?;
    if label != PUBLIC_KEY_LABEL {
        return Err(PrimitivesError::MalformedEncoding(format!(
            "unexpected PEM label {:?}",
            label
        )));
    }

    let spki = SubjectPublicKeyInfoRef::from_der(doc.as_bytes())
        .map_err(|e| PrimitivesError::MalformedEncoding(format!("SubjectPublicKeyInfo: {}", e)))?;
    if spki.algorithm.oid != ALGORITHM_OID {
        return Err(PrimitivesError::MalformedEncoding(format!(
            "not an EC public key (algorithm {})",
            spki.algorithm.oid
        )));
    }
    let curve_oid = spki
        .algorithm
        .parameters_oid()
        .map_err(|e| PrimitivesError::MalformedEncoding(format!("curve parameters: {}", e)))?;
    if curve_oid != C::OID {
        return Err(PrimitivesError::UnsupportedCurve(format!(
            "expected {} ({}), found {}",
            C::NAME,
            C::OID,
            curve_oid
        )));
    }

    let sec1 = spki.subject_public_key.as_bytes().ok_or_else(|| {
        PrimitivesError::MalformedEncoding("public key bit string is not octet aligned".to_string())
    })?;
    if sec1.len() == 1 && sec1[0] == 0x00 {
        return Err(PrimitivesError::PointAtInfinity);
    }
    let affine = C::from_sec1_bytes(sec1)?;
    Point::from_affine(affine)
}
