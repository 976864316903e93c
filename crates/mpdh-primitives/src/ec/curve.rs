//! Prime-order curves the protocol can run over.
//!
//! Arithmetic is generic through `elliptic_curve::CurveArithmetic`; the SEC1 and
//! SubjectPublicKeyInfo codecs live on the concrete curve crates, so each
//! supported curve bridges to them through [`DhCurve`].

use elliptic_curve::pkcs8::{AssociatedOid, EncodePublicKey};
use elliptic_curve::{AffinePoint, CurveArithmetic};

use crate::PrimitivesError;

pub use k256::Secp256k1;
pub use p256::NistP256;

/// A prime-order elliptic curve usable for split-key Diffie-Hellman.
pub trait DhCurve: CurveArithmetic + AssociatedOid + 'static {
    /// Human readable curve name, used in diagnostics.
    const NAME: &'static str;

    /// Serialize a point as a DER `SubjectPublicKeyInfo` holding the
    /// uncompressed SEC1 point and the curve's named-curve OID.
    ///
    /// # Returns
    /// The DER bytes, or `PointAtInfinity` for the identity.
    fn to_spki_der(point: &AffinePoint<Self>) -> Result<Vec<u8>, PrimitivesError>;

    /// Parse a SEC1 encoded point (compressed or uncompressed).
    ///
    /// # Returns
    /// The affine point, or `InvalidPoint` if the bytes do not describe a
    /// point on this curve.
    fn from_sec1_bytes(bytes: &[u8]) -> Result<AffinePoint<Self>, PrimitivesError>;
}

macro_rules! impl_dh_curve {
    ($curve:ty, $krate:ident, $name:expr) => {
        impl DhCurve for $curve {
            const NAME: &'static str = $name;

            fn to_spki_der(point: &AffinePoint<Self>) -> Result<Vec<u8>, PrimitivesError> {
                let key = $krate::PublicKey::from_affine(*point)
                    .map_err(|_| PrimitivesError::PointAtInfinity)?;
                let doc = key
                    .to_public_key_der()
                    .map_err(|e| PrimitivesError::MalformedEncoding(e.to_string()))?;
                Ok(doc.as_bytes().to_vec())
            }

            fn from_sec1_bytes(bytes: &[u8]) -> Result<AffinePoint<Self>, PrimitivesError> {
                let key = $krate::PublicKey::from_sec1_bytes(bytes).map_err(|_| {
                    PrimitivesError::InvalidPoint(format!("not a point on {}", $name))
                })?;
                Ok(*key.as_affine())
            }
        }
    };
}

impl_dh_curve!(NistP256, p256, "P-256");
impl_dh_curve!(Secp256k1, k256, "secp256k1");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_names_and_oids() {
        assert_eq!(NistP256::NAME, "P-256");
        assert_eq!(Secp256k1::NAME, "secp256k1");
        assert_eq!(NistP256::OID.to_string(), "1.2.840.10045.3.1.7");
        assert_eq!(Secp256k1::OID.to_string(), "1.3.132.0.10");
    }

    /// The SEC1 encoding of the identity is a single zero byte.
    #[test]
    fn test_from_sec1_rejects_identity_and_garbage() {
        assert!(NistP256::from_sec1_bytes(&[0x00]).is_err());
        assert!(NistP256::from_sec1_bytes(&[0x05]).is_err());
        assert!(Secp256k1::from_sec1_bytes(&[]).is_err());
    }

    #[test]
    fn test_to_spki_der_rejects_identity() {
        let identity = p256::AffinePoint::IDENTITY;
        assert!(matches!(
            NistP256::to_spki_der(&identity),
            Err(PrimitivesError::PointAtInfinity)
        ));
    }
}
