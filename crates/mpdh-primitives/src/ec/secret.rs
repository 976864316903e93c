//! The Diffie-Hellman shared secret: the x-coordinate of the shared point.

use std::fmt;

use elliptic_curve::subtle::ConstantTimeEq;
use elliptic_curve::FieldBytes;
use zeroize::Zeroize;

use crate::codec::{encode_minimal_hex, strip_leading_zeros};
use crate::ec::{DhCurve, Point};

/// The affine x-coordinate of a shared point, as field-size big-endian bytes.
///
/// Compared in constant time and zeroized on drop.
pub struct SharedSecret<C: DhCurve> {
    x: FieldBytes<C>,
}

impl<C: DhCurve> SharedSecret<C> {
    /// Take the x-coordinate of a shared point.
    pub fn from_point(point: &Point<C>) -> Self {
        SharedSecret { x: point.x_bytes() }
    }

    /// The full-width big-endian x-coordinate.
    pub fn as_bytes(&self) -> &[u8] {
        &self.x
    }

    /// The x-coordinate with leading zero bytes removed.
    pub fn to_be_bytes_minimal(&self) -> Vec<u8> {
        strip_leading_zeros(&self.x).to_vec()
    }

    /// Minimal-length lowercase hex of the x-coordinate.
    pub fn to_hex(&self) -> String {
        encode_minimal_hex(&self.x)
    }
}

impl<C: DhCurve> Clone for SharedSecret<C> {
    fn clone(&self) -> Self {
        SharedSecret { x: self.x.clone() }
    }
}

impl<C: DhCurve> PartialEq for SharedSecret<C> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.x.as_slice().ct_eq(other.x.as_slice()))
    }
}

impl<C: DhCurve> Eq for SharedSecret<C> {}

impl<C: DhCurve> fmt::Debug for SharedSecret<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret<{}>([REDACTED])", C::NAME)
    }
}

impl<C: DhCurve> Drop for SharedSecret<C> {
    fn drop(&mut self) {
        self.x.as_mut_slice().zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::{NistP256, Scalar};

    #[test]
    fn test_secret_is_x_coordinate() {
        let k = Scalar::<NistP256>::from_hex("01").unwrap();
        let g = Point::<NistP256>::mul_base(&k).unwrap();
        let secret = SharedSecret::from_point(&g);
        assert_eq!(
            secret.to_hex(),
            "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
        );
        assert_eq!(secret.as_bytes().len(), 32);
        assert_eq!(secret.to_be_bytes_minimal(), secret.as_bytes().to_vec());
    }

    #[test]
    fn test_equality() {
        let a = Point::<NistP256>::mul_base(&Scalar::from_hex("05").unwrap()).unwrap();
        let b = Point::<NistP256>::mul_base(&Scalar::from_hex("06").unwrap()).unwrap();
        assert_eq!(SharedSecret::from_point(&a), SharedSecret::from_point(&a));
        assert_ne!(SharedSecret::from_point(&a), SharedSecret::from_point(&b));
    }
}
