//! Scalars modulo the curve group order N.
//!
//! A `Scalar` is always fully reduced: random draws are rejection sampled
//! below N, and decoded bytes are reduced modulo N before they are stored.

use std::fmt;
use std::ops::Add;

use elliptic_curve::ff::{Field, PrimeField};
use elliptic_curve::ops::Reduce;
use elliptic_curve::subtle::ConstantTimeEq;
use elliptic_curve::FieldBytes;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::codec::{decode_minimal_hex, encode_minimal_hex, strip_leading_zeros};
use crate::ec::DhCurve;
use crate::PrimitivesError;

/// Number of rejection-sampling draws before a random source is declared exhausted.
pub const DEFAULT_SAMPLING_ATTEMPTS: u32 = 64;

/// An integer in `[0, N)` where N is the order of the curve group.
///
/// Used for private keys, key shares and ephemeral secrets. The value is
/// zeroized when dropped.
pub struct Scalar<C: DhCurve> {
    inner: C::Scalar,
}

impl<C: DhCurve> Scalar<C> {
    /// Draw a uniformly random nonzero scalar from a cryptographically secure source.
    ///
    /// # Returns
    /// `Ok(Scalar)` on success, or `EntropyFailure` if the source fails or
    /// does not produce a usable value within [`DEFAULT_SAMPLING_ATTEMPTS`] draws.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, PrimitivesError> {
        Self::random_bounded(rng, DEFAULT_SAMPLING_ATTEMPTS)
    }

    /// Draw a uniformly random nonzero scalar, giving up after `attempts` draws.
    ///
    /// Each draw fills a field-sized buffer and keeps it only if it is a
    /// canonical, nonzero encoding, which makes the accepted value uniform
    /// over `[1, N)`.
    pub fn random_bounded<R: RngCore + CryptoRng>(
        rng: &mut R,
        attempts: u32,
    ) -> Result<Self, PrimitivesError> {
        let mut repr = FieldBytes::<C>::default();
        for _ in 0..attempts {
            if let Err(e) = rng.try_fill_bytes(&mut repr) {
                repr.as_mut_slice().zeroize();
                return Err(PrimitivesError::EntropyFailure(e.to_string()));
            }
            let candidate: Option<C::Scalar> = C::Scalar::from_repr(repr.clone()).into();
            if let Some(inner) = candidate {
                if !bool::from(inner.is_zero()) {
                    repr.as_mut_slice().zeroize();
                    return Ok(Scalar { inner });
                }
            }
        }
        repr.as_mut_slice().zeroize();
        Err(PrimitivesError::EntropyFailure(format!(
            "no usable {} scalar after {} draws",
            C::NAME,
            attempts
        )))
    }

    /// Create a scalar from big-endian bytes, reducing modulo N.
    ///
    /// Shorter inputs are left-padded with zeros, so minimal-length encodings
    /// are accepted. An empty slice is zero.
    ///
    /// # Returns
    /// `Ok(Scalar)`, or `InvalidScalarLength` if the input is longer than a field element.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let mut repr = FieldBytes::<C>::default();
        if bytes.len() > repr.len() {
            return Err(PrimitivesError::InvalidScalarLength {
                max: repr.len(),
                got: bytes.len(),
            });
        }
        let offset = repr.len() - bytes.len();
        repr[offset..].copy_from_slice(bytes);
        let inner = <C::Scalar as Reduce<C::Uint>>::reduce_bytes(&repr);
        repr.as_mut_slice().zeroize();
        Ok(Scalar { inner })
    }

    /// Create a scalar from minimal-length hex text.
    pub fn from_hex(text: &str) -> Result<Self, PrimitivesError> {
        let mut bytes = decode_minimal_hex(text)?;
        let scalar = Self::from_be_bytes(&bytes);
        bytes.zeroize();
        scalar
    }

    /// The zero scalar.
    pub fn zero() -> Self {
        Scalar {
            inner: C::Scalar::ZERO,
        }
    }

    /// Serialize as big-endian bytes with leading zeros removed.
    pub fn to_be_bytes_minimal(&self) -> Vec<u8> {
        let mut repr = self.inner.to_repr();
        let out = strip_leading_zeros(&repr).to_vec();
        repr.as_mut_slice().zeroize();
        out
    }

    /// Serialize as minimal-length lowercase hex (zero is the empty string).
    pub fn to_hex(&self) -> String {
        let mut repr = self.inner.to_repr();
        let out = encode_minimal_hex(&repr);
        repr.as_mut_slice().zeroize();
        out
    }

    /// Whether this scalar is zero.
    pub fn is_zero(&self) -> bool {
        bool::from(self.inner.is_zero())
    }

    /// Access the underlying curve scalar for point arithmetic.
    pub(crate) fn as_inner(&self) -> &C::Scalar {
        &self.inner
    }
}

impl<C: DhCurve> Clone for Scalar<C> {
    fn clone(&self) -> Self {
        Scalar { inner: self.inner }
    }
}

/// Addition modulo N.
impl<C: DhCurve> Add<&Scalar<C>> for &Scalar<C> {
    type Output = Scalar<C>;

    fn add(self, rhs: &Scalar<C>) -> Scalar<C> {
        Scalar {
            inner: self.inner + rhs.inner,
        }
    }
}

impl<C: DhCurve> PartialEq for Scalar<C> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.inner.ct_eq(&other.inner))
    }
}

impl<C: DhCurve> Eq for Scalar<C> {}

impl<C: DhCurve> fmt::Debug for Scalar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar<{}>([REDACTED])", C::NAME)
    }
}

impl<C: DhCurve> Drop for Scalar<C> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::{NistP256, Secp256k1};
    use rand::rngs::OsRng;

    /// P-256 group order N.
    const P256_ORDER_HEX: &str =
        "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

    /// A source that only ever yields 0xff bytes, which is never below N.
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for SaturatedRng {}

    #[test]
    fn test_random_scalars_are_distinct_and_nonzero() {
        let a = Scalar::<NistP256>::random(&mut OsRng).unwrap();
        let b = Scalar::<NistP256>::random(&mut OsRng).unwrap();
        assert!(!a.is_zero());
        assert!(!b.is_zero());
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_gives_up_on_saturated_source() {
        let result = Scalar::<NistP256>::random_bounded(&mut SaturatedRng, 8);
        assert!(matches!(result, Err(PrimitivesError::EntropyFailure(_))));
    }

    #[test]
    fn test_hex_round_trip_is_minimal() {
        let s = Scalar::<Secp256k1>::from_hex("00000102").unwrap();
        assert_eq!(s.to_hex(), "0102");
        assert_eq!(s.to_be_bytes_minimal(), vec![0x01, 0x02]);
        assert_eq!(Scalar::<Secp256k1>::from_hex(&s.to_hex()).unwrap(), s);
    }

    #[test]
    fn test_zero_encodes_empty() {
        let zero = Scalar::<NistP256>::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.to_hex(), "");
        assert_eq!(Scalar::<NistP256>::from_hex("").unwrap(), zero);
    }

    #[test]
    fn test_values_at_or_above_order_are_reduced() {
        let n = Scalar::<NistP256>::from_hex(P256_ORDER_HEX).unwrap();
        assert!(n.is_zero());

        let n_plus_five = Scalar::<NistP256>::from_hex(
            "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632556",
        )
        .unwrap();
        assert_eq!(n_plus_five.to_hex(), "05");
    }

    #[test]
    fn test_rejects_oversized_input() {
        let result = Scalar::<NistP256>::from_be_bytes(&[0x01; 33]);
        assert!(matches!(
            result,
            Err(PrimitivesError::InvalidScalarLength { max: 32, got: 33 })
        ));
    }

    #[test]
    fn test_addition_wraps_modulo_order() {
        // (N - 1) + 2 = 1 mod N
        let n_minus_one = Scalar::<NistP256>::from_hex(
            "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632550",
        )
        .unwrap();
        let two = Scalar::<NistP256>::from_hex("02").unwrap();
        assert_eq!((&n_minus_one + &two).to_hex(), "01");
    }

    #[test]
    fn test_debug_is_redacted() {
        let s = Scalar::<NistP256>::from_hex("2a").unwrap();
        assert_eq!(format!("{:?}", s), "Scalar<P-256>([REDACTED])");
    }
}
