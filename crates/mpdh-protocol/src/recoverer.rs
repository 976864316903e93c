//! Recipient side of an exchange: additive recovery from two shares.

use std::marker::PhantomData;

use mpdh_primitives::ec::{DhCurve, Point, Scalar, SharedSecret};
use mpdh_primitives::elliptic_curve::AffinePoint;

use crate::share::{Contribution, SharePair};
use crate::{ProtocolConfig, ProtocolError};

/// Recovers a shared secret from the two share holders' contributions.
pub struct SecretRecoverer<C: DhCurve> {
    _curve: PhantomData<C>,
}

impl<C: DhCurve> SecretRecoverer<C> {
    /// Create a recoverer for secrets over `C`.
    ///
    /// # Arguments
    /// * `config` - protocol settings; `config.curve` must name `C`
    ///
    /// # Returns
    /// The recoverer, or `CurveMismatch` if the config names another curve.
    pub fn new(config: ProtocolConfig) -> Result<Self, ProtocolError> {
        config.ensure_curve::<C>()?;
        Ok(SecretRecoverer {
            _curve: PhantomData,
        })
    }

    /// Create a recoverer with the default settings for `C`.
    pub fn for_curve() -> Result<Self, ProtocolError> {
        Self::new(ProtocolConfig::for_curve::<C>()?)
    }

    /// Recover the shared secret for ephemeral key `E` from shares `a1` and `a2`.
    ///
    /// Computes `a1·E` and `a2·E` separately, adds them, and checks the sum
    /// against `(a1 + a2 mod N)·E`. The shares may be passed in either order.
    ///
    /// # Returns
    /// The x-coordinate of the recovered point, `RecoveryMismatch` if the
    /// check fails, or `PointAtInfinity` if the shares sum to zero.
    pub fn recover(
        &self,
        ephemeral: &Point<C>,
        a1: &Scalar<C>,
        a2: &Scalar<C>,
    ) -> Result<SharedSecret<C>, ProtocolError> {
        let c1 = Contribution::compute(a1, ephemeral);
        let c2 = Contribution::compute(a2, ephemeral);
        self.combine_verified(ephemeral, a1, a2, &c1, &c2)
    }

    /// [`recover`](Self::recover) for a labeled share pair.
    pub fn recover_pair(
        &self,
        ephemeral: &Point<C>,
        shares: &SharePair<C>,
    ) -> Result<SharedSecret<C>, ProtocolError> {
        let c1 = shares.alice().contribute(ephemeral);
        let c2 = shares.chuck().contribute(ephemeral);
        self.combine_verified(
            ephemeral,
            shares.alice().scalar(),
            shares.chuck().scalar(),
            &c1,
            &c2,
        )
    }

    /// Add two contributions and check the sum against direct multiplication.
    ///
    /// The contributions may have been computed elsewhere, one by each holder.
    /// This is the only place both meet.
    pub fn combine_verified(
        &self,
        ephemeral: &Point<C>,
        a1: &Scalar<C>,
        a2: &Scalar<C>,
        c1: &Contribution<C>,
        c2: &Contribution<C>,
    ) -> Result<SharedSecret<C>, ProtocolError> {
        let recovered = *c1.as_projective() + *c2.as_projective();

        let sum = a1 + a2;
        let check = ephemeral.scale(&sum);

        let recovered_affine: AffinePoint<C> = recovered.into();
        let check_affine: AffinePoint<C> = check.into();
        if recovered_affine != check_affine {
            tracing::error!(
                curve = C::NAME,
                ephemeral = ?ephemeral,
                "recovered secret does not match direct computation"
            );
            return Err(ProtocolError::RecoveryMismatch);
        }

        let point = Point::from_projective(recovered)?;
        tracing::debug!(curve = C::NAME, "recovered secret matches direct computation");
        Ok(SharedSecret::from_point(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EphemeralExchanger, Holder, KeyShare, KeySplitter};
    use mpdh_primitives::ec::NistP256;
    use rand::rngs::OsRng;

    fn scalar(hex: &str) -> Scalar<NistP256> {
        Scalar::from_hex(hex).unwrap()
    }

    #[test]
    fn test_recover_is_order_independent() {
        let key_set = KeySplitter::<NistP256>::for_curve()
            .unwrap()
            .split(&mut OsRng)
            .unwrap();
        let exchange = EphemeralExchanger::<NistP256>::for_curve()
            .unwrap()
            .send(key_set.public_key(), &mut OsRng)
            .unwrap();
        let recoverer = SecretRecoverer::<NistP256>::for_curve().unwrap();
        let a1 = key_set.alice().scalar();
        let a2 = key_set.chuck().scalar();

        let forward = recoverer.recover(exchange.ephemeral_public(), a1, a2).unwrap();
        let backward = recoverer.recover(exchange.ephemeral_public(), a2, a1).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(&forward, exchange.shared_secret());
    }

    #[test]
    fn test_corrupted_contribution_is_a_mismatch() {
        let recoverer = SecretRecoverer::<NistP256>::for_curve().unwrap();
        let e = Point::mul_base(&scalar("0d")).unwrap();
        let a1 = scalar("05");
        let a2 = scalar("07");

        let c1 = Contribution::compute(&a1, &e);
        // Chuck reports a contribution for the wrong share.
        let c2 = KeyShare::new(Holder::Chuck, scalar("08")).contribute(&e);

        let result = recoverer.combine_verified(&e, &a1, &a2, &c1, &c2);
        assert!(matches!(result, Err(ProtocolError::RecoveryMismatch)));
    }

    #[test]
    fn test_shares_summing_to_zero_are_rejected() {
        let recoverer = SecretRecoverer::<NistP256>::for_curve().unwrap();
        let e = Point::mul_base(&scalar("0d")).unwrap();
        let a1 = scalar("01");
        // N - 1
        let a2 = scalar("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632550");

        let result = recoverer.recover(&e, &a1, &a2);
        assert!(matches!(result, Err(ProtocolError::PointAtInfinity)));
    }

    #[test]
    fn test_zero_share_still_recovers() {
        let recoverer = SecretRecoverer::<NistP256>::for_curve().unwrap();
        let e = Point::mul_base(&scalar("0d")).unwrap();
        let zero = Scalar::<NistP256>::zero();
        let a2 = scalar("2a");

        let recovered = recoverer.recover(&e, &zero, &a2).unwrap();
        assert_eq!(recovered, SharedSecret::from_point(&e.mul(&a2).unwrap()));
    }
}
