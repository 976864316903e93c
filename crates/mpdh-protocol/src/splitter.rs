//! Key generation: two random shares and the public key of their sum.

use std::fmt;
use std::marker::PhantomData;

use rand::{CryptoRng, RngCore};

use mpdh_primitives::ec::{DhCurve, Point, Scalar};
use mpdh_primitives::PrimitivesError;

use crate::share::{Holder, KeyShare, SharePair};
use crate::{ProtocolConfig, ProtocolError};

/// The output of key generation: a public key and the two shares of its private key.
pub struct KeySet<C: DhCurve> {
    public_key: Point<C>,
    shares: SharePair<C>,
}

impl<C: DhCurve> KeySet<C> {
    /// Assemble a key set from stored parts and check that the shares sum to the key.
    pub fn from_parts(
        public_key: Point<C>,
        alice: KeyShare<C>,
        chuck: KeyShare<C>,
    ) -> Result<Self, ProtocolError> {
        let key_set = KeySet {
            public_key,
            shares: SharePair::new(alice, chuck)?,
        };
        key_set.verify()?;
        Ok(key_set)
    }

    /// The public key `(a1 + a2)·G`.
    pub fn public_key(&self) -> &Point<C> {
        &self.public_key
    }

    /// Alice's share (a1).
    pub fn alice(&self) -> &KeyShare<C> {
        self.shares.alice()
    }

    /// Chuck's share (a2).
    pub fn chuck(&self) -> &KeyShare<C> {
        self.shares.chuck()
    }

    /// Both shares, for recovery or sender verification.
    pub fn shares(&self) -> &SharePair<C> {
        &self.shares
    }

    /// Check the split-sum invariant `(a1 + a2 mod N) · G == public key`.
    pub fn verify(&self) -> Result<(), ProtocolError> {
        let sum = self.shares.combined();
        match Point::mul_base(&sum) {
            Ok(expected) if expected == self.public_key => Ok(()),
            _ => Err(ProtocolError::SplitMismatch),
        }
    }
}

impl<C: DhCurve> fmt::Debug for KeySet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySet")
            .field("public_key", &self.public_key)
            .field("shares", &self.shares)
            .finish()
    }
}

/// Generates split private keys.
pub struct KeySplitter<C: DhCurve> {
    config: ProtocolConfig,
    _curve: PhantomData<C>,
}

impl<C: DhCurve> KeySplitter<C> {
    /// Create a splitter for keys over `C`.
    ///
    /// # Arguments
    /// * `config` - protocol settings; `config.curve` must name `C`
    ///
    /// # Returns
    /// The splitter, or `CurveMismatch` if the config names another curve.
    pub fn new(config: ProtocolConfig) -> Result<Self, ProtocolError> {
        config.ensure_curve::<C>()?;
        Ok(KeySplitter {
            config,
            _curve: PhantomData,
        })
    }

    /// Create a splitter with the default settings for `C`.
    pub fn for_curve() -> Result<Self, ProtocolError> {
        Self::new(ProtocolConfig::for_curve::<C>()?)
    }

    /// Draw two independent shares and derive the public key of their sum.
    ///
    /// Alice holds `a1` and Chuck holds `a2`; neither share alone determines
    /// the private key `a1 + a2 mod N`.
    ///
    /// # Returns
    /// The key set, or `EntropyFailure` if the random source fails. There is
    /// no fallback source.
    pub fn split<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<KeySet<C>, ProtocolError> {
        tracing::debug!(curve = C::NAME, "generating split key");
        let attempts = self.config.sampling_attempts;
        let a1 = Scalar::<C>::random_bounded(rng, attempts)?;
        loop {
            let a2 = Scalar::<C>::random_bounded(rng, attempts)?;
            let sum = &a1 + &a2;
            match Point::mul_base(&sum) {
                Ok(public_key) => {
                    tracing::info!(
                        curve = C::NAME,
                        public_key = ?public_key,
                        "generated split key"
                    );
                    return Ok(KeySet {
                        public_key,
                        shares: SharePair::new(
                            KeyShare::new(Holder::Alice, a1),
                            KeyShare::new(Holder::Chuck, a2),
                        )?,
                    });
                }
                // a2 == -a1: the private key would be zero.
                Err(PrimitivesError::PointAtInfinity) => {
                    tracing::warn!(curve = C::NAME, "shares sum to zero, redrawing");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
