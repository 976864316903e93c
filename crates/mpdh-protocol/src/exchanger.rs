//! Sender side of an exchange: a fresh ephemeral key per session.

use std::fmt;
use std::marker::PhantomData;

use rand::{CryptoRng, RngCore};

use mpdh_primitives::ec::{DhCurve, Point, Scalar, SharedSecret};

use crate::share::SharePair;
use crate::{ProtocolConfig, ProtocolError, SecretRecoverer};

/// A check run on the sender's result before it is released.
///
/// The sender cannot validate its own secret without the shares, so the
/// check is delegated to whoever can (a test harness, or a setup step that
/// still holds both shares).
pub trait ExchangeVerifier<C: DhCurve> {
    /// Accept or reject the sender's shared secret for an ephemeral public key.
    fn verify(&self, ephemeral: &Point<C>, secret: &SharedSecret<C>) -> Result<(), ProtocolError>;
}

/// Verifies a sender by recovering the secret from both shares.
impl<C: DhCurve> ExchangeVerifier<C> for SharePair<C> {
    fn verify(&self, ephemeral: &Point<C>, secret: &SharedSecret<C>) -> Result<(), ProtocolError> {
        let recovered = SecretRecoverer::<C>::for_curve()?.recover_pair(ephemeral, self)?;
        if recovered != *secret {
            return Err(ProtocolError::SenderMismatch);
        }
        Ok(())
    }
}

/// A one-session key pair. The secret half never leaves this module and is
/// zeroized when the pair is dropped.
struct EphemeralKeyPair<C: DhCurve> {
    secret: Scalar<C>,
    public: Point<C>,
}

impl<C: DhCurve> EphemeralKeyPair<C> {
    fn generate<R: RngCore + CryptoRng>(rng: &mut R, attempts: u32) -> Result<Self, ProtocolError> {
        let secret = Scalar::random_bounded(rng, attempts)?;
        let public = Point::mul_base(&secret)?;
        Ok(EphemeralKeyPair { secret, public })
    }
}

/// The sender's result: the ephemeral public key to transmit and the
/// shared secret to keep.
pub struct Exchange<C: DhCurve> {
    ephemeral_public: Point<C>,
    shared_secret: SharedSecret<C>,
}

impl<C: DhCurve> Exchange<C> {
    /// The ephemeral public key `b·G` to hand to the recipient.
    pub fn ephemeral_public(&self) -> &Point<C> {
        &self.ephemeral_public
    }

    /// The x-coordinate of `b·P`.
    pub fn shared_secret(&self) -> &SharedSecret<C> {
        &self.shared_secret
    }
}

impl<C: DhCurve> fmt::Debug for Exchange<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("ephemeral_public", &self.ephemeral_public)
            .field("shared_secret", &self.shared_secret)
            .finish()
    }
}

/// Runs the sender side of ephemeral-static Diffie-Hellman against a split key.
pub struct EphemeralExchanger<C: DhCurve> {
    config: ProtocolConfig,
    _curve: PhantomData<C>,
}

impl<C: DhCurve> EphemeralExchanger<C> {
    /// Create an exchanger for sending over `C`.
    ///
    /// # Arguments
    /// * `config` - protocol settings; `config.curve` must name `C`
    ///
    /// # Returns
    /// The exchanger, or `CurveMismatch` if the config names another curve.
    pub fn new(config: ProtocolConfig) -> Result<Self, ProtocolError> {
        config.ensure_curve::<C>()?;
        Ok(EphemeralExchanger {
            config,
            _curve: PhantomData,
        })
    }

    /// Create an exchanger with the default settings for `C`.
    pub fn for_curve() -> Result<Self, ProtocolError> {
        Self::new(ProtocolConfig::for_curve::<C>()?)
    }

    /// Generate an ephemeral pair `(b, bG)` and compute `S = b · public_key`.
    ///
    /// Each call draws a fresh `b`; nothing is cached between sessions.
    ///
    /// # Returns
    /// The ephemeral public key and the x-coordinate of `S`, `PointAtInfinity`
    /// if `S` is the identity, or `EntropyFailure` if the random source fails.
    pub fn send<R: RngCore + CryptoRng>(
        &self,
        public_key: &Point<C>,
        rng: &mut R,
    ) -> Result<Exchange<C>, ProtocolError> {
        let pair = EphemeralKeyPair::<C>::generate(rng, self.config.sampling_attempts)?;
        let shared = public_key.mul(&pair.secret)?;
        let EphemeralKeyPair { secret, public } = pair;
        drop(secret);

        tracing::debug!(curve = C::NAME, ephemeral = ?public, "computed sender shared point");
        Ok(Exchange {
            ephemeral_public: public,
            shared_secret: SharedSecret::from_point(&shared),
        })
    }

    /// Like [`send`](Self::send), but only release the result once `verifier`
    /// accepts it.
    ///
    /// # Returns
    /// `SenderMismatch` (or the verifier's own error) if the check fails.
    pub fn send_verified<R, V>(
        &self,
        public_key: &Point<C>,
        verifier: &V,
        rng: &mut R,
    ) -> Result<Exchange<C>, ProtocolError>
    where
        R: RngCore + CryptoRng,
        V: ExchangeVerifier<C> + ?Sized,
    {
        let exchange = self.send(public_key, rng)?;
        verifier.verify(&exchange.ephemeral_public, &exchange.shared_secret)?;
        tracing::info!(curve = C::NAME, "sender shared secret verified");
        Ok(exchange)
    }
}
