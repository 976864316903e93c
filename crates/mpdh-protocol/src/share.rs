//! Key shares and the partial secrets computed from them.

use std::fmt;

use mpdh_primitives::ec::{DhCurve, Point, Scalar};
use mpdh_primitives::elliptic_curve::ProjectivePoint;

use crate::ProtocolError;

/// The party holding a key share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Holder {
    /// Holder of the first share (a1), the recipient.
    Alice,
    /// Holder of the second share (a2), the custodian.
    Chuck,
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Alice => f.write_str("Alice"),
            Holder::Chuck => f.write_str("Chuck"),
        }
    }
}

/// One additive share of a split private key, labeled with its holder.
pub struct KeyShare<C: DhCurve> {
    holder: Holder,
    scalar: Scalar<C>,
}

impl<C: DhCurve> KeyShare<C> {
    /// Label a scalar as one holder's share.
    ///
    /// # Arguments
    /// * `holder` - the party the share belongs to
    /// * `scalar` - the share value; zero is accepted
    pub fn new(holder: Holder, scalar: Scalar<C>) -> Self {
        KeyShare { holder, scalar }
    }

    /// Parse a share from minimal-length hex text.
    pub fn from_hex(holder: Holder, text: &str) -> Result<Self, ProtocolError> {
        Ok(KeyShare::new(holder, Scalar::from_hex(text)?))
    }

    /// The party holding this share.
    pub fn holder(&self) -> Holder {
        self.holder
    }

    /// The share value.
    pub fn scalar(&self) -> &Scalar<C> {
        &self.scalar
    }

    /// Minimal-length lowercase hex of the share.
    pub fn to_hex(&self) -> String {
        self.scalar.to_hex()
    }

    /// This holder's partial secret `share · E` for an ephemeral public key.
    pub fn contribute(&self, ephemeral: &Point<C>) -> Contribution<C> {
        Contribution::compute(&self.scalar, ephemeral)
    }
}

impl<C: DhCurve> Clone for KeyShare<C> {
    fn clone(&self) -> Self {
        KeyShare {
            holder: self.holder,
            scalar: self.scalar.clone(),
        }
    }
}

impl<C: DhCurve> fmt::Debug for KeyShare<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyShare")
            .field("holder", &self.holder)
            .field("scalar", &self.scalar)
            .finish()
    }
}

/// A share holder's partial secret `share · E`.
///
/// May be the identity when the share is zero; only the sum of both
/// contributions has to be a valid point.
pub struct Contribution<C: DhCurve> {
    point: ProjectivePoint<C>,
}

impl<C: DhCurve> Contribution<C> {
    /// Multiply an ephemeral public key by a share.
    pub fn compute(share: &Scalar<C>, ephemeral: &Point<C>) -> Self {
        Contribution {
            point: ephemeral.scale(share),
        }
    }

    /// The contribution in projective form, possibly the identity.
    pub fn as_projective(&self) -> &ProjectivePoint<C> {
        &self.point
    }
}

impl<C: DhCurve> Clone for Contribution<C> {
    fn clone(&self) -> Self {
        Contribution { point: self.point }
    }
}

impl<C: DhCurve> fmt::Debug for Contribution<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contribution<{}>({:?})", C::NAME, self.point)
    }
}

/// Both shares of one key, as needed by the recoverer.
pub struct SharePair<C: DhCurve> {
    alice: KeyShare<C>,
    chuck: KeyShare<C>,
}

impl<C: DhCurve> SharePair<C> {
    /// Pair two shares. The holders may be given in either order but must differ.
    pub fn new(first: KeyShare<C>, second: KeyShare<C>) -> Result<Self, ProtocolError> {
        match (first.holder, second.holder) {
            (Holder::Alice, Holder::Chuck) => Ok(SharePair {
                alice: first,
                chuck: second,
            }),
            (Holder::Chuck, Holder::Alice) => Ok(SharePair {
                alice: second,
                chuck: first,
            }),
            (holder, _) => Err(ProtocolError::MalformedEncoding(format!(
                "both shares are labeled {}",
                holder
            ))),
        }
    }

    /// Alice's share (a1).
    pub fn alice(&self) -> &KeyShare<C> {
        &self.alice
    }

    /// Chuck's share (a2).
    pub fn chuck(&self) -> &KeyShare<C> {
        &self.chuck
    }

    /// The combined private key `(a1 + a2) mod N`.
    pub fn combined(&self) -> Scalar<C> {
        self.alice.scalar() + self.chuck.scalar()
    }
}

impl<C: DhCurve> Clone for SharePair<C> {
    fn clone(&self) -> Self {
        SharePair {
            alice: self.alice.clone(),
            chuck: self.chuck.clone(),
        }
    }
}

impl<C: DhCurve> fmt::Debug for SharePair<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharePair")
            .field("alice", &self.alice)
            .field("chuck", &self.chuck)
            .finish()
    }
}
