//! Two-party additive key-split Diffie-Hellman.
//!
//! A private key is split into two shares held by different parties (Alice
//! and Chuck) whose sum modulo the group order is the key. A sender runs an
//! ordinary ephemeral Diffie-Hellman exchange against the public key; the
//! shared secret is later recovered by adding each holder's contribution
//! `share · E`, without the full private key ever being stored.
//!
//! - [`KeySplitter`] generates the shares and the public key
//! - [`EphemeralExchanger`] runs the sender side of an exchange
//! - [`SecretRecoverer`] combines the contributions and checks them against
//!   direct multiplication by the combined scalar

mod error;
pub mod artifacts;
pub mod config;
pub mod exchanger;
pub mod recoverer;
pub mod share;
pub mod splitter;

pub use error::ProtocolError;
pub use config::{CurveKind, ProtocolConfig};
pub use exchanger::{EphemeralExchanger, Exchange, ExchangeVerifier};
pub use recoverer::SecretRecoverer;
pub use share::{Contribution, Holder, KeyShare, SharePair};
pub use splitter::{KeySet, KeySplitter};

pub use mpdh_primitives::ec::{DhCurve, NistP256, Point, Scalar, Secp256k1, SharedSecret};
