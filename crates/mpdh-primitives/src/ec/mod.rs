//! Elliptic curve arithmetic over a prime-order group.
//!
//! Provides the curve abstraction, scalars, points and shared secrets.

pub mod curve;
pub mod point;
pub mod scalar;
pub mod secret;

pub use curve::{DhCurve, NistP256, Secp256k1};
pub use point::Point;
pub use scalar::Scalar;
pub use secret::SharedSecret;
