//! Cryptographic primitives for two-party split-key Diffie-Hellman.
//!
//! This crate provides the building blocks the protocol crate composes:
//! - Curve selection through the [`ec::DhCurve`] trait (P-256, secp256k1)
//! - Scalars reduced modulo the group order, zeroized on drop
//! - Validated, non-identity curve points and their arithmetic
//! - Shared secrets (x-coordinates) with constant-time comparison
//! - Minimal-length hex text and SubjectPublicKeyInfo PEM codecs

pub mod codec;
pub mod ec;

mod error;
pub use error::PrimitivesError;

pub use elliptic_curve;
