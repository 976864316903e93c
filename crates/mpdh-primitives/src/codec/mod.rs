//! Text codecs for the artifacts exchanged between protocol steps.
//!
//! - Scalars and secrets: big-endian, minimal-length, lowercase hex
//! - Points: PEM armored DER `SubjectPublicKeyInfo`

pub mod hex_text;
pub mod pem;

pub use hex_text::{decode_minimal_hex, encode_minimal_hex, strip_leading_zeros};
pub use pem::{point_from_pem, point_to_pem, PUBLIC_KEY_LABEL};
