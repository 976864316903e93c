//! Minimal-length hex text for big-endian integers.
//!
//! Leading zero bytes are dropped before encoding, so zero encodes as the
//! empty string. There is no separator, prefix or trailing newline.

use crate::PrimitivesError;

/// Return the slice with its leading zero bytes removed.
pub fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Encode a big-endian integer as minimal-length lowercase hex.
pub fn encode_minimal_hex(bytes: &[u8]) -> String {
    hex::encode(strip_leading_zeros(bytes))
}

/// Decode hex text into big-endian bytes.
///
/// Surrounding ASCII whitespace is ignored; anything else that is not a
/// pair of hex digits is rejected.
pub fn decode_minimal_hex(text: &str) -> Result<Vec<u8>, PrimitivesError> {
    let bytes = hex::decode(text.trim_matches(|c: char| c.is_ascii_whitespace()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_strips_leading_zeros() {
        assert_eq!(encode_minimal_hex(&[0x00, 0x00, 0x0a, 0xff]), "0aff");
        assert_eq!(encode_minimal_hex(&[0x12, 0x00]), "1200");
        assert_eq!(encode_minimal_hex(&[0x00; 32]), "");
        assert_eq!(encode_minimal_hex(&[]), "");
    }

    #[test]
    fn test_decode_accepts_trailing_newline() {
        assert_eq!(decode_minimal_hex("0aff\n").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(decode_minimal_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert!(matches!(
            decode_minimal_hex("abc"),
            Err(PrimitivesError::MalformedEncoding(_))
        ));
        assert!(decode_minimal_hex("zz").is_err());
        assert!(decode_minimal_hex("0a ff").is_err());
    }
}
