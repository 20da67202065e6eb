//! Legacy encoding transcoding
//!
//! Aozora Bunko archives carry their text payload in Shift-JIS. This module
//! isolates the byte-to-text transform so an alternative legacy encoding can
//! be substituted without touching extraction control flow.

use crate::{BunkoError, Result};
use encoding_rs::SHIFT_JIS;

/// Decodes Shift-JIS bytes into a UTF-8 string.
///
/// Fails with [`BunkoError::Decode`] on any malformed byte sequence; no
/// partially decoded text is returned.
pub fn decode_shift_jis(bytes: &[u8]) -> Result<String> {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(BunkoError::Decode(
            "malformed Shift-JIS byte sequence".to_string(),
        ));
    }
    Ok(text.into_owned())
}

/// Encodes a UTF-8 string into Shift-JIS bytes.
///
/// Used by tests to build archive fixtures; unmappable characters fail with
/// [`BunkoError::Decode`].
pub fn encode_shift_jis(text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
    if had_errors {
        return Err(BunkoError::Decode(
            "text contains characters unmappable to Shift-JIS".to_string(),
        ));
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii() {
        let decoded = decode_shift_jis(b"hello").unwrap();
        assert_eq!(decoded, "hello");
    }

    #[test]
    fn test_decode_japanese() {
        // "日本" in Shift-JIS
        let bytes = [0x93, 0xfa, 0x96, 0x7b];
        let decoded = decode_shift_jis(&bytes).unwrap();
        assert_eq!(decoded, "日本");
    }

    #[test]
    fn test_roundtrip() {
        let original = "吾輩は猫である。名前はまだ無い。";
        let bytes = encode_shift_jis(original).unwrap();
        let decoded = decode_shift_jis(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_malformed_sequence_fails() {
        // 0x81 starts a double-byte sequence; 0x20 is not a valid trail byte
        let result = decode_shift_jis(&[0x81, 0x20, 0x81]);
        assert!(matches!(result, Err(BunkoError::Decode(_))));
    }
}
