//! Encoding detection and transcoding using chardetng and `encoding_rs`.

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;
use std::borrow::Cow;

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Decode raw file bytes into text.
///
/// A UTF-8 BOM is dropped. UTF-16 input with a BOM and legacy encodings
/// detected by chardetng (Windows-125x, ISO-8859 variants, GBK, ...) are
/// transcoded. Returns (`text`, `was_transcoded`); valid UTF-8 is borrowed.
pub fn decode_text(data: &[u8]) -> (Cow<'_, str>, bool) {
    // UTF-16 LE BOM: FF FE, UTF-16 BE BOM: FE FF
    if data.starts_with(&[0xFF, 0xFE]) {
        let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
        return (Cow::Owned(decoded.into_owned()), true);
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
        return (Cow::Owned(decoded.into_owned()), true);
    }

    let data = skip_bom(data);
    if let Ok(text) = from_utf8(data) {
        return (Cow::Borrowed(text), false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    // Mostly UTF-8 with a few bad bytes.
    if encoding == encoding_rs::UTF_8 {
        return (String::from_utf8_lossy(data), false);
    }

    let (decoded, _, _) = encoding.decode(data);
    (Cow::Owned(decoded.into_owned()), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8(b"Hello, World!"));
        assert!(is_utf8("こんにちは".as_bytes()));
        assert!(is_utf8(b""));
        assert!(!is_utf8(&[0xFF, 0xFE]));
    }

    #[test]
    fn test_utf8_bom() {
        let with_bom = [0xEF, 0xBB, 0xBF, b'a', b'b', b'c'];
        let without_bom = b"abc";

        assert!(has_utf8_bom(&with_bom));
        assert!(!has_utf8_bom(without_bom));

        assert_eq!(skip_bom(&with_bom), b"abc");
        assert_eq!(skip_bom(without_bom), b"abc");
    }

    #[test]
    fn test_decode_utf8_is_borrowed() {
        let (text, transcoded) = decode_text(b"a,b\n1,2\n");
        assert!(!transcoded);
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let (text, transcoded) = decode_text(&[0xEF, 0xBB, 0xBF, b'i', b'd']);
        assert!(!transcoded);
        assert_eq!(text, "id");
    }

    #[test]
    fn test_decode_utf16_le() {
        let data: &[u8] = &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let (text, transcoded) = decode_text(data);
        assert!(transcoded);
        assert_eq!(text, "Hi");
    }

    #[test]
    fn test_decode_windows1251() {
        // Windows-1251 encoded "Привет"
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let (text, transcoded) = decode_text(data);
        assert!(transcoded);
        assert!(is_utf8(text.as_bytes()));
    }
}
