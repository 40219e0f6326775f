//! Décodage des documents CAP selon l'encodage déclaré

use std::borrow::Cow;

use encoding_rs::Encoding;
use memchr::memmem;
use tracing::warn;

use crate::CapError;

/// Taille maximale inspectée pour trouver le prologue XML
const PROLOG_LIMIT: usize = 256;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Détermine l'encodage du document (BOM, puis attribut `encoding` du prologue)
pub fn detect(data: &[u8]) -> Result<&'static Encoding, CapError> {
    if let Some((encoding, _)) = Encoding::for_bom(data) {
        return Ok(encoding);
    }

    let head = &data[..data.len().min(PROLOG_LIMIT)];
    if !head.starts_with(b"<?xml") {
        return Ok(encoding_rs::UTF_8);
    }

    // Le prologue se termine par "?>"
    let Some(end) = memmem::find(head, b"?>") else {
        return Ok(encoding_rs::UTF_8);
    };
    let prolog = &head[..end];

    let Some(pos) = memmem::find(prolog, b"encoding") else {
        return Ok(encoding_rs::UTF_8);
    };
    let rest = &prolog[pos + 8..];

    let Some(quote_pos) = rest.iter().position(|&b| b == b'"' || b == b'\'') else {
        return Ok(encoding_rs::UTF_8);
    };
    let quote = rest[quote_pos];
    let label_start = quote_pos + 1;
    let Some(label_len) = rest[label_start..].iter().position(|&b| b == quote) else {
        return Ok(encoding_rs::UTF_8);
    };
    let label = &rest[label_start..label_start + label_len];

    Encoding::for_label(label)
        .ok_or_else(|| CapError::UnsupportedEncoding(String::from_utf8_lossy(label).into_owned()))
}

/// Décode le document en texte UTF-8
///
/// Les documents UTF-8 valides sont empruntés sans copie. Les séquences invalides
/// sont remplacées (U+FFFD) avec un warning plutôt que de faire échouer la conversion.
pub fn decode(data: &[u8]) -> Result<Cow<'_, str>, CapError> {
    let encoding = detect(data)?;

    if encoding == encoding_rs::UTF_8 {
        let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        if let Ok(text) = simdutf8::basic::from_utf8(body) {
            return Ok(Cow::Borrowed(text));
        }
        warn!("Invalid UTF-8 in alert document, decoding lossily");
    }

    let (decoded, actual, had_errors) = encoding.decode(data);
    if had_errors {
        warn!(
            encoding = actual.name(),
            "Malformed byte sequences replaced while decoding alert"
        );
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_default_utf8() {
        assert_eq!(detect(b"<alert/>").unwrap(), encoding_rs::UTF_8);
        assert_eq!(
            detect(b"<?xml version=\"1.0\"?><alert/>").unwrap(),
            encoding_rs::UTF_8
        );
    }

    #[test]
    fn test_detect_declared_encoding() {
        let data = b"<?xml version='1.0' encoding='ISO-8859-1'?><alert/>";
        // encoding_rs mappe ISO-8859-1 sur windows-1252 (WHATWG)
        assert_eq!(detect(data).unwrap(), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_detect_unknown_encoding() {
        let data = b"<?xml version=\"1.0\" encoding=\"EBCDIC-FANTASY\"?><alert/>";
        match detect(data) {
            Err(CapError::UnsupportedEncoding(label)) => assert_eq!(label, "EBCDIC-FANTASY"),
            other => panic!("Expected UnsupportedEncoding, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_borrows_valid_utf8() {
        let data = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a>é</a>".as_bytes();
        let text = decode(data).unwrap();
        assert!(matches!(text, Cow::Borrowed(_)));
        assert!(text.contains('é'));
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"<a/>");
        assert_eq!(decode(&data).unwrap(), "<a/>");
    }

    #[test]
    fn test_decode_latin1() {
        let data = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a>M\xe9t\xe9o</a>";
        let text = decode(data).unwrap();
        assert!(text.contains("Météo"));
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let data = b"<a>\xff</a>";
        let text = decode(data).unwrap();
        assert!(text.contains('\u{FFFD}'));
    }
}
