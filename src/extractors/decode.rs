// src/extractors/decode.rs
use crate::utils::error::ExtractError;
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

// Browsers only look this far into the document for a charset declaration.
const META_SNIFF_LIMIT: usize = 1024;

// Matches both `<meta charset="..">` and the http-equiv `content="text/html; charset=.."` form.
static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#)
        .expect("Failed to compile META_CHARSET_RE")
});

/// Decodes a raw HTML body into text.
///
/// Precedence: byte order mark, then the transport charset (Content-Type
/// header), then a `<meta>` declaration near the top, then UTF-8.
/// Fails only when the bytes are not valid in the chosen encoding.
pub fn decode_document<'a>(
    body: &'a [u8],
    header_charset: Option<&str>,
) -> Result<Cow<'a, str>, ExtractError> {
    let (encoding, content) = match Encoding::for_bom(body) {
        Some((encoding, bom_len)) => (encoding, &body[bom_len..]),
        None => {
            let encoding = header_charset
                .and_then(|label| lookup(label, "Content-Type header"))
                .or_else(|| sniff_meta_charset(body))
                .unwrap_or(UTF_8);
            (encoding, body)
        }
    };

    tracing::debug!("Decoding {} byte document as {}", content.len(), encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(content)
        .ok_or_else(|| {
            ExtractError::Parse(format!("document is not valid {}", encoding.name()))
        })
}

fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let label = META_CHARSET_RE.captures(head)?.get(1)?.as_bytes();
    lookup(&String::from_utf8_lossy(label), "<meta> tag")
}

fn lookup(label: &str, source: &str) -> Option<&'static Encoding> {
    let encoding = Encoding::for_label(label.trim().as_bytes());
    if encoding.is_none() {
        tracing::warn!("Ignoring unknown charset {:?} from {}", label, source);
    }
    encoding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_the_default() {
        let text = decode_document("<p>Côte d'Ivoire</p>".as_bytes(), None).unwrap();
        assert_eq!(text, "<p>Côte d'Ivoire</p>");
    }

    #[test]
    fn meta_charset_selects_windows_1252() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>Cura\xe7ao</body></html>";
        let text = decode_document(body, None).unwrap();
        assert!(text.contains("Curaçao"), "decoded: {}", text);
    }

    #[test]
    fn http_equiv_meta_is_recognised() {
        let body = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\"><td>S\xe3o Tom\xe9</td>";
        let text = decode_document(body, None).unwrap();
        assert!(text.contains("São Tomé"), "decoded: {}", text);
    }

    #[test]
    fn header_charset_wins_over_meta() {
        let body = b"<meta charset=\"utf-8\"><td>Cura\xe7ao</td>";
        let text = decode_document(body, Some("iso-8859-1")).unwrap();
        assert!(text.contains("Curaçao"), "decoded: {}", text);
    }

    #[test]
    fn bom_wins_over_everything() {
        let body = b"\xef\xbb\xbf<td>\xc3\xa9</td>";
        let text = decode_document(body, Some("windows-1252")).unwrap();
        assert_eq!(text, "<td>é</td>");
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let text = decode_document(b"<meta charset=\"klingon\"><td>ok</td>", Some("bogus")).unwrap();
        assert_eq!(text, "<meta charset=\"klingon\"><td>ok</td>");
    }

    #[test]
    fn invalid_bytes_for_the_chosen_encoding_fail() {
        let err = decode_document(&[0x3c, 0xff, 0xfe, 0x3e], None).unwrap_err();
        match err {
            ExtractError::Parse(msg) => assert!(msg.contains("UTF-8"), "message: {}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
