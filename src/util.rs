//! Byte-level helpers for reading documentation pages.

use std::borrow::Cow;

use encoding_rs::Encoding;

/// How far into a page we look for an encoding declaration.
const SNIFF_LEN: usize = 1024;

/// Decode page bytes to a string.
///
/// 1. UTF-8 first (BOM handled by encoding_rs)
/// 2. The declared encoding, if UTF-8 decoding hit malformed sequences
/// 3. Windows-1252 as the last resort (superset of ISO-8859-1)
///
/// Returns the text and the encoding that produced it. Borrows when the
/// input is already valid UTF-8.
pub fn decode_text<'a>(
    bytes: &'a [u8],
    declared: Option<&str>,
) -> (Cow<'a, str>, &'static Encoding) {
    let (result, encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return (result, encoding);
    }

    if let Some(label) = declared
        && let Some(encoding) = Encoding::for_label(label.as_bytes())
    {
        let (result, encoding, _) = encoding.decode(bytes);
        return (result, encoding);
    }

    let (result, encoding, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    (result, encoding)
}

/// Find the encoding a page declares for itself.
///
/// Looks at the start of the page for an XML declaration
/// (`<?xml version="1.0" encoding="..."?>`) and then for an HTML
/// `charset=` parameter, as written by `<meta http-equiv="Content-Type">`.
pub fn sniff_declared_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];

    if let Some(xml_start) = find_ascii_ci(prefix, b"<?xml")
        && let Some(value) = value_after(&prefix[xml_start..], b"encoding=")
    {
        return Some(value);
    }

    value_after(prefix, b"charset=")
}

/// Value following `key`, either quoted or running up to the next delimiter.
fn value_after<'a>(haystack: &'a [u8], key: &[u8]) -> Option<&'a str> {
    let pos = find_ascii_ci(haystack, key)?;
    let rest = &haystack[pos + key.len()..];

    let (start, end) = match *rest.first()? {
        quote @ (b'"' | b'\'') => {
            let len = rest[1..].iter().position(|&b| b == quote)?;
            (1, 1 + len)
        }
        _ => {
            let len = rest
                .iter()
                .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b' ' | b'/'))
                .unwrap_or(rest.len());
            (0, len)
        }
    };

    if start == end {
        return None;
    }
    std::str::from_utf8(&rest[start..end]).ok()
}

fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
