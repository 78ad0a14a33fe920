//! Form and query-string parameter decoding.
//!
//! Publish bodies and poll query strings arrive as `application/x-www-form-urlencoded`
//! text. This module pulls individual values out of that text (`extract`, `lookup`)
//! and turns them into plain text (`decode`).
//!
//! Decoding is fail-soft: an escape that is cut short or is not valid hex is kept
//! as a literal `%` and the following characters pass through untouched.

/// Decodes a percent-/plus-encoded value.
///
/// `%XX` (hex, either case) becomes the byte `0xXX`, `+` becomes a space and every
/// other byte is copied as-is. Byte sequences that do not form valid UTF-8 after
/// decoding are replaced with U+FFFD.
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn hex_value(byte: Option<&u8>) -> Option<u8> {
    byte.and_then(|b| (*b as char).to_digit(16)).map(|d| d as u8)
}

/// Finds the raw (still encoded) value of the first `key=value` pair whose key
/// equals `key` exactly.
///
/// Returns `None` when no such pair exists, and `Some("")` for `key=`.
/// Pairs without an `=` are skipped.
pub fn lookup<'a>(data: &'a str, key: &str) -> Option<&'a str> {
    data.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Like [`lookup`], but an absent key yields empty text.
pub fn extract<'a>(data: &'a str, key: &str) -> &'a str {
    lookup(data, key).unwrap_or("")
}

/// Truncates `text` to at most `max_bytes` bytes without splitting a character.
pub fn bounded(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
