//! JSON string escaping shared by every string-bearing kind.
//!
//! Quotes, backslashes, and U+0000 through U+001F are escaped; everything else passes
//! through as UTF-8. Short escapes are used where JSON defines them, `\u00xx` otherwise.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Appends `s` to `out` with JSON escaping applied. Does not add surrounding quotes.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::escape::escape_json_into;
///
/// let mut out = String::new();
/// escape_json_into(&mut out, "a\"b\\c\n\u{1}");
/// assert_eq!(out, r#"a\"b\\c\n\u0001"#);
/// ```
pub fn escape_json_into(out: &mut String, s: &str) {
    out.reserve(s.len());
    // Copy clean runs in bulk; only ASCII bytes ever need escaping.
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b >= 0x20 && b != b'"' && b != b'\\' {
            continue;
        }
        out.push_str(&s[start..i]);
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x08 => out.push_str("\\b"),
            0x0C => out.push_str("\\f"),
            _ => {
                out.push_str("\\u00");
                out.push(HEX_DIGITS[(b >> 4) as usize] as char);
                out.push(HEX_DIGITS[(b & 0xF) as usize] as char);
            }
        }
        start = i + 1;
    }
    out.push_str(&s[start..]);
}

/// Returns an escaped copy of `s`.
#[must_use]
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_json_into(&mut out, s);
    out
}
