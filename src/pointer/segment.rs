//! Path segment grammar: escape decoding, the forced object-key marker,
//! and array-segment classification.

use memchr::memchr;

use crate::error::Error;
use crate::Result;

/// `~2` at both ends of a segment forces object-key interpretation.
const FORCE_MARKER_LEN: usize = 2;
const FORCE_BOUNDARY_LEN: usize = 4;

/// Decodes `~1` to `/` and `~0` to `~`, appending into `out`.
///
/// Everything else passes through unchanged, the force markers included —
/// they are recognized on the decoded text.
pub(crate) fn unescape_into(raw: &str, out: &mut String) {
    out.clear();
    let bytes = raw.as_bytes();
    let mut start = 0;

    while let Some(offset) = memchr(b'~', &bytes[start..]) {
        let tilde = start + offset;
        out.push_str(&raw[start..tilde]);
        match bytes.get(tilde + 1) {
            Some(b'1') => {
                out.push('/');
                start = tilde + 2;
            }
            Some(b'0') => {
                out.push('~');
                start = tilde + 2;
            }
            _ => {
                out.push('~');
                start = tilde + 1;
            }
        }
    }

    out.push_str(&raw[start..]);
}

/// Escapes a literal key into segment form (`/` to `~1`, `~` to `~0`).
pub fn escape(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '/' => out.push_str("~1"),
            '~' => out.push_str("~0"),
            other => out.push(other),
        }
    }
    out
}

/// A segment bounded by `~2` markers (and longer than the markers alone)
/// is used as a literal object key even when it looks like an array index.
pub(crate) fn is_forced_key(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() > FORCE_BOUNDARY_LEN && bytes.starts_with(b"~2") && bytes.ends_with(b"~2")
}

/// Strips the force markers when present; other segments pass through.
pub(crate) fn strip_forced(segment: &str) -> &str {
    if is_forced_key(segment) {
        &segment[FORCE_MARKER_LEN..segment.len() - FORCE_MARKER_LEN]
    } else {
        segment
    }
}

/// Digits-only segments and the append sentinel `-` address arrays; any
/// other content (a forced segment included) addresses an object key.
pub(crate) fn is_array_segment(segment: &str) -> bool {
    !segment.is_empty() && (segment == "-" || segment.bytes().all(|b| b.is_ascii_digit()))
}

/// Parses an array index segment. A leading `0` is only valid for the
/// segment `"0"`; anything unparseable (non-digits, overflow, empty) is a
/// malformed path.
pub(crate) fn parse_index(segment: &str, path: &str) -> Result<usize> {
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(Error::malformed_path(format!(
            "json pointer '{path}': unexpected prefix '0' in array segment '{segment}'"
        )));
    }

    segment.parse::<usize>().map_err(|_| {
        Error::malformed_path(format!(
            "json pointer '{path}': segment '{segment}' is not a valid array index"
        ))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::ErrorKind;

    use super::{escape, is_array_segment, is_forced_key, parse_index, strip_forced, unescape_into};

    fn unescape(raw: &str) -> String {
        let mut out = String::new();
        unescape_into(raw, &mut out);
        out
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a~1b", "a/b")]
    #[case("a~0b", "a~b")]
    #[case("a~1b~0c", "a/b~c")]
    #[case("~1~0", "/~")]
    #[case("~2123~2", "~2123~2")]
    #[case("trailing~", "trailing~")]
    #[case("", "")]
    fn test_unescape(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw), expected);
    }

    #[rstest]
    fn test_escape_roundtrip() {
        let key = "a/b~c";
        assert_eq!(escape(key), "a~1b~0c");
        assert_eq!(unescape(&escape(key)), key);
    }

    #[rstest]
    #[case("~2123~2", true)]
    #[case("~2a~2", true)]
    #[case("~2~2", false)] // markers alone, no content
    #[case("~212", false)]
    #[case("12~2", false)]
    #[case("123", false)]
    #[case("", false)]
    fn test_is_forced_key(#[case] segment: &str, #[case] expected: bool) {
        assert_eq!(is_forced_key(segment), expected);
    }

    #[rstest]
    fn test_strip_forced() {
        assert_eq!(strip_forced("~2123~2"), "123");
        assert_eq!(strip_forced("plain"), "plain");
        assert_eq!(strip_forced("~2~2"), "~2~2");
    }

    #[rstest]
    #[case("0", true)]
    #[case("10", true)]
    #[case("-", true)]
    #[case("012", true)] // classifies as array, index parse rejects it later
    #[case("", false)]
    #[case("-1", false)]
    #[case("1a", false)]
    #[case("~2123~2", false)]
    fn test_is_array_segment(#[case] segment: &str, #[case] expected: bool) {
        assert_eq!(is_array_segment(segment), expected);
    }

    #[rstest]
    fn test_parse_index() {
        assert_eq!(parse_index("0", "/0").unwrap(), 0);
        assert_eq!(parse_index("17", "/17").unwrap(), 17);
        assert_eq!(
            parse_index("012", "/012").unwrap_err().kind,
            ErrorKind::MalformedPath
        );
        assert_eq!(
            parse_index("x", "/x").unwrap_err().kind,
            ErrorKind::MalformedPath
        );
        assert_eq!(
            parse_index("", "/").unwrap_err().kind,
            ErrorKind::MalformedPath
        );
    }
}
