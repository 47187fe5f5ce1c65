//! Slash-separated paths into a package
//!
//! A path is a run of segments joined by `/`. A segment written `[n]` selects
//! item `n` of an array. Any other segment is a child name, with `\`, `/` and
//! `[` escaped by a backslash. A bare decimal segment is also accepted as an
//! item index when the node has no child of that name.

use std::borrow::Cow;
use std::fmt;

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Child by name (unescaped)
    Name(Cow<'a, str>),
    /// Item by position
    Index(usize),
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Name(name) => f.write_str(&escape_name(name)),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Escape a child name for use as a path segment
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if !name.contains(['\\', '/', '[']) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if matches!(c, '\\' | '/' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Split a path into segments. Returns `None` if the path ends in a lone
/// backslash.
pub fn parse_path(path: &str) -> Option<Vec<PathSegment<'_>>> {
    let mut segments = Vec::new();
    for raw in split_unescaped(path) {
        segments.push(parse_segment(raw)?);
    }
    Some(segments)
}

/// Split on every `/` not preceded by an escaping backslash
fn split_unescaped(path: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(path);
    std::iter::from_fn(move || {
        let text = rest?;
        let mut escaped = false;
        for (i, c) in text.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '/' => {
                    rest = Some(&text[i + 1..]);
                    return Some(&text[..i]);
                }
                _ => {}
            }
        }
        rest = None;
        Some(text)
    })
}

fn parse_segment(raw: &str) -> Option<PathSegment<'_>> {
    if let Some(digits) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits.parse().ok().map(PathSegment::Index);
        }
    }
    if !raw.contains('\\') {
        return Some(PathSegment::Name(Cow::Borrowed(raw)));
    }
    let mut name = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.push(chars.next()?),
            _ => name.push(c),
        }
    }
    Some(PathSegment::Name(Cow::Owned(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PathSegment<'_> {
        PathSegment::Name(Cow::Borrowed(s))
    }

    #[test]
    fn test_plain_path() {
        assert_eq!(
            parse_path("model/layers/[0]").unwrap(),
            [name("model"), name("layers"), PathSegment::Index(0)]
        );
        assert_eq!(parse_path("tags/1").unwrap(), [name("tags"), name("1")]);
    }

    #[test]
    fn test_escaped_names() {
        assert_eq!(parse_path(r"a\/b").unwrap(), [name("a/b")]);
        assert_eq!(parse_path(r"x\\/y").unwrap(), [name(r"x\"), name("y")]);
        assert_eq!(parse_path(r"\[0]").unwrap(), [name("[0]")]);
    }

    #[test]
    fn test_malformed_index_is_a_name() {
        assert_eq!(parse_path("[]").unwrap(), [name("[]")]);
        assert_eq!(parse_path("[+1]").unwrap(), [name("[+1]")]);
        assert_eq!(parse_path("[1").unwrap(), [name("[1")]);
    }

    #[test]
    fn test_dangling_escape() {
        assert_eq!(parse_path(r"a\"), None);
    }

    #[test]
    fn test_display_inverts_parse() {
        for raw in ["plain", "a/b", r"back\slash", "[0]", "0", "a[1]/"] {
            let segment = PathSegment::Name(Cow::Borrowed(raw));
            let text = segment.to_string();
            assert_eq!(parse_path(&text).unwrap(), [segment]);
        }
        assert_eq!(PathSegment::Index(12).to_string(), "[12]");
    }
}
