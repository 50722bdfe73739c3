//! Product title normalization
//!
//! Amazon titles carry marketing suffixes and variant descriptors after a
//! separator ("Echo Dot (4th Gen), Charcoal"). The ledger only needs the
//! leading product name.

use regex::Regex;
use std::sync::OnceLock;

fn separator_re() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9'& ]").expect("valid separator regex"))
}

/// Reduce a title to its first non-empty segment
///
/// Segments are delimited by any character other than ASCII letters,
/// digits, apostrophe, ampersand and space. Returns an empty string when
/// every segment is blank.
pub fn normalize(title: &str) -> String {
    separator_re()
        .split(title)
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}
