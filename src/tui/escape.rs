//! Name escaping for the child listing.
//!
//! Listing text is interpreted as markup by some front ends, so `[` and
//! `\` are escaped, and control characters are shown in their Rust escape
//! form so a name can never break the frame layout. Store queries always
//! use the raw name.

use std::borrow::Cow;

fn needs_escape(c: char) -> bool {
    c == '\\' || c == '[' || c.is_control()
}

/// Escape a node name for display.
///
/// Names without special characters are returned borrowed.
///
/// # Example
/// ```
/// use h5tui::tui::escape_name;
///
/// assert_eq!(escape_name("a[1]"), "a\\[1]");
/// assert_eq!(escape_name("plain"), "plain");
/// ```
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if !name.chars().any(needs_escape) {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '[' => out.push_str("\\["),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
