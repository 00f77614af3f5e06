//! Server-rendered HTML for the stock list.
//!
//! Views are plain functions from state to markup. They never touch the
//! store lock; handlers pass in borrowed data.

pub mod editor;
pub mod layout;
pub mod list;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
