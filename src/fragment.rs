//! Incremental construction of HTML fragments.
//!
//! Content enters a [`Fragment`] through one of two doors: [`Fragment::text`]
//! escapes markup characters, while [`Fragment::trusted`] inserts the string
//! verbatim. Each call site picks one explicitly.
//!
//! The renderer runs in trusted-content mode. Its input comes from a
//! controlled generation service and already carries the markup it wants
//! shown, so record fields and rewritten text are inserted with
//! [`Fragment::trusted`]. This is not a sanitizer: untrusted input must be
//! escaped by the caller before it reaches [`crate::render`].

use std::borrow::Cow;

/// An HTML fragment under construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragment {
    buf: String,
}

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `<tag class="class">`.
    ///
    /// Tag and class names are crate constants and are written unescaped.
    pub fn open(&mut self, tag: &str, class: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(" class=\"");
        self.buf.push_str(class);
        self.buf.push_str("\">");
        self
    }

    /// Close `</tag>`.
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Append `text` with markup characters escaped.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_html(text));
        self
    }

    /// Append `markup` verbatim.
    pub fn trusted(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Escape the five HTML-significant characters in `text`.
///
/// Returns the input unchanged, without allocating, when nothing needs
/// escaping.
///
/// # Examples
///
/// ```
/// use mdfragment::escape_html;
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
