//! Free-form dialect rendering.
//!
//! Applies [`RULES`] in order and then splits the result into paragraphs.

use std::borrow::Cow;

use crate::{
    fragment::Fragment,
    rules::{CENTER_MARKER, RULES},
};

const PARAGRAPH_CLASS: &str = "mb-4";

/// Rewrite free-form `raw` text into an HTML fragment.
///
/// # Examples
///
/// ```
/// use mdfragment::transform;
/// assert_eq!(
///     transform("Use `cargo`"),
///     "<div class=\"mb-4\">Use <code class=\"bg-gray-100 px-1 py-0.5 rounded text-sm\">cargo</code></div>"
/// );
/// ```
#[must_use]
pub fn transform(raw: &str) -> String {
    let mut text = raw.to_owned();
    for rule in RULES.iter() {
        let next = match rule.apply(&text) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(next) => next,
        };
        text = next;
    }
    wrap_paragraphs(&text)
}

/// Wrap each blank-line separated segment in a paragraph block.
///
/// Segments already holding a centred block are left bare. The segments are
/// joined without a separator.
#[must_use]
pub fn wrap_paragraphs(text: &str) -> String {
    let mut frag = Fragment::new();
    for segment in text.split("\n\n") {
        if segment.contains(CENTER_MARKER) {
            frag.trusted(segment);
        } else {
            frag.open("div", PARAGRAPH_CLASS)
                .trusted(segment)
                .close("div");
        }
    }
    frag.into_string()
}
