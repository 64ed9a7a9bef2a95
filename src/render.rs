//! Top-level rendering entry point.

use tracing::{debug, warn};

use crate::{
    record::{RecordFields, is_record},
    transform::transform,
};

/// Render generated text as an HTML fragment.
///
/// Input containing the `<email>` marker is laid out as a record; if no
/// record fields can be found the input is returned untouched. Anything else
/// goes through the free-form rewrite chain. Empty input renders as an empty
/// string.
///
/// The output is trusted markup and is never escaped; see
/// [`crate::fragment`].
///
/// # Examples
///
/// ```
/// use mdfragment::render;
/// assert_eq!(render("Hello world"), "<div class=\"mb-4\">Hello world</div>");
/// assert_eq!(render(""), "");
/// ```
#[must_use]
pub fn render(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if is_record(raw) {
        return match RecordFields::extract(raw) {
            Ok(fields) => {
                debug!("rendering record template");
                fields.to_html()
            }
            Err(err) => {
                warn!(%err, "leaving record input unrendered");
                raw.to_owned()
            }
        };
    }

    debug!("rendering free-form text");
    transform(raw)
}
