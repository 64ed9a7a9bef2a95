//! Render generated text into display-ready HTML fragments.
//!
//! Two input dialects are understood:
//!
//! - `<email>` records, whose eight named fields are laid out with a fixed
//!   template (see [`record`]);
//! - free-form lightweight markup, rewritten by an ordered chain of pattern
//!   rules (see [`rules`] and [`transform`]).
//!
//! [`render`] picks the dialect and never fails. Output is trusted markup:
//! nothing is escaped, so input must come from a controlled source.

pub mod fragment;
pub mod io;
pub mod record;
mod render;
pub mod rules;
pub mod transform;

pub use fragment::{Fragment, escape_html};
pub use io::{output_path, render_file, render_to_dir, trim_source};
pub use record::{ExtractError, Field, RECORD_MARKER, RecordFields, is_record};
pub use render::render;
pub use rules::{RULES, Region, RewriteRule, Scope, rule};
pub use transform::{transform, wrap_paragraphs};
