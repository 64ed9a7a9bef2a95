//! Extraction and layout of `<email>` records.
//!
//! A record is a loose HTML-like document carrying up to eight named
//! fields, for example:
//!
//! ```text
//! <email>
//!   <subject>Quarterly update</subject>
//!   <greeting>Dear team,</greeting>
//!   <content>Numbers are up.</content>
//! </email>
//! ```
//!
//! The input is parsed with html5ever, which recovers from malformed markup
//! instead of failing. The first element named after each field supplies its
//! trimmed text; missing elements leave the field empty. Because the parser
//! never rejects input, extraction fails only when none of the eight field
//! elements exist at all.

use std::fmt;

use html5ever::driver::ParseOpts;
use html5ever::{parse_document, tendril::TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;

use crate::fragment::Fragment;

/// Literal whose presence switches the renderer to record mode.
pub const RECORD_MARKER: &str = "<email>";

const CONTAINER_CLASS: &str = "email-container max-w-2xl mx-auto";
const FOOTER_CLASS: &str = "mt-8";

/// Returns `true` when `raw` should be treated as a record.
#[must_use]
pub fn is_record(raw: &str) -> bool {
    raw.contains(RECORD_MARKER)
}

/// The named fields of a record, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Subject,
    Greeting,
    Opening,
    Content,
    Signature,
    Name,
    Position,
}

impl Field {
    /// Every field in the order the template lays them out.
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Subject,
        Field::Greeting,
        Field::Opening,
        Field::Content,
        Field::Signature,
        Field::Name,
        Field::Position,
    ];

    /// Element name carrying this field.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Subject => "subject",
            Field::Greeting => "greeting",
            Field::Opening => "opening",
            Field::Content => "content",
            Field::Signature => "signature",
            Field::Name => "name",
            Field::Position => "position",
        }
    }

    const fn class(self) -> &'static str {
        match self {
            Field::Title => "text-center mb-6 text-gray-600",
            Field::Subject => "text-center font-medium text-gray-900 mb-6",
            Field::Greeting => "text-center mb-4",
            Field::Opening => "text-center mb-6",
            // `whitespace-pre-line` keeps embedded line breaks visible.
            Field::Content => "mb-6 text-gray-700 whitespace-pre-line",
            Field::Signature => "mb-1",
            Field::Name => "font-medium",
            Field::Position => "text-gray-600",
        }
    }

    /// Signature, name and position share the trailing block.
    const fn in_footer(self) -> bool {
        matches!(self, Field::Signature | Field::Name | Field::Position)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("record marker present but no record fields were found")]
    NoFields,
}

/// Text of each record field, empty when the element was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub title: String,
    pub subject: String,
    pub greeting: String,
    pub opening: String,
    pub content: String,
    pub signature: String,
    pub name: String,
    pub position: String,
}

impl RecordFields {
    /// Parse `raw` leniently and collect the first element of each field.
    ///
    /// # Errors
    /// Returns [`ExtractError::NoFields`] when the parsed document contains
    /// none of the eight field elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdfragment::RecordFields;
    /// let fields = RecordFields::extract("<email><name> Ada </name></email>").unwrap();
    /// assert_eq!(fields.name, "Ada");
    /// assert!(fields.title.is_empty());
    /// ```
    pub fn extract(raw: &str) -> Result<Self, ExtractError> {
        let dom: RcDom =
            parse_document(RcDom::default(), ParseOpts::default()).one(raw.to_owned());

        let mut fields = Self::default();
        let mut found = false;
        for field in Field::ALL {
            if let Some(node) = find_first(&dom.document, field.tag()) {
                found = true;
                *fields.slot_mut(field) = node_text(&node);
            }
        }
        if found {
            Ok(fields)
        } else {
            Err(ExtractError::NoFields)
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Subject => &self.subject,
            Field::Greeting => &self.greeting,
            Field::Opening => &self.opening,
            Field::Content => &self.content,
            Field::Signature => &self.signature,
            Field::Name => &self.name,
            Field::Position => &self.position,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Subject => &mut self.subject,
            Field::Greeting => &mut self.greeting,
            Field::Opening => &mut self.opening,
            Field::Content => &mut self.content,
            Field::Signature => &mut self.signature,
            Field::Name => &mut self.name,
            Field::Position => &mut self.position,
        }
    }

    /// Returns `true` when every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Lay the record out with the fixed template.
    ///
    /// One block is emitted per non-empty field; empty fields produce no
    /// markup at all. Field text is inserted as trusted markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut frag = Fragment::new();
        frag.open("div", CONTAINER_CLASS).newline();
        for field in Field::ALL.into_iter().filter(|f| !f.in_footer()) {
            self.push_field(&mut frag, field);
        }
        let footer = || Field::ALL.into_iter().filter(|f| f.in_footer());
        if footer().any(|f| !self.get(f).is_empty()) {
            frag.open("div", FOOTER_CLASS).newline();
            for field in footer() {
                self.push_field(&mut frag, field);
            }
            frag.close("div").newline();
        }
        frag.close("div");
        frag.into_string()
    }

    fn push_field(&self, frag: &mut Fragment, field: Field) {
        let value = self.get(field);
        if value.is_empty() {
            return;
        }
        frag.open("div", field.class())
            .trusted(value)
            .close("div")
            .newline();
    }
}

/// Depth-first search for the first element named `tag`, in document order.
///
/// Walks an explicit stack so arbitrarily deep documents cannot exhaust the
/// call stack.
fn find_first(root: &Handle, tag: &str) -> Option<Handle> {
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Element { name, .. } = &node.data
            && name.local.as_ref() == tag
        {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

/// Concatenated descendant text of `handle`, trimmed at both ends.
///
/// Interior whitespace, including line breaks, is kept as written.
fn node_text(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } | NodeData::Document => {
                stack.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
    out.trim().to_string()
}
