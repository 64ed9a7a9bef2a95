//! The ordered rewrite rules of the free-form dialect.
//!
//! Rules run in table order and each one sees the output of the rules before
//! it, so a later pattern may match markup an earlier replacement produced.
//! The centring rules only fire once per input and only for text that
//! contains a `Subject:` line; every other rule rewrites all matches.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// Opening tags of the block built from a triple-backtick fence.
pub(crate) const CODE_BLOCK_OPEN: &str =
    "<pre class=\"bg-gray-50 p-4 rounded-lg my-4 overflow-x-auto\"><code>";
pub(crate) const CODE_BLOCK_CLOSE: &str = "</code></pre>";

/// Attribute prefix shared by every centred block.
pub(crate) const CENTER_MARKER: &str = "class=\"text-center";

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(CODE_BLOCK_OPEN),
        regex::escape(CODE_BLOCK_CLOSE)
    ))
    .expect("valid code block regex")
});

/// How many matches a rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    First,
    All,
}

/// Which parts of the text a rule may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Anywhere,
    /// Skip blocks already built from fenced code.
    OutsideCode,
}

/// One pattern-based rewrite step.
#[derive(Debug)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    scope: Scope,
    replacement: &'static str,
    guard: Option<&'static str>,
    region: Region,
}

impl RewriteRule {
    /// # Panics
    /// Panics if `pattern` is not a valid regular expression.
    fn new(name: &'static str, pattern: &str, scope: Scope, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid rewrite rule regex"),
            scope,
            replacement,
            guard: None,
            region: Region::Anywhere,
        }
    }

    /// Only apply when the text contains `literal`.
    fn guarded(mut self, literal: &'static str) -> Self {
        self.guard = Some(literal);
        self
    }

    fn outside_code(mut self) -> Self {
        self.region = Region::OutsideCode;
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Rewrite `text`, borrowing it back when the rule does not fire.
    #[must_use]
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if let Some(guard) = self.guard
            && !text.contains(guard)
        {
            return Cow::Borrowed(text);
        }
        match self.region {
            Region::Anywhere => self.replace(text),
            Region::OutsideCode => self.replace_outside_code(text),
        }
    }

    fn replace<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.scope {
            Scope::First => self.pattern.replace(text, self.replacement),
            Scope::All => self.pattern.replace_all(text, self.replacement),
        }
    }

    fn replace_outside_code<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !CODE_BLOCK_RE.is_match(text) {
            return self.replace(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut fired = false;
        let mut last = 0;
        for block in CODE_BLOCK_RE.find_iter(text) {
            self.push_prose(&text[last..block.start()], &mut fired, &mut out);
            out.push_str(block.as_str());
            last = block.end();
        }
        self.push_prose(&text[last..], &mut fired, &mut out);
        Cow::Owned(out)
    }

    fn push_prose(&self, prose: &str, fired: &mut bool, out: &mut String) {
        if *fired && self.scope == Scope::First {
            out.push_str(prose);
            return;
        }
        if self.pattern.is_match(prose) {
            *fired = true;
        }
        out.push_str(&self.replace(prose));
    }
}

/// The rewrite chain, in application order.
pub static RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new(
            "emphasis",
            r"\[\*(.*?)\*\]",
            Scope::All,
            r#"<span class="font-medium text-gray-900">${1}</span>"#,
        ),
        RewriteRule::new(
            "heading",
            r"\*\*(.*?)\*\*",
            Scope::All,
            r#"<span class="font-bold text-gray-900 block mt-4 mb-2 text-lg">${1}</span>"#,
        ),
        // Each line stands alone; consecutive bullets are not grouped.
        RewriteRule::new(
            "bullet",
            r"(?m)^[ \t]*\*(.*)",
            Scope::All,
            r#"<span class="block ml-4 my-2">• ${1}</span>"#,
        ),
        RewriteRule::new(
            "generated-banner",
            r"(Generated Content)",
            Scope::First,
            r#"<div class="text-center mb-4">${1}</div>"#,
        )
        .guarded("Subject:"),
        RewriteRule::new(
            "subject-line",
            r"(Subject:.*?)(\n|$)",
            Scope::First,
            r#"<div class="text-center font-medium text-gray-900 mb-4">${1}</div>"#,
        )
        .guarded("Subject:"),
        RewriteRule::new(
            "salutation",
            r"(Dear.*?)(\n|$)",
            Scope::First,
            r#"<div class="text-center mb-4">${1}</div>"#,
        )
        .guarded("Subject:"),
        RewriteRule::new(
            "pleasantry",
            r"(I hope this email finds you well\.)",
            Scope::First,
            r#"<div class="text-center mb-4">${1}</div>"#,
        )
        .guarded("Subject:"),
        RewriteRule::new(
            "code-block",
            r"(?s)```(.*?)```",
            Scope::All,
            r#"<pre class="bg-gray-50 p-4 rounded-lg my-4 overflow-x-auto"><code>${1}</code></pre>"#,
        ),
        RewriteRule::new(
            "inline-code",
            r"`([^`]+)`",
            Scope::All,
            r#"<code class="bg-gray-100 px-1 py-0.5 rounded text-sm">${1}</code>"#,
        )
        .outside_code(),
        RewriteRule::new(
            "link",
            r"\[(.*?)\]\((.*?)\)",
            Scope::All,
            r#"<a href="${2}" class="text-blue-600 hover:text-blue-800 underline" target="_blank" rel="noopener noreferrer">${1}</a>"#,
        )
        .outside_code(),
    ]
});

/// Look up a rule by name.
#[must_use]
pub fn rule(name: &str) -> Option<&'static RewriteRule> {
    RULES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, text: &str) -> String {
        rule(name).expect("rule exists").apply(text).into_owned()
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = RULES.iter().map(RewriteRule::name).collect();
        assert_eq!(
            names,
            [
                "emphasis",
                "heading",
                "bullet",
                "generated-banner",
                "subject-line",
                "salutation",
                "pleasantry",
                "code-block",
                "inline-code",
                "link",
            ]
        );
    }

    #[test]
    fn code_block_rule_produces_skipped_markup() {
        let out = apply("code-block", "```x```");
        assert!(CODE_BLOCK_RE.is_match(&out));
        assert_eq!(out, format!("{CODE_BLOCK_OPEN}x{CODE_BLOCK_CLOSE}"));
    }

    #[test]
    fn centring_rules_use_marker() {
        for name in ["generated-banner", "subject-line", "salutation", "pleasantry"] {
            let r = rule(name).expect("rule exists");
            assert_eq!(r.scope(), Scope::First);
            assert!(r.replacement.contains(CENTER_MARKER), "{name}");
        }
    }

    #[test]
    fn guard_blocks_rule() {
        let text = "Dear Sam,\nhello";
        assert!(matches!(
            rule("salutation").expect("rule exists").apply(text),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn emphasis_is_global() {
        assert_eq!(
            apply("emphasis", "[*a*] and [*b*]"),
            "<span class=\"font-medium text-gray-900\">a</span> and \
             <span class=\"font-medium text-gray-900\">b</span>"
        );
    }

    #[test]
    fn bullet_keeps_line_breaks() {
        assert_eq!(
            apply("bullet", "intro\n\n  *one\n*two"),
            "intro\n\n<span class=\"block ml-4 my-2\">• one</span>\n\
             <span class=\"block ml-4 my-2\">• two</span>"
        );
    }

    #[test]
    fn subject_line_consumes_newline() {
        assert_eq!(
            apply("subject-line", "Subject: Hi\nBody\nSubject: again"),
            "<div class=\"text-center font-medium text-gray-900 mb-4\">Subject: Hi</div>Body\n\
             Subject: again"
        );
    }

    #[test]
    fn inline_code_skips_code_blocks() {
        let text = format!("`a` {CODE_BLOCK_OPEN}`b`{CODE_BLOCK_CLOSE} `c`");
        let out = apply("inline-code", &text);
        assert_eq!(
            out,
            format!(
                "<code class=\"bg-gray-100 px-1 py-0.5 rounded text-sm\">a</code> \
                 {CODE_BLOCK_OPEN}`b`{CODE_BLOCK_CLOSE} \
                 <code class=\"bg-gray-100 px-1 py-0.5 rounded text-sm\">c</code>"
            )
        );
    }

    #[test]
    fn link_opens_new_context() {
        assert_eq!(
            apply("link", "see [docs](https://example.com)"),
            "see <a href=\"https://example.com\" class=\"text-blue-600 hover:text-blue-800 \
             underline\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        );
    }

    #[test]
    fn unknown_rule_is_none() {
        assert!(rule("table").is_none());
    }
}
