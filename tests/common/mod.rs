//! Utility helpers shared across integration tests.
#![allow(dead_code)]

use std::{fs, path::{Path, PathBuf}};

use assert_cmd::{Command, assert::Assert};
use rstest::fixture;

/// Class list of the paragraph block wrapping free-form segments.
pub const PARAGRAPH_OPEN: &str = "<div class=\"mb-4\">";

/// Wrap `inner` in a single paragraph block.
pub fn paragraph(inner: &str) -> String {
    format!("{PARAGRAPH_OPEN}{inner}</div>")
}

/// Build a command for the `mdfragment` binary.
pub fn cli() -> Command {
    Command::cargo_bin("mdfragment").expect("failed to create cargo command for mdfragment")
}

/// Run the binary with `args` and no standard input.
pub fn run_cli_with_args(args: &[&str]) -> Assert {
    cli().args(args).write_stdin("").assert()
}

/// Run the binary with `args`, feeding `input` on standard input.
pub fn run_cli_with_stdin(args: &[&str], input: &str) -> Assert {
    cli().args(args).write_stdin(input).assert()
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test file");
    path
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// A record populating every field.
#[fixture]
pub fn full_record() -> String {
    "<email>\n\
     <title>Generated Content</title>\n\
     <subject>Project kickoff</subject>\n\
     <greeting>Dear team,</greeting>\n\
     <opening>I hope this email finds you well.</opening>\n\
     <content>We start on Monday.\nBring laptops.</content>\n\
     <signature>Best regards,</signature>\n\
     <name>Ada Lovelace</name>\n\
     <position>Engineering Lead</position>\n\
     </email>"
        .to_string()
}

/// Free-form email text as produced by the generation service.
#[fixture]
pub fn free_form_email() -> String {
    "Generated Content\n\n\
     Subject: Project kickoff\n\
     Dear team,\n\
     I hope this email finds you well.\n\n\
     **Agenda**\n\
     * Planning\n\
     * Budget"
        .to_string()
}
