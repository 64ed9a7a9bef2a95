//! File helpers for rendering generated text.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::render::render;

/// Strip the trailing line breaks a text file normally ends with.
#[must_use]
pub fn trim_source(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

/// Read `path` and render its contents.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn render_file(path: &Path) -> std::io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(render(trim_source(&text)))
}

/// Render `path` into `out_dir/<stem>.html` and return the written path.
///
/// # Errors
/// Returns an error if reading the source or writing the fragment fails.
pub fn render_to_dir(path: &Path, out_dir: &Path) -> std::io::Result<PathBuf> {
    let html = render_file(path)?;
    let target = output_path(path, out_dir);
    fs::write(&target, html + "\n")?;
    Ok(target)
}

/// The fragment file `render_to_dir` writes for `path`.
///
/// Only the file stem is kept, so sources in different directories that
/// share a stem map to the same target.
#[must_use]
pub fn output_path(path: &Path, out_dir: &Path) -> PathBuf {
    let mut name = path
        .file_stem()
        .map_or_else(|| "fragment".into(), ToOwned::to_owned);
    name.push(".html");
    out_dir.join(name)
}
