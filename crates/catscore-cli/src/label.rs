//! Reading label input from disk and the command line.

use std::path::Path;

use anyhow::Context;
use catscore_extract::ExtractedLabel;

/// Read and parse a label document.
pub(crate) fn load_label(path: &Path) -> anyhow::Result<ExtractedLabel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading label document {}", path.display()))?;
    ExtractedLabel::from_json_str(&content)
        .with_context(|| format!("parsing label document {}", path.display()))
}

/// `@path` reads the file; anything else is taken literally.
pub(crate) fn read_text_arg(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
        None => Ok(arg.to_owned()),
    }
}

/// Explicit override, then the document's own name, then the file stem.
pub(crate) fn resolve_name(
    explicit: Option<&str>,
    from_label: Option<&str>,
    path: &Path,
) -> String {
    explicit
        .or(from_label)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Unnamed label".to_owned())
}
