//! Format detection.
//!
//! Detection shells out to `file(1)` and classifies the description it
//! prints. The tool answers `<path>: <description>`; only the leading words of
//! the description matter.

use crate::command::run_command;
use crate::format::Format;
use std::path::Path;
use tracing::debug;

/// Command template for the signature sniffing tool.
pub const SNIFF_CMD: &str = "file";

/// Description prefixes and the format each one identifies, checked in order.
const SIGNATURES: [(&str, Format); 4] = [
    ("XZ", Format::Xz),
    ("gzip", Format::Gzip),
    ("bzip2", Format::Bzip2),
    ("Zip", Format::Zip),
];

/// Detect the format of the file at `path`.
///
/// Returns [`Format::Undefined`] when the sniffing tool cannot be run or
/// exits nonzero.
pub fn detect_format(path: impl AsRef<Path>) -> Format {
    let path = path.as_ref();
    let out = run_command(path, SNIFF_CMD);
    if !out.success {
        debug!(path = %path.display(), output = %out.output.trim(), "detection failed");
        return Format::Undefined;
    }

    let format = classify_output(path, &out.output);
    debug!(path = %path.display(), %format, "detected");
    format
}

/// Classify a full `<path>: <description>` line printed for `path`.
pub fn classify_output(path: &Path, output: &str) -> Format {
    classify_description(description(path, output))
}

/// Classify a description with the path prefix already removed.
pub fn classify_description(description: &str) -> Format {
    let description = description.trim_start();
    SIGNATURES
        .iter()
        .find(|(prefix, _)| description.starts_with(prefix))
        .map(|&(_, format)| format)
        .unwrap_or(Format::Plain)
}

/// Strip the `<path>:` prefix from the tool output.
///
/// The exact path is preferred so names containing a colon are handled; any
/// other output is split on its first colon.
fn description<'a>(path: &Path, output: &'a str) -> &'a str {
    let path = path.to_string_lossy();
    if let Some(rest) = output
        .strip_prefix(&*path)
        .and_then(|rest| rest.strip_prefix(':'))
    {
        return rest;
    }

    match output.split_once(':') {
        Some((_, rest)) => rest,
        None => output,
    }
}
