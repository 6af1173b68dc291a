//! Format conversion.
//!
//! A conversion is `detect -> decompress (unless plain) -> compress`. Each
//! step runs one external tool and blocks until it exits.
//!
//! The tools work on files in place, so two conversions of the same path must
//! not run at the same time. Callers are responsible for serializing them;
//! conversions of distinct paths share nothing.
//!
//! There is no rollback. If compression fails after a successful
//! decompression, the decompressed file stays on disk and the error is
//! returned as is.

use crate::command::{CommandOutput, run_command, run_command_with};
use crate::detect::detect_format;
use crate::error::{ComptypeError, Result};
use crate::format::Format;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a successful [`convert_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Format the source was detected as.
    pub source_format: Format,
    /// Format that was requested.
    pub target_format: Format,
    /// Path of the converted file.
    pub destination: PathBuf,
}

/// Convert `source` to the format named `target`.
///
/// `target` goes through [`Format::from_name`], so unknown names mean plain.
/// Returns the path of the converted file.
pub fn convert(source: impl AsRef<Path>, target: &str) -> Result<PathBuf> {
    convert_detailed(source, target).map(|c| c.destination)
}

/// Like [`convert`], but also reports the detected source format.
pub fn convert_detailed(source: impl AsRef<Path>, target: &str) -> Result<Conversion> {
    let source = source.as_ref();
    let target_format = Format::from_name(target);
    let source_format = detect_format(source);

    info!(
        source = %source.display(),
        from = %source_format,
        to = %target_format,
        "converting"
    );

    let destination = if source_format.is_compressed() {
        let plain = decompress(source, source_format)?;
        compress(&plain, target_format).inspect_err(|_| {
            warn!(
                file = %plain.display(),
                "compression failed, decompressed file left in place"
            );
        })?
    } else {
        if source_format == Format::Undefined {
            warn!(
                source = %source.display(),
                "format detection failed, treating file as plain"
            );
        }
        compress(source, target_format)?
    };

    Ok(Conversion {
        source_format,
        target_format,
        destination,
    })
}

/// Compress the plain file `source` into `format`.
///
/// The destination is `source` with the format's extension appended. For a
/// plain target nothing runs and `source` is returned unchanged.
pub fn compress(source: &Path, format: Format) -> Result<PathBuf> {
    if !format.is_compressed() {
        return Ok(source.to_path_buf());
    }

    let destination = compressed_path(source, format)?;
    let out = if format.is_archive() {
        run_command_with(source, format.compress_cmd(), &[destination.as_os_str()])
    } else {
        run_command(source, format.compress_cmd())
    };
    if !out.success {
        return Err(ComptypeError::command_failed(out.output));
    }

    // Single-file compressors replace their input; the archiver does not.
    if format.is_archive() {
        fs::remove_file(source)?;
    }

    info!(destination = %destination.display(), "compressed");
    Ok(destination)
}

/// Decompress `source`, known to be in `format`, next to itself.
///
/// Returns the path of the plain file. Archives must hold exactly one member,
/// which may be named differently from the archive.
pub fn decompress(source: &Path, format: Format) -> Result<PathBuf> {
    if !format.is_compressed() {
        return Ok(source.to_path_buf());
    }

    let mut destination = decompressed_path(source)?;
    let mut extra: Vec<OsString> = Vec::new();

    if format.is_archive() {
        let member = single_member(source, format)?;
        let dir = containing_dir(source);
        destination = if dir.as_os_str().is_empty() {
            PathBuf::from(&member)
        } else {
            dir.join(&member)
        };
        extra.push(output_dir_arg(dir));
    }

    let extra: Vec<&OsStr> = extra.iter().map(OsString::as_os_str).collect();
    let out = run_command_with(source, format.decompress_cmd(), &extra);
    if !out.success {
        return Err(ComptypeError::command_failed(out.output));
    }

    if format.is_archive() {
        fs::remove_file(source)?;
    }

    info!(destination = %destination.display(), "decompressed");
    Ok(destination)
}

/// List the members of `archive` and return the only one.
///
/// An archive the listing tool reports as empty counts as zero members.
pub fn single_member(archive: &Path, format: Format) -> Result<String> {
    let Some(list_cmd) = format.list_cmd() else {
        return Err(ComptypeError::unsupported_member_count(archive, 0));
    };

    let out = run_command(archive, list_cmd);
    let members = listed_members(&out, format.empty_listing_marker())
        .ok_or_else(|| ComptypeError::command_failed(out.output.clone()))?;

    match members.as_slice() {
        [member] => {
            check_member_name(member)?;
            Ok((*member).to_string())
        }
        _ => Err(ComptypeError::unsupported_member_count(
            archive,
            members.len(),
        )),
    }
}

/// Member names from a listing, or `None` when the listing itself failed.
fn listed_members<'a>(
    out: &'a CommandOutput,
    empty_marker: Option<&str>,
) -> Option<Vec<&'a str>> {
    if out.success {
        return Some(parse_member_list(&out.output));
    }

    let reports_empty = empty_marker.is_some_and(|marker| {
        out.output
            .lines()
            .any(|line| line.trim().starts_with(marker))
    });
    reports_empty.then(Vec::new)
}

/// One member name per non-blank line.
fn parse_member_list(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Reject member names that would extract outside the archive's directory.
fn check_member_name(member: &str) -> Result<()> {
    let escapes = Path::new(member).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ComptypeError::path_traversal(member));
    }
    Ok(())
}

/// `source` with `.<extension>` appended to its file name.
fn compressed_path(source: &Path, format: Format) -> Result<PathBuf> {
    file_name(source)?;
    let mut path = source.as_os_str().to_os_string();
    path.push(".");
    path.push(format.extension());
    Ok(PathBuf::from(path))
}

/// `source` with its final extension dropped.
///
/// Assumes the last dot-segment of the name is the compression extension,
/// which holds for names the tools produce but is not guaranteed.
fn decompressed_path(source: &Path) -> Result<PathBuf> {
    file_name(source)?;
    Ok(source.with_extension(""))
}

fn file_name(path: &Path) -> Result<&OsStr> {
    path.file_name()
        .ok_or_else(|| ComptypeError::invalid_path(path.to_string_lossy()))
}

fn containing_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// The directory argument handed to the archive extractor.
fn output_dir_arg(dir: &Path) -> OsString {
    if dir.as_os_str().is_empty() {
        OsString::from(".")
    } else {
        dir.as_os_str().to_os_string()
    }
}
