//! Detect command implementation.

use crate::utils::format_kind;
use comptype_core::{Format, detect_format};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON serializable detection result.
#[derive(Debug, Serialize)]
struct DetectJson {
    file: String,
    format: Format,
    extension: &'static str,
    kind: &'static str,
}

impl DetectJson {
    fn new(file: &Path, format: Format) -> Self {
        Self {
            file: file.display().to_string(),
            format,
            extension: format.extension(),
            kind: format_kind(format),
        }
    }
}

pub fn cmd_detect(files: &[PathBuf], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<DetectJson> = files
        .iter()
        .map(|file| DetectJson::new(file, detect_format(file)))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("File: {}", result.file);
        println!("Format: {}", result.format);
        if !result.extension.is_empty() {
            println!("Extension: .{}", result.extension);
        }
        println!("Type: {}", result.kind);
    }

    Ok(())
}
