//! Formats command implementation.

use crate::utils::or_dash;
use comptype_core::{Format, find_program};
use serde::Serialize;

/// JSON serializable registry row.
#[derive(Debug, Serialize)]
struct FormatJson {
    format: Format,
    extension: &'static str,
    compress: &'static str,
    decompress: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    list: Option<&'static str>,
    tools_available: bool,
}

impl FormatJson {
    fn new(format: Format) -> Self {
        Self {
            format,
            extension: format.extension(),
            compress: format.compress_cmd(),
            decompress: format.decompress_cmd(),
            list: format.list_cmd(),
            tools_available: tools_available(format),
        }
    }
}

/// Whether every program named by the format's templates is on PATH.
fn tools_available(format: Format) -> bool {
    [format.compress_cmd(), format.decompress_cmd()]
        .into_iter()
        .chain(format.list_cmd())
        .filter_map(|template| template.split_whitespace().find(|t| !t.contains('=')))
        .all(|program| find_program(program).is_some())
}

pub fn cmd_formats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<FormatJson> = Format::ALL
        .into_iter()
        .filter(|f| *f != Format::Undefined)
        .map(FormatJson::new)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<6} {:<10} {:<10} {:<12} Tools",
        "Format", "Ext", "Compress", "Decompress", "List"
    );
    println!("{}", "-".repeat(56));
    for row in &rows {
        println!(
            "{:<8} {:<6} {:<10} {:<10} {:<12} {}",
            row.format.name(),
            or_dash(row.extension),
            or_dash(row.compress),
            or_dash(row.decompress),
            row.list.unwrap_or("-"),
            if row.tools_available { "ok" } else { "missing" }
        );
    }

    Ok(())
}
