//! Convert command implementation.

use crate::utils::create_spinner;
use comptype_core::convert_detailed;
use std::path::Path;

pub fn cmd_convert(
    file: &Path,
    format: &str,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner(format!("Converting {}", file.display()), progress);
    let result = convert_detailed(file, format);
    pb.finish_and_clear();

    let conversion = result?;
    println!(
        "{} ({}) -> {} ({})",
        file.display(),
        conversion.source_format,
        conversion.destination.display(),
        conversion.target_format
    );

    Ok(())
}
