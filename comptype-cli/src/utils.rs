//! Utility functions for the CLI.

use comptype_core::Format;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins unless `verbose` is set, which forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("spinner template is valid")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Human readable kind of a format.
pub fn format_kind(format: Format) -> &'static str {
    if format.is_archive() {
        "Archive (single member)"
    } else if format.is_compression_only() {
        "Compression (single file)"
    } else if format == Format::Undefined {
        "Unknown (detection failed)"
    } else {
        "Uncompressed"
    }
}

/// Render an empty template as a dash.
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kind() {
        assert_eq!(format_kind(Format::Zip), "Archive (single member)");
        assert_eq!(format_kind(Format::Xz), "Compression (single file)");
        assert_eq!(format_kind(Format::Plain), "Uncompressed");
        assert_eq!(format_kind(Format::Undefined), "Unknown (detection failed)");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("gzip -f"), "gzip -f");
    }

    #[test]
    fn test_hidden_spinner() {
        let pb = create_spinner("working".to_string(), false);
        assert!(pb.is_hidden());
    }
}
