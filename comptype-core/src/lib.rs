//! # comptype core
//!
//! Detects the compression format of a file and converts it between plain,
//! gzip, bzip2, xz and zip by driving the system's compression tools.
//!
//! - [`format`]: the format registry (extensions and tool invocations)
//! - [`command`]: running a command template against a file
//! - [`detect`]: classifying a file through `file(1)`
//! - [`convert`]: the detect, decompress, compress pipeline
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use comptype_core::{Format, convert, detect_format};
//!
//! assert_eq!(Format::from_name("bzip2"), Format::Bzip2);
//!
//! let format = detect_format("data.txt.gz");
//! println!("Format: {}", format);
//!
//! let converted = convert("data.txt.gz", "bzip2").unwrap();
//! println!("Converted to {}", converted.display());
//! ```
//!
//! Nothing is compressed in process; every step spawns an external tool and
//! blocks until it exits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod convert;
pub mod detect;
pub mod error;
pub mod format;

// Re-exports for convenience
pub use command::{CommandOutput, Invocation, find_program, run_command, run_command_with};
pub use convert::{Conversion, compress, convert, convert_detailed, decompress};
pub use detect::{classify_description, classify_output, detect_format};
pub use error::{ComptypeError, Result};
pub use format::Format;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convert::{convert, convert_detailed};
    pub use crate::detect::detect_format;
    pub use crate::error::{ComptypeError, Result};
    pub use crate::format::Format;
}
