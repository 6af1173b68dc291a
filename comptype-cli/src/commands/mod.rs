//! Command implementations for the comptype CLI.

pub mod completions;
pub mod convert;
pub mod detect;
pub mod formats;

pub use completions::cmd_completions;
pub use convert::cmd_convert;
pub use detect::cmd_detect;
pub use formats::cmd_formats;
