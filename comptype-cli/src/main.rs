//! comptype CLI
//!
//! Detects and converts between plain, gzip, bzip2, xz and single-file zip
//! using the compression tools installed on the system.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_completions, cmd_convert, cmd_detect, cmd_formats};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comptype")]
#[command(
    author,
    version,
    about = "Detect and convert compression formats with the system's tools"
)]
#[command(long_about = "
comptype detects whether a file is plain, gzip, bzip2, xz or zip compressed
and converts it to another of those formats. The work is done by file(1),
gzip, bzip2, xz, zip, unzip and zipinfo, which must be on PATH.

Examples:
  comptype detect data.txt.gz
  comptype detect --json *.xz
  comptype convert data.txt gzip
  comptype convert data.txt.gz bzip2
  comptype convert archive.zip plain
  comptype formats
")]
struct Cli {
    /// Log every external command (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the compression format of files
    #[command(alias = "d")]
    Detect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Convert a file to another compression format
    #[command(alias = "c")]
    Convert {
        /// File to convert
        file: PathBuf,

        /// Target format (plain, gzip, bzip2, xz, zip); unknown names mean plain
        format: String,

        /// Do not show a spinner while the tools run
        #[arg(short, long)]
        quiet: bool,
    },

    /// List supported formats and the tools behind them
    #[command(alias = "f")]
    Formats {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    utils::init_logging(verbose);

    let result = match cli.command {
        Commands::Detect { files, json } => cmd_detect(&files, json),
        Commands::Convert {
            file,
            format,
            quiet,
        } => cmd_convert(&file, &format, !quiet && !verbose),
        Commands::Formats { json } => cmd_formats(json),
        Commands::Completions { shell } => cmd_completions(shell, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
