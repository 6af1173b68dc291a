//! Completions command implementation.

use clap_complete::Shell;
use std::io;

pub fn cmd_completions(
    shell: Shell,
    command: &mut clap::Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = command.get_name().to_string();
    clap_complete::generate(shell, command, name, &mut io::stdout());
    Ok(())
}
