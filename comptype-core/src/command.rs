//! External command runner.
//!
//! A command template is a whitespace separated list of tokens. Tokens that
//! contain `=` are environment assignments, everything else is the program
//! followed by its arguments. The target path always goes last.
//!
//! The child gets exactly the environment declared in the template and
//! nothing from the parent process. Only the program lookup uses the parent's
//! `PATH`.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A parsed command template, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Environment assignments, in template order.
    pub env: Vec<(String, String)>,
    /// Program followed by its arguments and the target path.
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Parse `template` and append `target` as the final argument.
    pub fn new(template: &str, target: &Path) -> Self {
        Self::with_args(template, &[], target)
    }

    /// Parse `template`, then append `extra` and finally `target`.
    ///
    /// Extra arguments are passed through verbatim, so paths with spaces or
    /// `=` in them survive.
    pub fn with_args(template: &str, extra: &[&OsStr], target: &Path) -> Self {
        let mut env_vars = Vec::new();
        let mut args = Vec::new();

        for token in template.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => env_vars.push((key.to_string(), value.to_string())),
                None => args.push(OsString::from(token)),
            }
        }

        args.extend(extra.iter().map(|arg| arg.to_os_string()));
        args.push(target.as_os_str().to_os_string());

        Self {
            env: env_vars,
            args,
        }
    }

    /// The program token, if the template had one.
    ///
    /// A template with no program leaves only the target in `args`; that is
    /// not something to execute.
    pub fn program(&self) -> Option<&OsStr> {
        if self.args.len() < 2 {
            return None;
        }
        self.args.first().map(OsString::as_os_str)
    }

    /// Spawn the program and wait for it.
    pub fn run(&self) -> CommandOutput {
        let Some(program) = self.program() else {
            return CommandOutput::failure("empty command template");
        };

        let resolved = find_program(program).unwrap_or_else(|| PathBuf::from(program));
        debug!(program = %resolved.display(), args = ?&self.args[1..], env = ?self.env, "spawning");

        let result = Command::new(&resolved)
            .args(&self.args[1..])
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                debug!(status = %output.status, "command finished");
                CommandOutput {
                    success: output.status.success(),
                    output: text,
                }
            }
            Err(e) => {
                debug!(error = %e, "command failed to launch");
                CommandOutput::failure(format!(
                    "failed to run {}: {}",
                    program.to_string_lossy(),
                    e
                ))
            }
        }
    }
}

/// Result of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the program launched and exited with status zero.
    pub success: bool,
    /// Standard output followed by standard error.
    pub output: String,
}

impl CommandOutput {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// Run `template` against `target`.
pub fn run_command(target: &Path, template: &str) -> CommandOutput {
    Invocation::new(template, target).run()
}

/// Run `template` with `extra` arguments placed before `target`.
pub fn run_command_with(target: &Path, template: &str, extra: &[&OsStr]) -> CommandOutput {
    Invocation::with_args(template, extra, target).run()
}

/// Locate `program` on the parent's `PATH`.
///
/// Names with a path separator are checked directly.
pub fn find_program(program: impl AsRef<OsStr>) -> Option<PathBuf> {
    let program = program.as_ref();
    if program.to_string_lossy().contains(MAIN_SEPARATOR) {
        let path = PathBuf::from(program);
        return path.is_file().then_some(path);
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
