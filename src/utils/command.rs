//! Command execution utilities
//!
//! Probe commands never write to the visible output: stdout is always
//! captured and stderr is discarded unless debug mode is on.

use crate::config::Context;
use crate::error::{PfetchError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn probe(ctx: &Context, program: &str) -> Command {
    // Resolve through the captured PATH so probing matches `command_exists`.
    let mut cmd = match find_command(ctx, program) {
        Some(path) => Command::new(path),
        None => Command::new(program),
    };
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(if ctx.settings.debug {
            Stdio::inherit()
        } else {
            Stdio::null()
        });
    if let Some(dir) = &ctx.scratch_dir {
        cmd.env("TMPDIR", dir);
    }
    cmd
}

fn capture(program: &str, mut cmd: Command) -> Result<String> {
    let output = cmd.output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(PfetchError::Detection(format!(
            "Command '{}' failed with exit code: {:?}",
            program,
            output.status.code()
        )))
    }
}

/// Execute a command and return stdout as String
pub fn run_command(ctx: &Context, program: &str, args: &[&str]) -> Result<String> {
    tracing::trace!(program, ?args, "running probe");
    let mut cmd = probe(ctx, program);
    cmd.args(args);
    capture(program, cmd)
}

/// Execute a script with `sh -c`
pub fn run_shell(ctx: &Context, script: &str) -> Result<String> {
    tracing::trace!(script, "running shell probe");
    let mut cmd = probe(ctx, "sh");
    cmd.arg("-c").arg(script);
    capture("sh", cmd)
}

/// Locate a command in the captured PATH
pub fn find_command(ctx: &Context, program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = Path::new(program);
        return path.is_file().then(|| path.to_path_buf());
    }

    ctx.var("PATH")
        .unwrap_or("")
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(program))
        .find(|candidate| candidate.is_file())
}

/// Check if a command exists in the captured PATH
pub fn command_exists(ctx: &Context, program: &str) -> bool {
    find_command(ctx, program).is_some()
}

/// `sysctl -n <name>`, the BSD system-control interface
pub fn sysctl(ctx: &Context, name: &str) -> Result<String> {
    run_command(ctx, "sysctl", &["-n", name])
}
