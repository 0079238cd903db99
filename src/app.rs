//! Orchestrator: argument handling and the provider run

use crate::config::Context;
use crate::display::{alignment_width, Renderer};
use crate::error::Result;
use crate::extension;
use crate::registry::Registry;
use crate::terminal::AutowrapGuard;
use std::io::{self, Write};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
pfetch     show system information
pfetch -v  show version information";

/// What the command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Version,
    Help,
    Run { debug: bool },
}

impl Invocation {
    /// Only the first argument is significant
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match args.into_iter().next() {
            None => Invocation::Run { debug: false },
            Some(arg) => match arg.as_ref() {
                "-v" => Invocation::Version,
                "-d" => Invocation::Run { debug: true },
                _ => Invocation::Help,
            },
        }
    }
}

pub fn version_text() -> String {
    format!("{NAME} {VERSION}")
}

/// Answer `-v` and help without touching any provider
pub fn respond<W: Write>(invocation: Invocation, out: &mut W) -> io::Result<()> {
    match invocation {
        Invocation::Version => writeln!(out, "{}", version_text()),
        Invocation::Help => writeln!(out, "{USAGE}"),
        Invocation::Run { .. } => Ok(()),
    }
}

/// Built-ins plus any extension providers from `PF_SOURCE`
pub fn load_registry(ctx: &Context) -> Registry {
    let mut registry = Registry::new();
    if let Some(path) = &ctx.settings.source {
        match extension::load(path) {
            Ok(entries) => {
                tracing::debug!(path = %path.display(), count = entries.len(), "loaded extensions");
                registry.register_all(entries);
            }
            Err(err) => tracing::debug!(path = %path.display(), %err, "ignoring extension file"),
        }
    }
    registry
}

/// Run every provider in order, writing one line per non-empty fact.
/// Returns the number of lines rendered.
pub fn run<W: Write>(ctx: &Context, registry: &Registry, out: W) -> Result<usize> {
    let order = ctx.settings.provider_order();
    let align = ctx.settings.align.unwrap_or_else(|| alignment_width(&order));
    tracing::debug!(?order, align, os = %ctx.host.os, "starting run");

    let mut guard = AutowrapGuard::acquire(&ctx.escapes(), out)?;
    let lines = {
        let mut renderer = Renderer::new(ctx, align, &mut guard);
        for name in &order {
            let Some(provider) = registry.lookup(name) else {
                tracing::debug!(name = %name, "no such provider, skipping");
                continue;
            };

            tracing::trace!(provider = provider.name(), "collecting");
            match provider.collect(ctx) {
                Some(fact) => renderer.emit(&fact)?,
                None => tracing::debug!(provider = provider.name(), "no value"),
            }
        }
        renderer.flush()?;
        renderer.lines()
    };
    guard.release()?;

    // No trailing padding: nothing in pfetch draws beside the info lines.
    tracing::debug!(lines, "run finished");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_dispatch() {
        assert_eq!(Invocation::from_args(Vec::<String>::new()), Invocation::Run { debug: false });
        assert_eq!(Invocation::from_args(["-d"]), Invocation::Run { debug: true });
        assert_eq!(Invocation::from_args(["-v"]), Invocation::Version);
        assert_eq!(Invocation::from_args(["--help"]), Invocation::Help);
        assert_eq!(Invocation::from_args(["-v", "-d"]), Invocation::Version);
        assert_eq!(Invocation::from_args(["-x"]), Invocation::Help);
    }

    #[test]
    fn version_and_help_print_only_their_text() {
        let mut out = Vec::new();
        respond(Invocation::from_args(["-v"]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("pfetch {VERSION}\n"));

        let mut out = Vec::new();
        respond(Invocation::from_args(["--bogus"]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{USAGE}\n"));

        let mut out = Vec::new();
        respond(Invocation::Run { debug: false }, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn version_and_usage() {
        assert_eq!(version_text(), format!("pfetch {}", env!("CARGO_PKG_VERSION")));
        assert_eq!(USAGE.lines().count(), 2);
    }
}
