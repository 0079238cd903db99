//! Desktop environment, shell and editor from the session environment

use crate::config::Context;
use crate::data::Fact;

pub fn de(ctx: &Context) -> Option<Fact> {
    let desktop = ctx
        .non_empty_var("XDG_CURRENT_DESKTOP")
        .or_else(|| ctx.non_empty_var("DESKTOP_SESSION"))?;
    Some(Fact::new("de", desktop))
}

pub fn shell(ctx: &Context) -> Option<Fact> {
    let shell = ctx.non_empty_var("SHELL")?;
    Some(Fact::new("shell", basename(shell)))
}

pub fn editor(ctx: &Context) -> Option<Fact> {
    let editor = ctx
        .non_empty_var("VISUAL")
        .or_else(|| ctx.non_empty_var("EDITOR"))?;
    Some(Fact::new("editor", basename(editor)))
}

/// Final path component
fn basename(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}
