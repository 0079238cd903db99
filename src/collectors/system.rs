//! OS identity, kernel, uptime and the user@host title

use crate::config::Context;
use crate::data::{Fact, FactStyle, OsFamily};
use crate::error::{PfetchError, Result};
use crate::utils::{command::*, file::*, parsing::*};
use std::time::{SystemTime, UNIX_EPOCH};

/// `user@hostname`
pub fn title(ctx: &Context) -> Option<Fact> {
    let user = ctx
        .non_empty_var("USER")
        .map(String::from)
        .or_else(|| run_command(ctx, "id", &["-un"]).ok())
        .filter(|u| !u.is_empty())?;

    let hostname = ctx
        .non_empty_var("HOSTNAME")
        .map(String::from)
        .or_else(|| read_first_line("/proc/sys/kernel/hostname").ok())
        .filter(|h| !h.is_empty())
        .or_else(|| run_command(ctx, "hostname", &[]).ok())
        .filter(|h| !h.is_empty())?;

    Some(Fact::new("title", hostname).with_label(user).with_style(FactStyle::Title))
}

pub fn os(ctx: &Context) -> Option<Fact> {
    let host = &ctx.host;
    let distro = match host.family() {
        OsFamily::Linux => linux_distro(ctx),
        OsFamily::FreeBsd => run_command(ctx, "freebsd-version", &[])
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| format!("{} {}", host.os, v)),
        OsFamily::OpenBsd | OsFamily::NetBsd | OsFamily::DragonFly => sysctl(ctx, "kern.version")
            .ok()
            .and_then(|v| parse_bsd_release(&v)),
        OsFamily::Other => None,
    };

    let value = distro.unwrap_or_else(|| format!("{} {}", host.os, host.kernel));
    Some(Fact::new("os", value))
}

fn linux_distro(ctx: &Context) -> Option<String> {
    if command_exists(ctx, "lsb_release") {
        match run_command(ctx, "lsb_release", &["-sd"]) {
            Ok(desc) => {
                let desc = strip_quotes(&desc);
                if !desc.is_empty() {
                    return Some(desc.to_string());
                }
            }
            Err(err) => tracing::debug!(%err, "lsb_release failed"),
        }
    }

    read_file_safe("/etc/os-release")
        .map_err(|err| tracing::debug!(%err, "cannot read /etc/os-release"))
        .ok()
        .and_then(|content| parse_os_release(&content))
}

fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// `PRETTY_NAME` from an os-release file
pub fn parse_os_release(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("PRETTY_NAME="))
        .map(|value| strip_quotes(value).to_string())
        .filter(|value| !value.is_empty())
}

/// Distribution and release from `kern.version`, keeping a `-current` tag
pub fn parse_bsd_release(kern_version: &str) -> Option<String> {
    let line = kern_version.lines().next()?.trim();
    let head = line.split(['(', '#']).next().unwrap_or(line);
    let mut tokens = head.split_whitespace();
    let distro = tokens.next()?;

    let mut release = match tokens.next() {
        Some(version) => format!("{distro} {}", version.trim_end_matches(':')),
        None => distro.to_string(),
    };
    if line.to_ascii_lowercase().contains("current") && !release.to_ascii_lowercase().contains("current") {
        release.push_str("-current");
    }
    Some(release)
}

/// Omitted on BSDs, where `os` already carries the kernel version
pub fn kernel(ctx: &Context) -> Option<Fact> {
    if ctx.host.os.contains("BSD") {
        return None;
    }
    Some(Fact::new("kernel", ctx.host.kernel.clone()))
}

pub fn uptime(ctx: &Context) -> Option<Fact> {
    let seconds = match ctx.host.family() {
        OsFamily::Linux => read_proc_uptime(),
        _ => read_boot_uptime(ctx),
    };

    match seconds {
        Ok(seconds) => Some(Fact::new("uptime", format_uptime(seconds))),
        Err(err) => {
            tracing::debug!(%err, "uptime unavailable");
            None
        }
    }
}

fn read_proc_uptime() -> Result<u64> {
    let line = read_first_line("/proc/uptime")?;
    let first = line
        .split_whitespace()
        .next()
        .ok_or_else(|| PfetchError::Parse("empty /proc/uptime".to_string()))?;
    parse_leading_u64(first)
}

fn read_boot_uptime(ctx: &Context) -> Result<u64> {
    let boot = parse_boottime(&sysctl(ctx, "kern.boottime")?)?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| PfetchError::Detection(err.to_string()))?
        .as_secs();
    Ok(now.saturating_sub(boot))
}

/// Boot epoch from `kern.boottime`: either a bare integer or `{ sec = N, usec = M } ...`
pub fn parse_boottime(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if let Ok(epoch) = raw.parse() {
        return Ok(epoch);
    }

    raw.split_once("sec = ")
        .map(|(_, rest)| rest.chars().take_while(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| PfetchError::Parse(format!("Invalid boot time: {}", raw)))
}
