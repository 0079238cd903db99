//! Package count across every installed package manager

use crate::config::Context;
use crate::data::{Fact, OsFamily};
use crate::error::Result;
use crate::utils::command::*;

/// Counts below this are not shown
pub const MIN_PACKAGES: usize = 10;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Kiss,    // KISS Linux
    Pacman,  // Arch Linux, Manjaro
    Dpkg,    // Debian, Ubuntu
    Rpm,     // Fedora, openSUSE
    Xbps,    // Void Linux
    Apk,     // Alpine
    Guix,    // Guix System
    Opkg,    // OpenWrt
    Nix,     // NixOS
    Eopkg,   // Solus
    Pkg,     // FreeBSD, DragonFly
    PkgInfo, // OpenBSD, NetBSD
}

/// Probe order on Linux; every manager found contributes
const LINUX_MANAGERS: &[PackageManager] = &[
    PackageManager::Kiss,
    PackageManager::Pacman,
    PackageManager::Dpkg,
    PackageManager::Rpm,
    PackageManager::Xbps,
    PackageManager::Apk,
    PackageManager::Guix,
    PackageManager::Opkg,
    PackageManager::Nix,
    PackageManager::Eopkg,
];

impl PackageManager {
    /// Command whose presence marks the manager as installed
    pub fn probe(self) -> &'static str {
        match self {
            // `pacman` alone also matches the game of the same name.
            PackageManager::Pacman => "pacman-key",
            other => other.program(),
        }
    }

    fn program(self) -> &'static str {
        match self {
            PackageManager::Kiss => "kiss",
            PackageManager::Pacman => "pacman",
            PackageManager::Dpkg => "dpkg-query",
            PackageManager::Rpm => "rpm",
            PackageManager::Xbps => "xbps-query",
            PackageManager::Apk => "apk",
            PackageManager::Guix => "guix",
            PackageManager::Opkg => "opkg",
            PackageManager::Nix => "nix-store",
            PackageManager::Eopkg => "eopkg",
            PackageManager::Pkg => "pkg",
            PackageManager::PkgInfo => "pkg_info",
        }
    }

    /// Arguments that list one installed package per line
    fn list_args(self) -> &'static [&'static str] {
        match self {
            PackageManager::Kiss => &["l"],
            PackageManager::Pacman => &["-Qq"],
            PackageManager::Dpkg => &["-f", ".\n", "-W"],
            PackageManager::Rpm => &["-qa"],
            PackageManager::Xbps => &["-l"],
            PackageManager::Apk => &["info"],
            PackageManager::Guix => &["package", "--list-installed"],
            PackageManager::Opkg => &["list-installed"],
            PackageManager::Nix => &["-q", "--requisites", "/run/current-system/sw"],
            PackageManager::Eopkg => &["list-installed"],
            PackageManager::Pkg => &["info"],
            PackageManager::PkgInfo => &[],
        }
    }

    fn count(self, ctx: &Context) -> Result<usize> {
        let output = run_command(ctx, self.program(), self.list_args())?;
        Ok(count_lines(&output))
    }
}

/// Managers consulted for an OS family
pub fn managers_for(family: OsFamily) -> &'static [PackageManager] {
    match family {
        OsFamily::Linux => LINUX_MANAGERS,
        OsFamily::FreeBsd | OsFamily::DragonFly => &[PackageManager::Pkg],
        OsFamily::OpenBsd | OsFamily::NetBsd => &[PackageManager::PkgInfo],
        OsFamily::Other => &[],
    }
}

/// One package per output line, as `wc -l` would count them
pub fn count_lines(output: &str) -> usize {
    output.lines().count()
}

pub fn pkgs(ctx: &Context) -> Option<Fact> {
    let total = managers_for(ctx.host.family())
        .iter()
        .filter(|pm| command_exists(ctx, pm.probe()))
        .map(|pm| {
            pm.count(ctx).unwrap_or_else(|err| {
                tracing::debug!(manager = ?pm, %err, "package listing failed");
                0
            })
        })
        .sum::<usize>();

    package_fact(total)
}

/// Single-digit counts are treated as noise
pub fn package_fact(count: usize) -> Option<Fact> {
    (count >= MIN_PACKAGES).then(|| Fact::new("pkgs", count.to_string()))
}
