//! Provider lookup by name

use crate::collectors::{desktop, hardware, packages, palette, system};
use crate::config::Context;
use crate::data::Fact;
use crate::extension::ExtensionEntry;

/// Providers compiled into pfetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Title,
    Os,
    Host,
    Kernel,
    Uptime,
    Pkgs,
    Memory,
    De,
    Shell,
    Editor,
    Palette,
}

impl Builtin {
    pub const ALL: [Builtin; 11] = [
        Builtin::Title,
        Builtin::Os,
        Builtin::Host,
        Builtin::Kernel,
        Builtin::Uptime,
        Builtin::Pkgs,
        Builtin::Memory,
        Builtin::De,
        Builtin::Shell,
        Builtin::Editor,
        Builtin::Palette,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Title => "title",
            Builtin::Os => "os",
            Builtin::Host => "host",
            Builtin::Kernel => "kernel",
            Builtin::Uptime => "uptime",
            Builtin::Pkgs => "pkgs",
            Builtin::Memory => "memory",
            Builtin::De => "de",
            Builtin::Shell => "shell",
            Builtin::Editor => "editor",
            Builtin::Palette => "palette",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    fn collector(self) -> fn(&Context) -> Option<Fact> {
        match self {
            Builtin::Title => system::title,
            Builtin::Os => system::os,
            Builtin::Host => hardware::host,
            Builtin::Kernel => system::kernel,
            Builtin::Uptime => system::uptime,
            Builtin::Pkgs => packages::pkgs,
            Builtin::Memory => hardware::memory,
            Builtin::De => desktop::de,
            Builtin::Shell => desktop::shell,
            Builtin::Editor => desktop::editor,
            Builtin::Palette => palette::palette,
        }
    }
}

/// A resolved provider, ready to run
#[derive(Debug, Clone, Copy)]
pub enum Provider<'a> {
    Builtin(Builtin),
    Extension(&'a ExtensionEntry),
}

impl Provider<'_> {
    pub fn name(&self) -> &str {
        match self {
            Provider::Builtin(b) => b.name(),
            Provider::Extension(e) => &e.name,
        }
    }

    pub fn collect(&self, ctx: &Context) -> Option<Fact> {
        match self {
            Provider::Builtin(b) => (b.collector())(ctx),
            Provider::Extension(e) => e.collect(ctx),
        }
    }
}

/// Built-ins plus registered extensions; extensions shadow built-ins of the same name
#[derive(Debug, Default)]
pub struct Registry {
    extensions: Vec<ExtensionEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Later registrations win over earlier ones with the same name
    pub fn register(&mut self, entry: ExtensionEntry) {
        self.extensions.push(entry);
    }

    pub fn register_all<I: IntoIterator<Item = ExtensionEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.register(entry);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Provider<'_>> {
        self.extensions
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(Provider::Extension)
            .or_else(|| Builtin::from_name(name).map(Provider::Builtin))
    }
}
