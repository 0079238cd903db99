//! Extension providers loaded from the file named by `PF_SOURCE`
//!
//! ```toml
//! [[provider]]
//! name = "gpu"
//! type = "command"
//! value = "lspci | grep -i vga | cut -d: -f3"
//!
//! [[provider]]
//! name = "motd"
//! type = "text"
//! value = "be excellent to each other"
//! ```

use crate::config::Context;
use crate::data::Fact;
use crate::error::{PfetchError, Result};
use crate::utils::{command::run_shell, file::read_file_safe};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Default)]
struct ExtensionFile {
    #[serde(default, rename = "provider")]
    providers: Vec<ExtensionEntry>,
}

/// How an extension provider obtains its value
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// `value` is shown verbatim
    Text,
    /// `value` is a shell script; its stdout is shown
    Command,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub value: String,
}

impl ExtensionEntry {
    pub fn collect(&self, ctx: &Context) -> Option<Fact> {
        let value = match self.kind {
            EntryKind::Text => self.value.clone(),
            EntryKind::Command => match run_shell(ctx, &self.value) {
                Ok(out) => out,
                Err(err) => {
                    tracing::debug!(provider = %self.name, %err, "extension command failed");
                    return None;
                }
            },
        };
        Some(Fact::new(&self.name, value))
    }
}

/// Parse extension entries from TOML text
pub fn parse(content: &str) -> Result<Vec<ExtensionEntry>> {
    let file: ExtensionFile = toml::from_str(content)?;
    for entry in &file.providers {
        if entry.name.is_empty() || entry.name.contains(char::is_whitespace) {
            return Err(PfetchError::Config(format!(
                "invalid provider name '{}'",
                entry.name
            )));
        }
    }
    Ok(file.providers)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ExtensionEntry>> {
    let content = read_file_safe(path.as_ref())?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_entries_in_order() {
        let entries = parse(
            r#"
            [[provider]]
            name = "motd"
            type = "text"
            value = "hello"

            [[provider]]
            name = "os"
            type = "command"
            value = "echo custom"
            "#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Text);
        assert_eq!(entries[1].name, "os");
    }

    #[test]
    fn empty_file_has_no_entries() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse("[[provider]]\nname = \"a b\"\ntype = \"text\"\nvalue = \"x\""), Err(PfetchError::Config(_))));
        assert!(matches!(parse("[[provider]]\nname = \"a\"\ntype = \"script\"\nvalue = \"x\""), Err(PfetchError::Config(_))));
        assert!(matches!(load("/nonexistent/pfetch.toml"), Err(PfetchError::Io(_))));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[provider]]\nname = \"motd\"\ntype = \"text\"\nvalue = \"hi\"").unwrap();
        let entries = load(file.path()).unwrap();
        assert_eq!(entries[0].value, "hi");
    }
}
