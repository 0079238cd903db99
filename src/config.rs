//! Run-wide settings read from `PF_*` environment variables

use crate::data::HostIdentity;
use crate::escape::Escapes;
use std::collections::HashMap;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

pub const DEFAULT_INFO: &[&str] = &["title", "os", "host", "kernel", "uptime", "pkgs", "memory"];
pub const DEFAULT_SEPARATOR: &str = ": ";
const DEFAULT_LABEL_COLOR: u8 = 4;
const DEFAULT_VALUE_COLOR: u8 = 7;
const DEFAULT_TITLE_COLOR: u8 = 1;
/// Highest basic ANSI color; 8 would start an extended-color sequence
const MAX_COLOR: u8 = 7;

/// User-tunable settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub color: bool,
    pub label_color: u8,
    pub value_color: u8,
    pub title_color: u8,
    pub separator: String,
    pub align: Option<usize>,
    pub info: Option<Vec<String>>,
    pub source: Option<PathBuf>,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            color: true,
            label_color: DEFAULT_LABEL_COLOR,
            value_color: DEFAULT_VALUE_COLOR,
            title_color: DEFAULT_TITLE_COLOR,
            separator: DEFAULT_SEPARATOR.to_string(),
            align: None,
            info: None,
            source: None,
            debug: false,
        }
    }
}

impl Settings {
    /// Build settings from an environment lookup; unset variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let color_index = |key: &str, default: u8| match lookup(key) {
            Some(raw) => raw.trim().parse::<u8>().ok().filter(|c| *c <= MAX_COLOR).unwrap_or_else(|| {
                tracing::debug!(key, value = %raw, "ignoring invalid color index");
                default
            }),
            None => default,
        };

        Settings {
            color: lookup("PF_COLOR").map_or(true, |v| v.trim() != "0"),
            label_color: color_index("PF_COL1", DEFAULT_LABEL_COLOR),
            value_color: color_index("PF_COL2", DEFAULT_VALUE_COLOR),
            title_color: color_index("PF_COL3", DEFAULT_TITLE_COLOR),
            // An empty PF_SEP is honored; only an unset one takes the default.
            separator: lookup("PF_SEP").unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            align: lookup("PF_ALIGN").and_then(|v| v.trim().parse().ok()),
            info: lookup("PF_INFO")
                .map(|v| v.split_whitespace().map(String::from).collect::<Vec<_>>())
                .filter(|names| !names.is_empty()),
            source: lookup("PF_SOURCE")
                .filter(|p| !p.trim().is_empty())
                .map(|p| PathBuf::from(shellexpand::tilde(p.trim()).into_owned())),
            debug: false,
        }
    }

    /// Provider names to run, in order
    pub fn provider_order(&self) -> Vec<String> {
        match &self.info {
            Some(names) => names.clone(),
            None => DEFAULT_INFO.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Immutable run-wide state handed to every provider and to the renderer
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: Settings,
    pub host: HostIdentity,
    pub scratch_dir: Option<PathBuf>,
    vars: HashMap<String, String>,
}

impl Context {
    pub fn new(settings: Settings, host: HostIdentity, vars: HashMap<String, String>) -> Self {
        let home = vars
            .get("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir);
        let scratch_dir = resolve_scratch_dir(vars.get("TMPDIR").map(String::as_str), home);

        Context {
            settings,
            host,
            scratch_dir,
            vars,
        }
    }

    /// Snapshot the process environment and the running kernel
    pub fn from_env(debug: bool) -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let mut settings = Settings::from_lookup(|key| vars.get(key).cloned());
        settings.debug = debug;
        Context::new(settings, HostIdentity::capture(), vars)
    }

    /// Environment variable as captured at startup
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Environment variable, treating an empty value as unset
    pub fn non_empty_var(&self, key: &str) -> Option<&str> {
        self.var(key).filter(|v| !v.is_empty())
    }

    pub fn escapes(&self) -> Escapes {
        Escapes::new(self.settings.color, self.var("TERM"))
    }
}

/// `TMPDIR` (default `/tmp`) when writable, otherwise the home directory
pub fn resolve_scratch_dir(tmpdir: Option<&str>, home: Option<PathBuf>) -> Option<PathBuf> {
    let tmp = Path::new(tmpdir.filter(|t| !t.is_empty()).unwrap_or("/tmp"));
    if is_writable_dir(tmp) {
        return Some(tmp.to_path_buf());
    }

    tracing::debug!(path = %tmp.display(), "temporary directory not writable, using home");
    home.filter(|h| is_writable_dir(h))
}

fn is_writable_dir(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings(&[]);
        assert_eq!(s, Settings::default());
        assert_eq!(s.provider_order(), DEFAULT_INFO);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("PF_COLOR", "0"),
            ("PF_COL1", "2"),
            ("PF_COL2", "3"),
            ("PF_SEP", " -> "),
            ("PF_ALIGN", "12"),
            ("PF_INFO", "  os   memory os bogus "),
        ]);
        assert!(!s.color);
        assert_eq!(s.label_color, 2);
        assert_eq!(s.value_color, 3);
        assert_eq!(s.separator, " -> ");
        assert_eq!(s.align, Some(12));
        assert_eq!(s.provider_order(), vec!["os", "memory", "os", "bogus"]);
    }

    #[test]
    fn color_indices_stay_in_basic_range() {
        let s = settings(&[("PF_COL1", "8"), ("PF_COL2", "9"), ("PF_COL3", "7")]);
        assert_eq!(s.label_color, DEFAULT_LABEL_COLOR);
        assert_eq!(s.value_color, DEFAULT_VALUE_COLOR);
        assert_eq!(s.title_color, 7);
        assert_eq!(settings(&[("PF_COL1", "0")]).label_color, 0);
    }

    #[test]
    fn empty_separator_is_kept() {
        assert_eq!(settings(&[("PF_SEP", "")]).separator, "");
    }

    #[test]
    fn invalid_values_fall_back() {
        let s = settings(&[("PF_COL1", "red"), ("PF_ALIGN", "wide"), ("PF_INFO", "   ")]);
        assert_eq!(s.label_color, DEFAULT_LABEL_COLOR);
        assert_eq!(s.align, None);
        assert_eq!(s.info, None);
    }

    #[test]
    fn scratch_dir_falls_back_to_home() {
        let home = tempfile::tempdir().unwrap();
        let resolved = resolve_scratch_dir(Some("/nonexistent/pfetch-tmp"), Some(home.path().to_path_buf()));
        assert_eq!(resolved.as_deref(), Some(home.path()));

        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_scratch_dir(tmp.path().to_str(), None);
        assert_eq!(resolved.as_deref(), Some(tmp.path()));
    }
}
