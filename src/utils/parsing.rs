//! String parsing utilities

use crate::error::{PfetchError, Result};
use crate::escape;
use unicode_width::UnicodeWidthStr;

/// Collapse whitespace runs to single spaces and trim both ends
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Terminal columns occupied by `text`, ignoring escape sequences
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(escape::strip(text).as_str())
}

/// Leading integer of a field such as `1234.56` or `1234`
pub fn parse_leading_u64(field: &str) -> Result<u64> {
    let digits = field.trim().split('.').next().unwrap_or("");
    digits
        .parse()
        .map_err(|_| PfetchError::Parse(format!("Invalid integer: {}", field)))
}

pub fn kib_to_mib(kib: u64) -> u64 {
    kib / 1024
}

pub fn bytes_to_mib(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

/// Format uptime from seconds as `<d>d <h>h <m>m `, omitting zero parts
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = seconds / 3600 % 24;
    let minutes = seconds / 60 % 60;

    let mut out = String::new();
    for (amount, unit) in [(days, 'd'), (hours, 'h'), (minutes, 'm')] {
        if amount > 0 {
            out.push_str(&format!("{amount}{unit} "));
        }
    }

    if out.is_empty() {
        out.push_str("0m");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_and_trims() {
        assert_eq!(normalize_whitespace("  Arch \t Linux\n x86_64  "), "Arch Linux x86_64");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["a  b", " lead", "trail ", "\tmixed \n  space\t", "", "single"] {
            let once = normalize_whitespace(raw);
            assert_eq!(normalize_whitespace(&once), once);
        }
    }

    #[test]
    fn uptime_omits_zero_components() {
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(90000), "1d 1h ");
        assert_eq!(format_uptime(86400 + 60), "1d 1m ");
        assert_eq!(format_uptime(3600 * 5 + 60 * 7), "5h 7m ");
        assert_eq!(format_uptime(86400 * 12 + 3600 * 23 + 60 * 59 + 59), "12d 23h 59m ");
    }

    #[test]
    fn leading_integer_ignores_fraction() {
        assert_eq!(parse_leading_u64("12345.67").unwrap(), 12345);
        assert_eq!(parse_leading_u64(" 42 ").unwrap(), 42);
        assert!(parse_leading_u64("abc").is_err());
    }

    #[test]
    fn width_skips_escapes() {
        assert_eq!(display_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(display_width("memory"), 6);
    }
}
