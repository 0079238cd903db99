//! File reading utilities

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Read a whole file to string
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Read first line of a file, trimmed
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    let content = read_file_safe(path)?;
    Ok(content.lines().next().unwrap_or("").trim().to_string())
}

/// Read a sysfs/devicetree attribute, dropping NUL padding and whitespace
pub fn read_attribute<P: AsRef<Path>>(path: P) -> Option<String> {
    let bytes = fs::read(path.as_ref()).ok()?;
    let text = String::from_utf8_lossy(&bytes).replace('\0', "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
