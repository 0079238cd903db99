//! Terminal control sequences
//!
//! Every escape code pfetch writes is produced here. Nothing is printed by
//! this module; callers decide whether to write or capture the result.

const ESC: &str = "\x1b";

/// Terminals that do not implement the private autowrap mode (DECAWM)
const NO_AUTOWRAP_TERMS: &[&str] = &["dumb", "minix", "cons25"];

/// Relative cursor movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Up,
    Down,
    Right,
    Left,
}

impl Cursor {
    fn final_byte(self) -> char {
        match self {
            Cursor::Up => 'A',
            Cursor::Down => 'B',
            Cursor::Right => 'C',
            Cursor::Left => 'D',
        }
    }
}

/// Escape sequence emitter bound to the run's color switch and terminal type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escapes {
    color: bool,
    autowrap: bool,
}

impl Escapes {
    pub fn new(color: bool, term: Option<&str>) -> Self {
        let autowrap = !term.is_some_and(|t| NO_AUTOWRAP_TERMS.contains(&t));
        Escapes { color, autowrap }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Cursor movement has no disable path
    pub fn cursor(&self, direction: Cursor, columns: usize) -> String {
        format!("{ESC}[{columns}{}", direction.final_byte())
    }

    /// Select Graphic Rendition; empty whenever color is switched off
    pub fn sgr(&self, code: &str) -> String {
        if !self.color {
            return String::new();
        }
        format!("{ESC}[{code}m")
    }

    /// Foreground color `0..=7`
    pub fn fg(&self, index: u8) -> String {
        self.sgr(&format!("3{index}"))
    }

    pub fn bold(&self) -> String {
        self.sgr("1")
    }

    pub fn reverse(&self) -> String {
        self.sgr("7")
    }

    pub fn reset(&self) -> String {
        self.sgr("0")
    }

    /// DECAWM set (`h`) or reset (`l`); empty on terminals without it
    pub fn autowrap(&self, enable: bool) -> String {
        if !self.autowrap {
            return String::new();
        }
        format!("{ESC}[?7{}", if enable { 'h' } else { 'l' })
    }
}

/// Remove CSI sequences, leaving only printable text
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() != Some('[') {
            continue;
        }
        // Parameters and intermediates run until a final byte in 0x40..=0x7e.
        for c in chars.by_ref() {
            if ('\x40'..='\x7e').contains(&c) {
                break;
            }
        }
    }
    out
}
