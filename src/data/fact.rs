//! A single labeled piece of host information

/// How the renderer lays out a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactStyle {
    /// `label<sep>value`, value aligned to the shared column
    Aligned,
    /// Label only, no separator and no alignment (`user@host`)
    Title,
    /// Preceded by a blank line, separator suppressed
    Swatch,
}

/// One labeled piece of host information, destined for one output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub name: String,
    pub label: String,
    pub value: String,
    pub style: FactStyle,
}

impl Fact {
    /// Fact whose label is its provider name
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Fact {
            name: name.to_string(),
            label: name.to_string(),
            value: value.into(),
            style: FactStyle::Aligned,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_style(mut self, style: FactStyle) -> Self {
        self.style = style;
        self
    }

    /// Facts with an empty raw value are never rendered
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
