//! Line renderer: aligned, colorized `label<sep>value` lines

use crate::config::Context;
use crate::data::{Fact, FactStyle};
use crate::escape::{Cursor, Escapes};
use crate::utils::parsing::{display_width, normalize_whitespace};
use std::io::{self, Write};

/// Shared value column for a run: widest provider name plus one
pub fn alignment_width<S: AsRef<str>>(names: &[S]) -> usize {
    names
        .iter()
        .map(|name| display_width(name.as_ref()))
        .max()
        .unwrap_or(0)
        + 1
}

pub struct Renderer<W: Write> {
    out: W,
    esc: Escapes,
    label_color: u8,
    value_color: u8,
    title_color: u8,
    separator: String,
    align: usize,
    lines: usize,
}

impl<W: Write> Renderer<W> {
    pub fn new(ctx: &Context, align: usize, out: W) -> Self {
        let settings = &ctx.settings;
        Renderer {
            out,
            esc: ctx.escapes(),
            label_color: settings.label_color,
            value_color: settings.value_color,
            title_color: settings.title_color,
            separator: settings.separator.clone(),
            align,
            lines: 0,
        }
    }

    /// Render a fact according to its style; empty facts produce nothing
    pub fn emit(&mut self, fact: &Fact) -> io::Result<()> {
        if fact.is_empty() {
            return Ok(());
        }

        match fact.style {
            FactStyle::Aligned => self.render(&fact.label, &fact.value, false),
            FactStyle::Swatch => {
                self.out.write_all(b"\n")?;
                self.render(&fact.label, &fact.value, true)
            }
            FactStyle::Title => self.title(&fact.label, &fact.value),
        }
    }

    /// Write one aligned line. No-op when `raw` is empty.
    pub fn render(&mut self, label: &str, raw: &str, suppress_separator: bool) -> io::Result<()> {
        if raw.is_empty() {
            return Ok(());
        }

        let info = normalize_whitespace(raw);
        let label_width = display_width(label);
        let e = &self.esc;

        let mut line = format!("{}{}{}{}", e.fg(self.label_color), e.bold(), label, e.reset());
        if !suppress_separator {
            line.push_str(&self.separator);
        }

        // Plain mode pads with spaces so that no escape sequence is written.
        if e.color_enabled() {
            line.push_str(&e.cursor(Cursor::Left, label_width));
            line.push_str(&e.cursor(Cursor::Right, self.align));
        } else {
            line.push_str(&" ".repeat(self.align.saturating_sub(label_width)));
        }

        line.push_str(&format!("{}{}{}\n", e.fg(self.value_color), info, e.reset()));
        self.out.write_all(line.as_bytes())?;
        self.lines += 1;
        Ok(())
    }

    fn title(&mut self, user: &str, host: &str) -> io::Result<()> {
        let e = &self.esc;
        let accent = format!("{}{}", e.fg(self.title_color), e.bold());
        let line = format!(
            "{accent}{user}{reset}{at}@{reset}{accent}{host}{reset}\n",
            at = e.fg(self.value_color),
            reset = e.reset(),
        );
        self.out.write_all(line.as_bytes())?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines rendered so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::data::HostIdentity;
    use crate::escape;
    use std::collections::HashMap;

    fn ctx(color: bool) -> Context {
        let settings = Settings {
            color,
            ..Settings::default()
        };
        Context::new(settings, HostIdentity::new("Linux", "6.1.0", "x86_64"), HashMap::new())
    }

    fn rendered(ctx: &Context, align: usize, facts: &[(&str, &str)]) -> String {
        let mut r = Renderer::new(ctx, align, Vec::new());
        for (label, value) in facts {
            r.render(label, value, false).unwrap();
        }
        String::from_utf8(r.into_inner()).unwrap()
    }

    /// Column at which the value starts, interpreting relative cursor moves
    fn value_column(line: &str, value: &str) -> usize {
        let start = line.find(value).expect("value present");
        let prefix = &line[..start];
        let mut col: usize = 0;
        let mut rest = prefix;
        while let Some(pos) = rest.find('\x1b') {
            col += display_width(&rest[..pos]);
            let seq = &rest[pos..];
            let end = seq.find(|c: char| c.is_ascii_alphabetic()).unwrap();
            let n: usize = seq[2..end].parse().unwrap_or(0);
            match &seq[end..=end] {
                "C" => col += n,
                "D" => col = col.saturating_sub(n),
                _ => {}
            }
            rest = &seq[end + 1..];
        }
        col + display_width(rest)
    }

    #[test]
    fn empty_value_renders_nothing() {
        let ctx = ctx(true);
        let mut r = Renderer::new(&ctx, 7, Vec::new());
        r.render("os", "", false).unwrap();
        assert_eq!(r.lines(), 0);
        assert!(r.into_inner().is_empty());
    }

    #[test]
    fn colored_line_layout() {
        let out = rendered(&ctx(true), 7, &[("os", "  Arch   Linux ")]);
        assert_eq!(
            out,
            "\x1b[34m\x1b[1mos\x1b[0m: \x1b[2D\x1b[7C\x1b[37mArch Linux\x1b[0m\n"
        );
    }

    #[test]
    fn values_share_one_column() {
        let labels = ["os", "host", "kernel", "memory", "de"];
        let align = alignment_width(&labels);
        assert_eq!(align, 7);

        for color in [true, false] {
            let facts: Vec<(&str, &str)> = labels.iter().map(|l| (*l, "VALUE")).collect();
            let out = rendered(&ctx(color), align, &facts);
            let columns: Vec<usize> = out.lines().map(|l| value_column(l, "VALUE")).collect();
            assert_eq!(columns.len(), labels.len());
            assert!(columns.iter().all(|c| *c == columns[0]), "{columns:?}");
            assert_eq!(columns[0], 2 + align);
        }
    }

    #[test]
    fn plain_mode_writes_no_escapes() {
        let out = rendered(&ctx(false), 7, &[("kernel", "6.1.0"), ("os", "Void")]);
        assert!(!out.contains('\x1b'));
        assert_eq!(out, "kernel:  6.1.0\nos:      Void\n");
    }

    #[test]
    fn swatch_has_blank_line_and_no_separator() {
        let ctx = ctx(false);
        let mut r = Renderer::new(&ctx, 3, Vec::new());
        r.emit(&Fact::new("palette", " ").with_label("ab").with_style(FactStyle::Swatch))
            .unwrap();
        assert_eq!(r.lines(), 1);
        assert_eq!(String::from_utf8(r.into_inner()).unwrap(), "\nab \n");
    }

    #[test]
    fn title_joins_user_and_host() {
        let ctx = ctx(true);
        let mut r = Renderer::new(&ctx, 7, Vec::new());
        r.emit(&Fact::new("title", "box").with_label("dylan").with_style(FactStyle::Title))
            .unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(escape::strip(&out), "dylan@box\n");
        assert!(out.starts_with("\x1b[31m\x1b[1m"));
    }
}
