//! Color swatch of the first six terminal colors

use crate::config::Context;
use crate::data::{Fact, FactStyle};

pub fn palette(ctx: &Context) -> Option<Fact> {
    let e = ctx.escapes();

    // Reverse video turns each foreground color into a background block.
    let mut swatch = e.reverse();
    for index in 1..=6 {
        let color = e.fg(index);
        swatch.push_str(&format!("{color} {color} "));
    }
    swatch.push_str(&e.reset());

    // The value is only a marker; the swatch lives in the label.
    Some(Fact::new("palette", " ").with_label(swatch).with_style(FactStyle::Swatch))
}
