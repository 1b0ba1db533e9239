use crate::formatting::Tone;
use crate::page::{Page, Pill, StyleSheet};
use colored::{ColoredString, Colorize};

/// Draws a container's pills as one terminal line, or `None` when the
/// container does not exist. Tone colors come from the page's most
/// recently injected style sheet; without one (or with an unparsable
/// color) the bright green/red defaults apply. Reads the page model;
/// never mutates it.
#[must_use]
pub fn render_bar(page: &Page, container_id: &str) -> Option<String> {
    let pills = page.pills(container_id)?;
    let sheet = page.latest_style_sheet();
    let rendered: Vec<String> = pills
        .iter()
        .map(|pill| render_pill(pill, sheet.as_ref()))
        .collect();
    Some(rendered.join(&format!(" {} ", "|".bright_black())))
}

fn render_pill(pill: &Pill, sheet: Option<&StyleSheet>) -> String {
    format!(
        "{} {}",
        pill.label().bold(),
        colorize(&pill.value(), pill.tone(), sheet)
    )
}

fn colorize(value: &str, tone: Option<Tone>, sheet: Option<&StyleSheet>) -> ColoredString {
    let Some(tone) = tone else {
        return value.bright_white();
    };
    let sheet_color = sheet
        .map(|sheet| match tone {
            Tone::Positive => sheet.positive_color,
            Tone::Negative => sheet.negative_color,
        })
        .and_then(hex_rgb);
    let colored = match (sheet_color, tone) {
        (Some((r, g, b)), _) => value.truecolor(r, g, b),
        (None, Tone::Positive) => value.bright_green(),
        (None, Tone::Negative) => value.bright_red(),
    };
    if sheet.is_none_or(|sheet| sheet.bold) {
        colored.bold()
    } else {
        colored
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some((
        u8::try_from(value >> 16).ok()?,
        u8::try_from((value >> 8) & 0xff).ok()?,
        u8::try_from(value & 0xff).ok()?,
    ))
}
