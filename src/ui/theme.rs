use ratatui::style::Color;

use crate::calendar::FALLBACK_COLOR;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub slot_label: Color,
    pub weekday_header: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub active_field: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            slot_label: Color::DarkGray,
            weekday_header: Color::Yellow,
            status_bar: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            active_field: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Terminal color for a team color string, falling back to the neutral gray.
    pub fn team_color(&self, color: &str) -> Color {
        parse_hex_color(color)
            .or_else(|| parse_hex_color(FALLBACK_COLOR))
            .unwrap_or(Color::Gray)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Parses `#rgb` or `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                *slot = channel(&c.to_string())? * 17;
            }
            Some(Color::Rgb(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
            if luma > 128_000 { Color::Black } else { Color::White }
        }
        _ => Color::White,
    }
}
