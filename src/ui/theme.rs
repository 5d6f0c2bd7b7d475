use crate::ui::builtin_themes::{find_builtin_theme, ThemeSpec};
use ratatui::style::{Color, Modifier, Style};

/// The four-color set every theme is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
}

impl Palette {
    fn light_fallback() -> Self {
        Palette {
            primary: Color::Rgb(0xff, 0xff, 0xff),
            secondary: Color::Rgb(0xf0, 0xf0, 0xf0),
            accent: Color::Rgb(0x21, 0x96, 0xf3),
            text: Color::Rgb(0x33, 0x33, 0x33),
        }
    }

    fn from_spec(spec: &ThemeSpec) -> Self {
        let fallback = Self::light_fallback();
        Palette {
            primary: parse_hex_color(&spec.primary).unwrap_or(fallback.primary),
            secondary: parse_hex_color(&spec.secondary).unwrap_or(fallback.secondary),
            accent: parse_hex_color(&spec.accent).unwrap_or(fallback.accent),
            text: parse_hex_color(&spec.text).unwrap_or(fallback.text),
        }
    }
}

/// Total over theme names: "light" and "dark" map to their built-in
/// palettes, anything else falls back to light.
pub fn palette_for(name: &str) -> Palette {
    match find_builtin_theme(name) {
        Some(spec) => Palette::from_spec(&spec),
        None => match find_builtin_theme("light") {
            Some(spec) => Palette::from_spec(&spec),
            None => Palette::light_fallback(),
        },
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

/// Widget styles derived from a palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: Color,
    pub transcript_background: Color,
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_text_style: Style,
    pub timestamp_style: Style,
    pub title_style: Style,
    pub waiting_indicator_style: Style,
    pub error_banner_style: Style,
    pub input_border_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        Self::from_palette(palette_for(name))
    }

    pub fn from_palette(palette: Palette) -> Self {
        Theme {
            background_color: palette.primary,
            transcript_background: palette.secondary,
            user_prefix_style: Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(palette.accent),
            bot_text_style: Style::default().fg(palette.text),
            timestamp_style: Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::DIM),
            title_style: Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
            waiting_indicator_style: Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::ITALIC),
            error_banner_style: Style::default()
                .fg(Color::Rgb(0xff, 0xff, 0xff))
                .bg(Color::Rgb(0xd3, 0x2f, 0x2f))
                .add_modifier(Modifier::BOLD),
            input_border_style: Style::default().fg(palette.accent),
            input_text_style: Style::default().fg(palette.text),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}
