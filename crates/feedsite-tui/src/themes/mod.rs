//! Built-in themes and user overrides

use feedsite_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config, falling back to gruvbox-dark
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => Theme::default(),
        "nord" => nord(),
        "dracula" => dracula(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&mut Color, &Option<String>); 11] = [
        (&mut theme.bg0, &overrides.bg0),
        (&mut theme.bg1, &overrides.bg1),
        (&mut theme.bg2, &overrides.bg2),
        (&mut theme.fg0, &overrides.fg0),
        (&mut theme.fg1, &overrides.fg1),
        (&mut theme.accent, &overrides.accent),
        (&mut theme.selection, &overrides.selection),
        (&mut theme.error, &overrides.error),
        (&mut theme.success, &overrides.success),
        (&mut theme.warning, &overrides.warning),
        (&mut theme.info, &overrides.info),
    ];

    for (slot, hex) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
    theme
}

/// https://www.nordtheme.com/
fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xec, 0xef, 0xf4),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey0: Color::Rgb(0x4c, 0x56, 0x6a),
        grey1: Color::Rgb(0x5e, 0x68, 0x7a),
        red: Color::Rgb(0xbf, 0x61, 0x6a),
        yellow: Color::Rgb(0xeb, 0xcb, 0x8b),
        green: Color::Rgb(0xa3, 0xbe, 0x8c),
        blue: Color::Rgb(0x88, 0xc0, 0xd0),
        selection: Color::Rgb(0x43, 0x4c, 0x5e),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        success: Color::Rgb(0xa3, 0xbe, 0x8c),
        warning: Color::Rgb(0xd0, 0x87, 0x70),
        info: Color::Rgb(0x88, 0xc0, 0xd0),
        accent: Color::Rgb(0x8f, 0xbc, 0xbb),
    }
}

/// https://draculatheme.com/
fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg1: Color::Rgb(0x34, 0x37, 0x46),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xe2, 0xe2, 0xdc),
        grey0: Color::Rgb(0x62, 0x72, 0xa4),
        grey1: Color::Rgb(0x7a, 0x86, 0xb6),
        red: Color::Rgb(0xff, 0x55, 0x55),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        blue: Color::Rgb(0x8b, 0xe9, 0xfd),
        selection: Color::Rgb(0x44, 0x47, 0x5a),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
        warning: Color::Rgb(0xff, 0xb8, 0x6c),
        info: Color::Rgb(0x8b, 0xe9, 0xfd),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_load_theme_with_overrides() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#010203".to_string()),
                error: Some("not a color".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.error, nord().error);
        assert_eq!(theme.bg0, nord().bg0);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config).bg0, Theme::default().bg0);
    }
}
