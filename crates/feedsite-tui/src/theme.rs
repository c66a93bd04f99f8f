use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,

    // Semantic colors
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            red: Color::Rgb(0xea, 0x69, 0x62),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

impl Theme {
    /// Fade a foreground color towards the background by `opacity` (0..=1)
    ///
    /// Terminals have no alpha channel, so caption lines blend their RGB
    /// value instead. Non-RGB colors are returned unchanged.
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        match (color, self.bg0) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let t = opacity.clamp(0.0, 1.0);
                let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * t).round() as u8;
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            _ => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_blends_towards_background() {
        let theme = Theme::default();
        assert_eq!(theme.fade(theme.fg0, 1.0), theme.fg0);
        assert_eq!(theme.fade(theme.fg0, 0.0), theme.bg0);
        assert_eq!(theme.fade(Color::Reset, 0.5), Color::Reset);
    }
}
