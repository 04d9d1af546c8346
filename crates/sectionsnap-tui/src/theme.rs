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
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,

    // Semantic colors
    pub selection: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox::dark()
    }
}

impl Theme {
    /// Color for an active-section class
    ///
    /// Named classes map onto the palette; anything else is tried as a hex
    /// color before falling back to the accent.
    pub fn section_color(&self, class: Option<&str>) -> Color {
        match class {
            Some("blue") => self.blue,
            Some("yellow") => self.yellow,
            Some("green") => self.green,
            Some("bluegreen") => self.aqua,
            Some("red") => self.red,
            Some(other) => crate::themes::parse_hex_color(other).unwrap_or(self.accent),
            None => self.accent,
        }
    }
}
