//! Theme registry and loader

pub mod gruvbox;
mod nord;

use ratatui::style::Color;
use sectionsnap_core::config::ThemeConfig;

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

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    match config.name.to_lowercase().as_str() {
        "gruvbox-light" => gruvbox::light(),
        "gruvbox-dark" => gruvbox::dark(),
        "nord" => nord::default(),
        other => {
            tracing::warn!(theme = other, "Unknown theme, using gruvbox-dark");
            gruvbox::dark()
        }
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "gruvbox-light", "nord"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("blue").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("ééé").is_none());
    }

    #[test]
    fn test_load_theme_by_name() {
        let config = ThemeConfig::default();
        assert!(matches!(load_theme(&config).bg0, Color::Rgb(0x28, 0x28, 0x28)));

        let config = ThemeConfig {
            name: "Nord".to_string(),
            ..Default::default()
        };
        assert!(matches!(load_theme(&config).bg0, Color::Rgb(0x2e, 0x34, 0x40)));
    }

    #[test]
    fn test_section_colors() {
        let theme = gruvbox::dark();
        assert_eq!(theme.section_color(Some("blue")), theme.blue);
        assert_eq!(theme.section_color(Some("bluegreen")), theme.aqua);
        assert_eq!(theme.section_color(Some("#010203")), Color::Rgb(1, 2, 3));
        assert_eq!(theme.section_color(Some("mauve")), theme.accent);
        assert_eq!(theme.section_color(None), theme.accent);
    }
}
