use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (gallery cache lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding one file per article
    #[serde(default = "default_article_dir")]
    pub article_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            article_dir: default_article_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Tuning knobs for the section snap engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Fraction of the remaining distance covered per frame, in (0, 1]
    #[serde(default = "default_easing_factor")]
    pub easing_factor: f64,
    /// Fraction of the viewport the next section must occupy before it wins
    #[serde(default = "default_next_section_visibility_threshold")]
    pub next_section_visibility_threshold: f64,
    /// Sections taller than this many viewports allow free scrolling inside
    #[serde(default = "default_tall_section_multiplier")]
    pub tall_section_multiplier: f64,
    /// Margin (fraction of viewport) around a tall section's edges that still snaps
    #[serde(default = "default_edge_hysteresis_ratio")]
    pub edge_hysteresis_ratio: f64,
    /// How far above a section start the initial scroll position may sit
    /// and still seed that section as current
    #[serde(default = "default_seed_tolerance")]
    pub seed_tolerance: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            easing_factor: default_easing_factor(),
            next_section_visibility_threshold: default_next_section_visibility_threshold(),
            tall_section_multiplier: default_tall_section_multiplier(),
            edge_hysteresis_ratio: default_edge_hysteresis_ratio(),
            seed_tolerance: default_seed_tolerance(),
        }
    }
}

impl SnapConfig {
    /// Return a copy with every knob forced into its usable range
    pub fn validated(&self) -> Self {
        let easing_factor = if self.easing_factor.is_finite() && self.easing_factor > 0.0 {
            self.easing_factor.min(1.0)
        } else {
            default_easing_factor()
        };

        Self {
            easing_factor,
            next_section_visibility_threshold: finite_or(
                self.next_section_visibility_threshold,
                default_next_section_visibility_threshold(),
            )
            .clamp(0.0, 1.0),
            tall_section_multiplier: finite_or(
                self.tall_section_multiplier,
                default_tall_section_multiplier(),
            )
            .max(1.0),
            edge_hysteresis_ratio: finite_or(
                self.edge_hysteresis_ratio,
                default_edge_hysteresis_ratio(),
            )
            .clamp(0.0, 0.5),
            seed_tolerance: finite_or(self.seed_tolerance, default_seed_tolerance()).max(0.0),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate used while a snap animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Lines moved by a single scroll step
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            scroll_lines: default_scroll_lines(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with a palette
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Section classes cycled by active section index
    pub palette: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            palette: default_palette(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'palette'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    palette: default_palette(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut palette: Option<Vec<String>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "palette" => {
                            palette = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    palette: palette
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(default_palette),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Fetch the remote gallery at startup
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Repository owner
    #[serde(default = "default_gallery_owner")]
    pub owner: String,
    /// Repository name
    #[serde(default = "default_gallery_repo")]
    pub repo: String,
    /// Directory inside the repository (empty for root)
    #[serde(default)]
    pub path: String,
    /// Branch name
    #[serde(default = "default_gallery_branch")]
    pub branch: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            owner: default_gallery_owner(),
            repo: default_gallery_repo(),
            path: String::new(),
            branch: default_gallery_branch(),
            request_timeout_secs: default_timeout(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sectionsnap")
}

fn default_article_dir() -> PathBuf {
    PathBuf::from("articles")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_easing_factor() -> f64 {
    0.15
}

fn default_next_section_visibility_threshold() -> f64 {
    0.5
}

fn default_tall_section_multiplier() -> f64 {
    1.5
}

fn default_edge_hysteresis_ratio() -> f64 {
    0.3
}

fn default_seed_tolerance() -> f64 {
    100.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_palette() -> Vec<String> {
    ["blue", "yellow", "green", "bluegreen"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_gallery_owner() -> String {
    "petejscott".to_string()
}

fn default_gallery_repo() -> String {
    "dreamtigers-gallery".to_string()
}

fn default_gallery_branch() -> String {
    "main".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/sectionsnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sectionsnap")
            .join("config.toml")
    }

    /// Get the gallery cache file path
    pub fn gallery_cache_path(&self) -> PathBuf {
        self.data_dir().join("gallery_cache.json")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the article directory (with tilde expansion)
    pub fn article_dir(&self) -> PathBuf {
        expand_tilde(&self.general.article_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snap_config() {
        let config = SnapConfig::default();
        assert_eq!(config.easing_factor, 0.15);
        assert_eq!(config.next_section_visibility_threshold, 0.5);
        assert_eq!(config.tall_section_multiplier, 1.5);
        assert_eq!(config.edge_hysteresis_ratio, 0.3);
    }

    #[test]
    fn test_validated_clamps_out_of_range() {
        let config = SnapConfig {
            easing_factor: 3.0,
            edge_hysteresis_ratio: 0.9,
            tall_section_multiplier: 0.2,
            ..Default::default()
        }
        .validated();
        assert_eq!(config.easing_factor, 1.0);
        assert_eq!(config.edge_hysteresis_ratio, 0.5);
        assert_eq!(config.tall_section_multiplier, 1.0);

        let config = SnapConfig {
            easing_factor: 0.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(config.easing_factor, 0.15);
    }

    #[test]
    fn test_theme_accepts_string_or_map() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.theme.palette.len(), 4);

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"nord\"\npalette = [\"green\", \"blue\"]\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.palette, vec!["green", "blue"]);
    }

    #[test]
    fn test_partial_snap_section_uses_defaults() {
        let config = AppConfig::from_toml("[snap]\nedge_hysteresis_ratio = 0.4\n").unwrap();
        assert_eq!(config.snap.edge_hysteresis_ratio, 0.4);
        assert_eq!(config.snap.easing_factor, 0.15);
        assert!(config.gallery.enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[snap\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
