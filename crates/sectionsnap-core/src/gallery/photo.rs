use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default dimensions reported for remote images
const DEFAULT_WIDTH: u32 = 1200;
const DEFAULT_HEIGHT: u32 = 800;

/// One gallery photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub full_image: String,
    pub srcset: String,
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub date: Option<String>,
    pub date_display: Option<String>,
}

impl Photo {
    /// Build a photo from a remote file name and its raw download URL
    pub fn from_file_name(name: &str, full_url: &str) -> Self {
        let title = title_from_file_name(name);
        let date = date_from_file_name(name);

        Self {
            full_image: full_url.to_string(),
            srcset: full_url.to_string(),
            src: full_url.to_string(),
            alt: title.clone(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title,
            date: date.map(|d| d.format("%Y-%m-%d").to_string()),
            date_display: date.map(format_date),
        }
    }

    /// Title plus display date when known
    pub fn caption(&self) -> String {
        match &self.date_display {
            Some(display) => format!("{} — {}", self.title, display),
            None => self.title.clone(),
        }
    }
}

fn date_prefix() -> &'static Regex {
    static DATE_PREFIX: OnceLock<Regex> = OnceLock::new();
    DATE_PREFIX.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").expect("valid date regex"))
}

/// Whether a file name looks like a displayable image
pub fn is_image_file(name: &str) -> bool {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    IMAGE
        .get_or_init(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("valid image regex"))
        .is_match(name)
}

/// Human title from a file name like `2025-07-12_sunset-at-the-bay.jpg`
pub fn title_from_file_name(name: &str) -> String {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    let extension =
        EXTENSION.get_or_init(|| Regex::new(r"\.[^/.]+$").expect("valid extension regex"));

    let stem = extension.replace(name, "");
    let stem = date_prefix().replace(&stem, "");
    let spaced = stem.replace(['-', '_'], " ");

    spaced
        .trim()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Date encoded as a `YYYY-MM-DD` file name prefix
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let prefix = date_prefix().captures(name)?.get(1)?.as_str();
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// `July 12, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Built-in photos shown when no gallery data can be obtained
pub fn fallback_photos() -> Vec<Photo> {
    vec![
        Photo {
            full_image: "images/sea-1600.jpg".to_string(),
            srcset: "images/sea-800.jpg 800w, images/sea-1200.jpg 1200w".to_string(),
            src: "images/sea-800.jpg".to_string(),
            alt: "Golden sunset over calm bay with a small sailboat on the horizon".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: "Sunset at the bay".to_string(),
            date: Some("2025-07-12".to_string()),
            date_display: Some("July 12, 2025".to_string()),
        },
        Photo {
            full_image: "images/forest-1600.jpg".to_string(),
            srcset: "images/forest-800.jpg 800w, images/forest-1200.jpg 1200w".to_string(),
            src: "images/forest-800.jpg".to_string(),
            alt: "Person walking a shaded trail among tall redwood trees".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: "Misty redwood trail".to_string(),
            date: None,
            date_display: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_dated_file_name() {
        assert_eq!(title_from_file_name("2025-07-12_sunset-at-the-bay.jpg"), "Sunset At The Bay");
        assert_eq!(title_from_file_name("misty_redwood.trail.png"), "Misty Redwood.trail");
        assert_eq!(title_from_file_name("forest.webp"), "Forest");
    }

    #[test]
    fn test_date_parsing() {
        let photo = Photo::from_file_name("2025-07-12-sea.jpg", "https://example.com/a.jpg");
        assert_eq!(photo.date.as_deref(), Some("2025-07-12"));
        assert_eq!(photo.date_display.as_deref(), Some("July 12, 2025"));
        assert_eq!(photo.caption(), "Sea — July 12, 2025");

        // Not a real calendar date
        assert_eq!(date_from_file_name("2025-13-40-x.jpg"), None);
        assert_eq!(date_from_file_name("sea.jpg"), None);
    }

    #[test]
    fn test_photo_defaults() {
        let photo = Photo::from_file_name("sea.jpg", "https://example.com/sea.jpg");
        assert_eq!(photo.width, 1200);
        assert_eq!(photo.height, 800);
        assert_eq!(photo.src, photo.full_image);
        assert_eq!(photo.alt, "Sea");
        assert_eq!(photo.caption(), "Sea");
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("a.JPG"));
        assert!(is_image_file("b.webp"));
        assert!(!is_image_file("README.md"));
        assert!(!is_image_file("jpg"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&fallback_photos()[0]).unwrap();
        assert!(json.contains("\"fullImage\""));
        assert!(json.contains("\"dateDisplay\""));
    }
}
