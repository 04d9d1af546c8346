use anyhow::Result;

use sectionsnap_core::gallery::GalleryCache;
use sectionsnap_core::AppConfig;
use sectionsnap_tui::page::{GalleryState, LineKind, PageLayout};

pub fn run(config: &AppConfig, width: u16, height: u16) -> Result<()> {
    let library = super::load_library(config)?;

    // Only cached gallery data; this command never touches the network
    let photos = if config.gallery.enabled {
        GalleryCache::new(config.gallery_cache_path())
            .load()
            .map(|c| c.photos)
    } else {
        None
    };
    let gallery = match (&photos, config.gallery.enabled) {
        (_, false) => GalleryState::Disabled,
        (Some(_), true) => GalleryState::Ready,
        (None, true) => GalleryState::Loading,
    };
    let photos = photos.unwrap_or_default();

    let layout = PageLayout::build(&library, &gallery, &photos, width.saturating_sub(2), height);

    if layout.sections.is_empty() {
        println!("No sections. Put article files in {}", config.article_dir().display());
        return Ok(());
    }

    println!(
        "Sections ({}), viewport {} rows, document {} rows:\n",
        layout.sections.len(),
        height,
        layout.document_height
    );
    for (i, section) in layout.sections.iter().enumerate() {
        let title = layout
            .lines
            .iter()
            .find(|l| l.section == i && l.kind == LineKind::Title)
            .map(|l| l.text.as_str())
            .unwrap_or("(untitled)");
        let tall = if section.height > config.snap.tall_section_multiplier * height as f64 {
            " [free scroll]"
        } else {
            ""
        };
        println!(
            "  {:>3}  start {:>6}  height {:>5}  {}{}",
            i, section.start_offset, section.height, title, tall
        );
    }

    Ok(())
}
