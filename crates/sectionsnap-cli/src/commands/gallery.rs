use anyhow::Result;

use sectionsnap_core::gallery::{GalleryCache, GalleryFetcher, GithubSource, Photo};
use sectionsnap_core::AppConfig;

/// Photos for the configured gallery, read through the local cache
pub async fn fetch_photos(config: &AppConfig) -> sectionsnap_core::Result<Vec<Photo>> {
    let source = GithubSource::new(&config.gallery)?;
    let cache = GalleryCache::new(config.gallery_cache_path());
    GalleryFetcher::new(source, cache).fetch().await
}

pub async fn run(config: &AppConfig, clear: bool) -> Result<()> {
    if clear {
        GalleryCache::new(config.gallery_cache_path()).clear()?;
        println!("Gallery cache cleared.");
        return Ok(());
    }

    println!(
        "Fetching gallery {}/{} ({})...",
        config.gallery.owner, config.gallery.repo, config.gallery.branch
    );
    let photos = fetch_photos(config).await?;

    if photos.is_empty() {
        println!("No photos found.");
        return Ok(());
    }

    println!("Photos ({}):\n", photos.len());
    for (i, photo) in photos.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, photo.caption());
        println!("       {}", photo.full_image);
    }

    Ok(())
}
