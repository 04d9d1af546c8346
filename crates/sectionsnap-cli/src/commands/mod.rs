pub mod gallery;
pub mod run;
pub mod sections;
pub mod simulate;

use anyhow::Result;
use sectionsnap_core::article::ArticleLibrary;
use sectionsnap_core::AppConfig;

/// Articles from the configured directory; a missing directory is an empty page
pub fn load_library(config: &AppConfig) -> Result<ArticleLibrary> {
    let dir = config.article_dir();
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "Article directory not found");
        return Ok(ArticleLibrary::default());
    }
    Ok(ArticleLibrary::load(&dir)?)
}
