//! Long-page layout and the scroll surface the snap controller drives
//!
//! Articles and the gallery are stacked into one column of terminal rows.
//! Each article and the gallery form one snap section. Rows are the unit of
//! geometry, so section offsets are whole numbers.

use sectionsnap_core::article::ArticleLibrary;
use sectionsnap_core::gallery::Photo;
use sectionsnap_core::snap::{LayoutSource, ScrollSurface, SnapHost, TargetGeometry};
use sectionsnap_core::theme::ThemeChange;

/// What a rendered row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Body,
    Blank,
    Notice,
    /// Gallery entry for the photo at this index
    Photo(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub text: String,
    pub kind: LineKind,
    /// Section this row belongs to
    pub section: usize,
}

/// Gallery loading state as shown on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Disabled,
    Loading,
    Ready,
    /// Remote gallery failed; the photo list holds fallback photos
    Failed(String),
}

/// Rows of the whole page plus the geometry of its sections
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<PageLine>,
    pub sections: Vec<TargetGeometry>,
    /// Rows of real content
    pub content_height: usize,
    /// Content plus bottom padding
    pub document_height: usize,
}

impl PageLayout {
    /// Lay out articles followed by the gallery for a given text width
    ///
    /// Bottom padding is added so the last section can reach the top of the
    /// viewport.
    pub fn build(
        library: &ArticleLibrary,
        gallery: &GalleryState,
        photos: &[Photo],
        width: u16,
        viewport_height: u16,
    ) -> Self {
        let mut layout = Self::default();
        let width = width.max(10) as usize;

        for article in library.articles() {
            let title = article.title().unwrap_or_else(|_| article.id().to_string());
            let body = match article.plain_text(width) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(id = article.id(), error = %e, "Failed to render article");
                    format!("Unable to load article: {}", e)
                }
            };

            layout.begin_section();
            layout.push(title, LineKind::Title);
            layout.push(String::new(), LineKind::Blank);
            for line in body.trim_end().lines() {
                layout.push(line.to_string(), LineKind::Body);
            }
            layout.push(String::new(), LineKind::Blank);
            layout.end_section();
        }

        if *gallery != GalleryState::Disabled {
            layout.begin_section();
            layout.push("Gallery".to_string(), LineKind::Title);
            layout.push(String::new(), LineKind::Blank);
            match gallery {
                GalleryState::Loading => {
                    layout.push("Loading gallery...".to_string(), LineKind::Notice);
                }
                GalleryState::Failed(error) => {
                    layout.push(format!("Gallery unavailable: {}", error), LineKind::Notice);
                    layout.push(String::new(), LineKind::Blank);
                }
                _ => {}
            }
            if *gallery != GalleryState::Loading {
                for (i, photo) in photos.iter().enumerate() {
                    layout.push(format!("{:>3}. {}", i + 1, photo.caption()), LineKind::Photo(i));
                }
            }
            layout.push(String::new(), LineKind::Blank);
            layout.end_section();
        }

        layout.content_height = layout.lines.len();
        let reach_last = layout
            .sections
            .last()
            .map(|s| s.start_offset as usize + viewport_height as usize)
            .unwrap_or(0);
        layout.document_height = layout.content_height.max(reach_last);
        layout
    }

    fn begin_section(&mut self) {
        self.sections
            .push(TargetGeometry::new(self.lines.len() as f64, 0.0));
    }

    fn end_section(&mut self) {
        let end = self.lines.len() as f64;
        if let Some(section) = self.sections.last_mut() {
            section.height = end - section.start_offset;
        }
    }

    fn push(&mut self, text: String, kind: LineKind) {
        let section = self.sections.len().saturating_sub(1);
        self.lines.push(PageLine { text, kind, section });
    }

    /// Row of the gallery entry for a photo
    pub fn photo_row(&self, index: usize) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.kind == LineKind::Photo(index))
    }
}

/// Scrollable view over a `PageLayout`
#[derive(Debug, Clone, Default)]
pub struct PageSurface {
    layout: PageLayout,
    scroll: f64,
    viewport_height: u16,
    active: Option<usize>,
    accent_class: Option<String>,
}

impl PageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Replace the layout, keeping the scroll offset where it still fits
    pub fn set_layout(&mut self, layout: PageLayout, viewport_height: u16) {
        self.layout = layout;
        self.viewport_height = viewport_height;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    pub fn max_scroll(&self) -> f64 {
        (self.layout.document_height as f64 - self.viewport_height as f64).max(0.0)
    }

    /// First visible row
    pub fn top_row(&self) -> usize {
        self.scroll.round().max(0.0) as usize
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_height
    }

    /// Move by whole rows as user input would
    pub fn scroll_by(&mut self, rows: i32) {
        let target = self.scroll + rows as f64;
        self.scroll_to(target);
    }

    pub fn active_section(&self) -> Option<usize> {
        self.active
    }

    pub fn accent_class(&self) -> Option<&str> {
        self.accent_class.as_deref()
    }
}

impl LayoutSource for PageSurface {
    fn snap_targets(&self) -> Vec<TargetGeometry> {
        self.layout.sections.clone()
    }

    fn document_height(&self) -> f64 {
        self.layout.document_height as f64
    }
}

impl ScrollSurface for PageSurface {
    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn scroll_to(&mut self, offset: f64) {
        if offset.is_finite() {
            self.scroll = offset.clamp(0.0, self.max_scroll());
        }
    }
}

impl SnapHost for PageSurface {
    fn viewport_height(&self) -> f64 {
        self.viewport_height as f64
    }

    fn on_active_section(&mut self, index: Option<usize>, change: &ThemeChange) {
        tracing::trace!(?index, class = ?change.added, "Active section changed");
        self.active = index;
        self.accent_class = change.added.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectionsnap_core::article::Article;
    use sectionsnap_core::gallery::fallback_photos;

    fn library() -> ArticleLibrary {
        ArticleLibrary::from_articles(vec![
            Article::with_contents("b.html", "<h1>Second</h1><p>one</p><p>two</p>"),
            Article::with_contents("a.html", "<h1>First</h1><p>only</p>"),
        ])
    }

    #[test]
    fn test_sections_tile_the_content() {
        let layout = PageLayout::build(&library(), &GalleryState::Ready, &fallback_photos(), 40, 10);

        assert_eq!(layout.sections.len(), 3);
        assert_eq!(layout.sections[0].start_offset, 0.0);
        for pair in layout.sections.windows(2) {
            assert_eq!(pair[0].start_offset + pair[0].height, pair[1].start_offset);
        }
        let last = layout.sections.last().unwrap();
        assert_eq!((last.start_offset + last.height) as usize, layout.content_height);
        assert_eq!(layout.lines[0].kind, LineKind::Title);
        assert!(layout.photo_row(1).is_some());
    }

    #[test]
    fn test_bottom_padding_lets_last_section_reach_top() {
        let layout = PageLayout::build(&library(), &GalleryState::Ready, &fallback_photos(), 40, 30);
        let last = layout.sections.last().unwrap();
        assert!(layout.document_height >= last.start_offset as usize + 30);

        let mut surface = PageSurface::new();
        surface.set_layout(layout.clone(), 30);
        surface.scroll_to(last.start_offset);
        assert_eq!(surface.scroll_offset(), last.start_offset);
    }

    #[test]
    fn test_loading_gallery_has_no_photo_rows() {
        let layout = PageLayout::build(&library(), &GalleryState::Loading, &fallback_photos(), 40, 10);
        assert!(layout.photo_row(0).is_none());
        assert!(layout.lines.iter().any(|l| l.kind == LineKind::Notice));

        let layout = PageLayout::build(&library(), &GalleryState::Disabled, &[], 40, 10);
        assert_eq!(layout.sections.len(), 2);
    }

    #[test]
    fn test_surface_clamps_scroll() {
        let layout = PageLayout::build(&library(), &GalleryState::Disabled, &[], 40, 5);
        let mut surface = PageSurface::new();
        surface.set_layout(layout, 5);

        surface.scroll_by(-3);
        assert_eq!(surface.scroll_offset(), 0.0);
        surface.scroll_to(f64::MAX);
        assert_eq!(surface.scroll_offset(), surface.max_scroll());
        surface.scroll_to(f64::NAN);
        assert_eq!(surface.scroll_offset(), surface.max_scroll());
    }
}
