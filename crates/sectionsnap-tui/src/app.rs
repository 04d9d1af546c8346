use std::sync::Arc;
use std::time::Instant;

use sectionsnap_core::article::ArticleLibrary;
use sectionsnap_core::gallery::{fallback_photos, Lightbox, Photo};
use sectionsnap_core::snap::{AnimateOutcome, Phase, ScrollResponse, ScrollSurface, StepOutcome};
use sectionsnap_core::{AppConfig, Controller, ThemeSideEffect};

use crate::event::{FrameClock, GalleryLoadResult};
use crate::page::{GalleryState, PageLayout, PageSurface};
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reading the page
    Normal,
    /// A photo is shown over the page
    Lightbox,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Colors used by the widgets
    pub theme: Theme,
    /// Articles shown on the page, newest first
    pub library: ArticleLibrary,
    /// Section snap engine for the page
    pub controller: Controller,
    /// Page rows and scroll position
    pub surface: PageSurface,
    /// Gallery photos (remote, cached or fallback)
    pub photos: Vec<Photo>,
    pub gallery: GalleryState,
    /// Gallery entry that has keyboard focus
    pub selected_photo: usize,
    pub lightbox: Lightbox,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Page area size as (width, height)
    area: (u16, u16),
    frame_clock: FrameClock,
}

impl App {
    pub fn new(config: Arc<AppConfig>, library: ArticleLibrary, theme: Theme) -> Self {
        let palette = ThemeSideEffect::new(config.ui.theme.palette.clone());
        let controller = Controller::new(config.snap, palette);
        let frame_clock = FrameClock::new(config.ui.animation_fps);
        let gallery = if config.gallery.enabled {
            GalleryState::Loading
        } else {
            GalleryState::Disabled
        };

        Self {
            config,
            theme,
            library,
            controller,
            surface: PageSurface::new(),
            photos: Vec::new(),
            gallery,
            selected_photo: 0,
            lightbox: Lightbox::new(),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            area: (0, 0),
            frame_clock,
        }
    }

    /// Lay out the page for the first time and seed the current section
    pub fn start(&mut self, width: u16, height: u16) {
        self.area = (width, height);
        self.relayout();
        self.controller.start(&mut self.surface);
    }

    /// Page area changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.area == (width, height) {
            return;
        }
        self.area = (width, height);
        self.relayout();
        self.controller.on_resize(&mut self.surface);
    }

    fn relayout(&mut self) {
        let (width, height) = self.area;
        // Two columns go to the section marker gutter
        let layout = PageLayout::build(
            &self.library,
            &self.gallery,
            &self.photos,
            width.saturating_sub(2),
            height,
        );
        self.surface.set_layout(layout, height);
    }

    /// Whether manual scrolling is accepted right now
    pub fn accepts_scroll_input(&self) -> bool {
        self.mode != Mode::Help
            && !self.lightbox.blocks_scroll()
            && self.controller.phase() == Phase::Idle
    }

    /// Scroll by `rows` and let the controller react
    pub fn scroll_by(&mut self, rows: i32) -> Option<ScrollResponse> {
        if !self.accepts_scroll_input() {
            return None;
        }
        let before = self.surface.scroll_offset();
        self.surface.scroll_by(rows);
        if self.surface.scroll_offset() == before {
            return None;
        }
        Some(self.controller.on_scroll(&mut self.surface))
    }

    pub fn scroll_lines_down(&mut self) {
        self.scroll_by(self.config.ui.scroll_lines as i32);
    }

    pub fn scroll_lines_up(&mut self) {
        self.scroll_by(-(self.config.ui.scroll_lines as i32));
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_by((self.surface.viewport_rows() / 2).max(1) as i32);
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_by(-((self.surface.viewport_rows() / 2).max(1) as i32));
    }

    /// Snap to the section after the active one
    pub fn next_section(&mut self) -> AnimateOutcome {
        self.snap_by(1)
    }

    /// Snap to the section before the active one
    pub fn prev_section(&mut self) -> AnimateOutcome {
        self.snap_by(-1)
    }

    fn snap_by(&mut self, delta: isize) -> AnimateOutcome {
        if self.mode != Mode::Normal {
            return AnimateOutcome::Dropped;
        }
        self.controller.snap_by(delta, &mut self.surface)
    }

    pub fn jump_to_top(&mut self) -> AnimateOutcome {
        self.controller.snap_to(0, &mut self.surface)
    }

    pub fn jump_to_bottom(&mut self) -> AnimateOutcome {
        let last = self.controller.sections().len().saturating_sub(1);
        self.controller.snap_to(last, &mut self.surface)
    }

    /// Advance the snap animation by one frame
    pub fn tick(&mut self) -> StepOutcome {
        if !self.controller.needs_frame() {
            return StepOutcome::Idle;
        }
        self.controller.on_frame(&mut self.surface)
    }

    /// Step the snap animation if a frame is due at `now`
    ///
    /// Called once per loop iteration whatever event woke the loop, so a
    /// stream of input events cannot starve the animation.
    pub fn update_snap_animation(&mut self, now: Instant) -> StepOutcome {
        if !self.controller.needs_frame() {
            self.frame_clock.reset();
            return StepOutcome::Idle;
        }
        if !self.frame_clock.take_frame(now) {
            return StepOutcome::Continue;
        }
        self.tick()
    }

    /// Whether the next poll should wait only one animation frame
    pub fn needs_fast_update(&self) -> bool {
        self.controller.needs_frame()
    }

    /// Install the gallery result and re-measure the page around it
    pub fn apply_gallery(&mut self, result: GalleryLoadResult) {
        match result {
            GalleryLoadResult::Loaded(photos) if !photos.is_empty() => {
                tracing::info!(count = photos.len(), "Gallery loaded");
                self.photos = photos;
                self.gallery = GalleryState::Ready;
            }
            GalleryLoadResult::Loaded(_) => {
                self.photos = fallback_photos();
                self.gallery = GalleryState::Failed("gallery is empty".to_string());
            }
            GalleryLoadResult::Failed(error) => {
                tracing::warn!(error = %error, "Gallery unavailable, showing fallback photos");
                self.set_status(format!("Gallery unavailable: {}", error));
                self.photos = fallback_photos();
                self.gallery = GalleryState::Failed(error);
            }
        }
        self.selected_photo = self.selected_photo.min(self.photos.len().saturating_sub(1));
        if self.lightbox.current().is_some_and(|i| i >= self.photos.len()) {
            self.close_lightbox();
        }

        self.relayout();
        self.controller.recalculate(&mut self.surface);
    }

    pub fn select_next_photo(&mut self) {
        if !self.photos.is_empty() {
            self.selected_photo = (self.selected_photo + 1) % self.photos.len();
        }
    }

    pub fn select_prev_photo(&mut self) {
        if !self.photos.is_empty() {
            self.selected_photo = (self.selected_photo + self.photos.len() - 1) % self.photos.len();
        }
    }

    /// Show the focused gallery photo in the lightbox
    pub fn open_lightbox(&mut self) {
        if self.lightbox.open(self.selected_photo, self.photos.len()) {
            self.mode = Mode::Lightbox;
        } else {
            self.set_status("No photos to show");
        }
    }

    /// Hide the lightbox; focus returns to the photo that was shown
    pub fn close_lightbox(&mut self) {
        if let Some(index) = self.lightbox.close() {
            self.selected_photo = index;
        }
        if self.mode == Mode::Lightbox {
            self.mode = Mode::Normal;
        }
    }

    pub fn lightbox_next(&mut self) {
        self.lightbox.next(self.photos.len());
    }

    pub fn lightbox_prev(&mut self) {
        self.lightbox.prev(self.photos.len());
    }

    /// Photo the lightbox shows, or the focused gallery entry
    pub fn current_photo(&self) -> Option<&Photo> {
        let index = self.lightbox.current().unwrap_or(self.selected_photo);
        self.photos.get(index)
    }

    /// Open the full-size image in the system viewer
    pub fn open_full_image(&mut self) {
        let Some(url) = self.current_photo().map(|p| p.full_image.clone()) else {
            return;
        };
        match open::that(&url) {
            Ok(()) => self.set_status(format!("Opened {}", url)),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to open image");
                self.lightbox.mark_load_failed();
                self.set_status(format!("Failed to open image: {}", e));
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            Mode::Normal => Mode::Help,
            Mode::Lightbox => Mode::Lightbox,
        };
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}
