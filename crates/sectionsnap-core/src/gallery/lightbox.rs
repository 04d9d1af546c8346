//! Lightbox state
//!
//! Shows one photo at a time over the page. Opening remembers which gallery
//! entry triggered it so focus can return there on close; navigating moves
//! that trigger along. While open, page scrolling is suspended.

use super::photo::Photo;

const LOAD_FAILED_CAPTION: &str = "Image failed to load.";

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    current: Option<usize>,
    load_failed: bool,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Whether page scroll input should be ignored
    #[inline]
    pub fn blocks_scroll(&self) -> bool {
        self.is_open()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Show photo `index` of `count`. Returns false for an index past the end.
    pub fn open(&mut self, index: usize, count: usize) -> bool {
        if index >= count {
            return false;
        }
        self.current = Some(index);
        self.load_failed = false;
        true
    }

    /// Hide the lightbox, returning the entry focus goes back to
    pub fn close(&mut self) -> Option<usize> {
        self.load_failed = false;
        self.current.take()
    }

    /// Move to the next photo, wrapping
    pub fn next(&mut self, count: usize) {
        self.step(1, count);
    }

    /// Move to the previous photo, wrapping
    pub fn prev(&mut self, count: usize) {
        self.step(-1, count);
    }

    fn step(&mut self, delta: isize, count: usize) {
        let Some(current) = self.current else {
            return;
        };
        if count == 0 {
            self.close();
            return;
        }
        let count = count as isize;
        let next = ((current as isize + delta) % count + count) % count;
        self.open(next as usize, count as usize);
    }

    /// Record that the shown image could not be loaded
    pub fn mark_load_failed(&mut self) {
        if self.is_open() {
            self.load_failed = true;
        }
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Caption for the shown photo
    pub fn caption(&self, photos: &[Photo]) -> Option<String> {
        let photo = photos.get(self.current?)?;
        if self.load_failed {
            Some(LOAD_FAILED_CAPTION.to_string())
        } else {
            Some(photo.caption())
        }
    }
}
