//! In-memory host
//!
//! Holds page geometry and scroll state in plain fields and records every
//! scroll write and active-section signal. Used by tests and by headless
//! simulation.

use super::animator::ScrollSurface;
use super::controller::SnapHost;
use super::section::{LayoutSource, TargetGeometry};
use crate::theme::ThemeChange;

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub targets: Vec<TargetGeometry>,
    pub document_height: f64,
    pub scroll_offset: f64,
    pub viewport_height: f64,
    /// Every offset written through `scroll_to`
    pub scroll_writes: Vec<f64>,
    /// Every active-section signal with the class it applied
    pub active_signals: Vec<(Option<usize>, Option<String>)>,
}

impl MemoryHost {
    /// Host without snap targets
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            ..Default::default()
        }
    }

    /// Host whose sections start at `starts`, each running to the next start
    pub fn with_section_starts(starts: &[f64], viewport_height: f64, document_height: f64) -> Self {
        let mut host = Self::new(viewport_height, document_height);
        host.set_section_starts(starts, document_height);
        host
    }

    /// Replace the layout, as a reflow would
    pub fn set_section_starts(&mut self, starts: &[f64], document_height: f64) {
        self.document_height = document_height;
        self.targets = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(document_height);
                TargetGeometry::new(start, (end - start).max(0.0))
            })
            .collect();
    }
}

impl LayoutSource for MemoryHost {
    fn snap_targets(&self) -> Vec<TargetGeometry> {
        self.targets.clone()
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }
}

impl ScrollSurface for MemoryHost {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.scroll_writes.push(offset);
    }
}

impl SnapHost for MemoryHost {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn on_active_section(&mut self, index: Option<usize>, change: &ThemeChange) {
        self.active_signals.push((index, change.added.clone()));
    }
}
