//! Current-section decision
//!
//! Given a fresh scroll snapshot, picks the section the viewport belongs to
//! and whether the engine should snap to it. Rules, in order:
//!
//! 1. Base candidate: the last section starting at or above the scroll offset.
//! 2. Look-ahead: the next section wins once its visible overlap exceeds
//!    `next_section_visibility_threshold` of the viewport.
//! 3. Tall sections: inside a section taller than `tall_section_multiplier`
//!    viewports, and farther than `edge_hysteresis_ratio` of a viewport from
//!    both of its edges, the viewport scrolls freely and nothing snaps.
//! 4. Otherwise snap whenever the candidate differs from the previous section.

use super::section::SectionList;
use crate::config::SnapConfig;

/// Scroll readout taken from the host right before a decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub scroll_offset: f64,
    pub viewport_height: f64,
}

impl ViewportSnapshot {
    pub fn new(scroll_offset: f64, viewport_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
        }
    }

    /// Viewport height clamped to at least one unit
    #[inline]
    pub fn effective_height(&self) -> f64 {
        if self.viewport_height.is_finite() {
            self.viewport_height.max(1.0)
        } else {
            1.0
        }
    }

    #[inline]
    fn offset(&self) -> f64 {
        if self.scroll_offset.is_finite() {
            self.scroll_offset
        } else {
            0.0
        }
    }
}

/// Outcome of one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Section to snap to (or stay on)
    pub target: usize,
    /// Section the viewport currently shows, for side effects
    pub active: usize,
    /// Whether a snap animation should start
    pub should_animate: bool,
    /// Viewport is inside a tall section away from its edges
    pub free_scroll: bool,
}

#[derive(Debug, Clone)]
pub struct ViewportTracker {
    config: SnapConfig,
}

impl ViewportTracker {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Decide the target section. Returns `None` only for an empty list.
    pub fn decide(
        &self,
        snapshot: ViewportSnapshot,
        sections: &SectionList,
        previous: Option<usize>,
    ) -> Option<Decision> {
        let viewport = snapshot.effective_height();
        let offset = snapshot.offset();

        let mut candidate = sections.locate(offset)?;

        if let Some(next) = sections.get(candidate + 1) {
            let overlap = (offset + viewport) - next.start_offset;
            if overlap > self.config.next_section_visibility_threshold * viewport {
                candidate += 1;
            }
        }

        // Stale previous indices (after a recompute shrank the list) are ignored
        let previous = previous.filter(|&p| p < sections.len());

        if self.is_free_scroll(offset, viewport, sections, candidate) {
            return Some(Decision {
                target: previous.unwrap_or(candidate),
                active: candidate,
                should_animate: false,
                free_scroll: true,
            });
        }

        Some(Decision {
            target: candidate,
            active: candidate,
            should_animate: previous != Some(candidate),
            free_scroll: false,
        })
    }

    fn is_free_scroll(
        &self,
        offset: f64,
        viewport: f64,
        sections: &SectionList,
        candidate: usize,
    ) -> bool {
        let (Some(section), Some(end)) = (sections.get(candidate), sections.end_offset(candidate))
        else {
            return false;
        };

        if section.height <= self.config.tall_section_multiplier * viewport {
            return false;
        }

        let margin = self.config.edge_hysteresis_ratio * viewport;
        offset > section.start_offset + margin && offset < end - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::section::{Section, SectionList};

    fn sections(starts: &[f64], document_height: f64) -> SectionList {
        let list = starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let end = starts.get(index + 1).copied().unwrap_or(document_height);
                Section {
                    index,
                    start_offset: start,
                    height: end - start,
                }
            })
            .collect();
        SectionList::new(list, document_height)
    }

    fn tracker() -> ViewportTracker {
        ViewportTracker::new(SnapConfig::default())
    }

    #[test]
    fn test_empty_sections_yield_no_decision() {
        let list = SectionList::default();
        assert_eq!(tracker().decide(ViewportSnapshot::new(10.0, 800.0), &list, None), None);
    }

    #[test]
    fn test_look_ahead_prefers_visible_next_section() {
        let list = sections(&[0.0, 800.0, 2000.0], 2800.0);
        let decision = tracker()
            .decide(ViewportSnapshot::new(750.0, 800.0), &list, Some(0))
            .unwrap();
        assert_eq!(decision.target, 1);
        assert!(decision.should_animate);
        assert!(!decision.free_scroll);
    }

    #[test]
    fn test_small_overlap_keeps_current_section() {
        let list = sections(&[0.0, 800.0, 2000.0], 2800.0);
        // overlap = 300 + 800 - 800 = 300, below 400
        let decision = tracker()
            .decide(ViewportSnapshot::new(300.0, 800.0), &list, Some(0))
            .unwrap();
        assert_eq!(decision.target, 0);
        assert!(!decision.should_animate);
    }

    #[test]
    fn test_first_decision_always_animates() {
        let list = sections(&[0.0, 800.0], 1600.0);
        let decision = tracker()
            .decide(ViewportSnapshot::new(0.0, 800.0), &list, None)
            .unwrap();
        assert_eq!(decision.target, 0);
        assert!(decision.should_animate);
    }

    #[test]
    fn test_free_scroll_inside_tall_section() {
        // Section 1 spans 1600, twice the viewport
        let list = sections(&[0.0, 800.0, 2400.0], 3200.0);
        let decision = tracker()
            .decide(ViewportSnapshot::new(1200.0, 800.0), &list, Some(0))
            .unwrap();
        assert!(decision.free_scroll);
        assert!(!decision.should_animate);
        assert_eq!(decision.target, 0);
        assert_eq!(decision.active, 1);
    }

    #[test]
    fn test_tall_section_edges_still_snap() {
        let list = sections(&[0.0, 800.0, 2400.0], 3200.0);
        // 200 past the start is inside the 240 margin
        let decision = tracker()
            .decide(ViewportSnapshot::new(1000.0, 800.0), &list, Some(0))
            .unwrap();
        assert!(!decision.free_scroll);
        assert_eq!(decision.target, 1);
        assert!(decision.should_animate);
    }

    #[test]
    fn test_section_of_exactly_multiplier_height_is_not_tall() {
        let list = sections(&[0.0, 800.0, 2000.0], 2800.0);
        let decision = tracker()
            .decide(ViewportSnapshot::new(1300.0, 800.0), &list, Some(1))
            .unwrap();
        assert!(!decision.free_scroll);
        assert_eq!(decision.target, 1);
        assert!(!decision.should_animate);
    }

    #[test]
    fn test_non_positive_viewport_is_clamped() {
        let list = sections(&[0.0, 10.0, 20.0], 30.0);
        for height in [0.0, -100.0, f64::NAN] {
            let decision = tracker()
                .decide(ViewportSnapshot::new(15.0, height), &list, Some(1))
                .unwrap();
            assert_eq!(decision.target, 1);
        }
    }

    #[test]
    fn test_stale_previous_index_is_ignored() {
        let list = sections(&[0.0, 800.0, 2400.0], 3200.0);
        let decision = tracker()
            .decide(ViewportSnapshot::new(1200.0, 800.0), &list, Some(7))
            .unwrap();
        assert_eq!(decision.target, 1);
    }

    #[test]
    fn test_decision_stays_in_range() {
        let list = sections(&[0.0, 120.0, 200.0, 900.0, 950.0, 2600.0], 3000.0);
        let tracker = ViewportTracker::new(SnapConfig {
            edge_hysteresis_ratio: 0.4,
            ..SnapConfig::default()
        });
        let mut offset = -500.0;
        while offset < 4000.0 {
            for previous in [None, Some(0), Some(3), Some(5), Some(40)] {
                let decision = tracker
                    .decide(ViewportSnapshot::new(offset, 400.0), &list, previous)
                    .unwrap();
                assert!(decision.target < list.len(), "offset {}", offset);
                assert!(decision.active < list.len(), "offset {}", offset);
            }
            offset += 37.5;
        }
    }
}
