//! Snap controller
//!
//! Owns the section list, snap state, animator and frame queue for one page.
//! Two phases exist: `Idle` and `Animating`. A scroll notification whose
//! decision asks for a snap moves to `Animating`; only convergence (or a
//! discarded target) moves back. Triggers while animating are dropped.

use super::animator::{AnimateOutcome, ScrollSurface, SnapAnimator, StepOutcome};
use super::frame::FrameQueue;
use super::section::{LayoutSource, SectionList, SectionRegistry};
use super::viewport::{Decision, ViewportSnapshot, ViewportTracker};
use crate::config::SnapConfig;
use crate::theme::{ThemeChange, ThemeSideEffect};

/// Everything the controller needs from the page it drives
pub trait SnapHost: LayoutSource + ScrollSurface {
    /// Height of the visible window
    fn viewport_height(&self) -> f64;

    /// Active section changed; `index` is `None` once no sections remain
    fn on_active_section(&mut self, _index: Option<usize>, _change: &ThemeChange) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapState {
    /// `None` only before the first measurement or with no sections
    pub current_section_index: Option<usize>,
    /// True only while an animation is in flight
    pub locked: bool,
}

/// What a scroll notification led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollResponse {
    /// No sections to snap to
    Ignored,
    /// A snap is already in flight
    Dropped,
    /// No snap needed
    Settled(Decision),
    /// A snap toward `Decision::target` started
    Snapping(Decision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameTask {
    SnapStep,
}

#[derive(Debug, Clone)]
pub struct Controller {
    config: SnapConfig,
    tracker: ViewportTracker,
    animator: SnapAnimator,
    sections: SectionList,
    current: Option<usize>,
    active: Option<usize>,
    frames: FrameQueue<FrameTask>,
    theme: ThemeSideEffect,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(SnapConfig::default(), ThemeSideEffect::default())
    }
}

impl Controller {
    pub fn new(config: SnapConfig, theme: ThemeSideEffect) -> Self {
        let config = config.validated();
        Self {
            config,
            tracker: ViewportTracker::new(config),
            animator: SnapAnimator::new(config.easing_factor),
            sections: SectionList::default(),
            current: None,
            active: None,
            frames: FrameQueue::new(),
            theme,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn theme(&self) -> &ThemeSideEffect {
        &self.theme
    }

    pub fn state(&self) -> SnapState {
        SnapState {
            current_section_index: self.current,
            locked: self.animator.is_locked(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.animator.is_locked() {
            Phase::Animating
        } else {
            Phase::Idle
        }
    }

    /// Section the viewport shows, including free scrolling inside a tall one
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Section the in-flight animation is heading to
    pub fn snap_target(&self) -> Option<usize> {
        self.animator.target_index()
    }

    /// Whether `on_frame` has work queued for the next repaint
    #[inline]
    pub fn needs_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Measure sections and seed the current section from the scroll position
    ///
    /// The seed is the last section starting no more than `seed_tolerance`
    /// below the scroll offset. No snap happens at startup.
    pub fn start(&mut self, host: &mut impl SnapHost) {
        self.sections = SectionRegistry::recompute(&*host);
        if self.sections.is_empty() {
            tracing::debug!("No snap targets, controller stays idle");
            return;
        }

        let reach = host.scroll_offset() + self.config.seed_tolerance;
        let seed = self
            .sections
            .iter()
            .rev()
            .find(|s| s.start_offset <= reach)
            .map(|s| s.index)
            .unwrap_or(0);

        tracing::debug!(seed, sections = self.sections.len(), "Seeded current section");
        self.current = Some(seed);
        self.set_active(Some(seed), host);
    }

    /// React to a scroll notification
    pub fn on_scroll(&mut self, host: &mut impl SnapHost) -> ScrollResponse {
        if self.sections.is_empty() {
            return ScrollResponse::Ignored;
        }
        if self.animator.is_locked() {
            return ScrollResponse::Dropped;
        }

        let snapshot = Self::snapshot(&*host);
        let Some(decision) = self.tracker.decide(snapshot, &self.sections, self.current) else {
            return ScrollResponse::Ignored;
        };

        if !decision.should_animate {
            self.set_active(Some(decision.active), host);
            return ScrollResponse::Settled(decision);
        }

        match self.begin_snap(decision.target, snapshot.scroll_offset) {
            AnimateOutcome::Started => {
                tracing::debug!(
                    from = ?self.current,
                    to = decision.target,
                    offset = snapshot.scroll_offset,
                    "Snapping to section"
                );
                ScrollResponse::Snapping(decision)
            }
            AnimateOutcome::Dropped => ScrollResponse::Dropped,
            AnimateOutcome::Invalid => ScrollResponse::Settled(decision),
        }
    }

    /// Re-measure after the viewport was resized
    pub fn on_resize(&mut self, host: &mut impl SnapHost) {
        tracing::debug!(viewport = host.viewport_height(), "Viewport resized");
        self.remeasure(host);
    }

    /// Re-measure after the host changed page content
    pub fn recalculate(&mut self, host: &mut impl SnapHost) {
        tracing::debug!("Recalculating sections");
        self.remeasure(host);
    }

    /// Snap to a section chosen by the host (keyboard navigation and similar)
    pub fn snap_to(&mut self, index: usize, host: &mut impl SnapHost) -> AnimateOutcome {
        if self.animator.is_locked() {
            return AnimateOutcome::Dropped;
        }
        if index >= self.sections.len() {
            return AnimateOutcome::Invalid;
        }
        self.begin_snap(index, host.scroll_offset())
    }

    /// Snap `delta` sections away from the current one, clamped to the list
    pub fn snap_by(&mut self, delta: isize, host: &mut impl SnapHost) -> AnimateOutcome {
        if self.sections.is_empty() {
            return AnimateOutcome::Invalid;
        }
        let base = self.active.or(self.current).unwrap_or(0) as isize;
        let last = self.sections.len() as isize - 1;
        let index = (base + delta).clamp(0, last) as usize;
        self.snap_to(index, host)
    }

    /// Run the tasks due this repaint
    pub fn on_frame(&mut self, host: &mut impl SnapHost) -> StepOutcome {
        let mut outcome = StepOutcome::Idle;

        for task in self.frames.begin_frame() {
            match task {
                FrameTask::SnapStep => {
                    outcome = self.animator.step(&self.sections, &mut *host);
                    match outcome {
                        StepOutcome::Continue => self.frames.request(FrameTask::SnapStep),
                        StepOutcome::Converged(index) => {
                            self.current = Some(index);
                            self.set_active(Some(index), host);
                        }
                        StepOutcome::Discarded => self.rederive(host),
                        StepOutcome::Idle => {}
                    }
                }
            }
        }

        outcome
    }

    fn begin_snap(&mut self, index: usize, offset: f64) -> AnimateOutcome {
        let outcome = self.animator.animate_to(index, &self.sections, offset);
        if outcome == AnimateOutcome::Started {
            self.frames.request(FrameTask::SnapStep);
        }
        outcome
    }

    fn remeasure(&mut self, host: &mut impl SnapHost) {
        self.sections = SectionRegistry::recompute(&*host);

        // The in-flight animation re-resolves its target each frame
        if self.animator.is_locked() {
            return;
        }

        if self.sections.is_empty() {
            self.current = None;
            self.set_active(None, host);
            return;
        }

        let offset = host.scroll_offset();
        if !self.sections.covers(offset) {
            let nearest = if offset < 0.0 { 0 } else { self.sections.len() - 1 };
            tracing::debug!(offset, nearest, "Scroll offset left every section, snapping back");
            self.begin_snap(nearest, offset);
            return;
        }

        self.rederive(host);
    }

    /// Pick the current section from geometry alone, without snapping
    fn rederive(&mut self, host: &mut impl SnapHost) {
        let snapshot = Self::snapshot(&*host);
        match self.tracker.decide(snapshot, &self.sections, None) {
            Some(decision) => {
                self.current = Some(decision.active);
                self.set_active(Some(decision.active), host);
            }
            None => {
                self.current = None;
                self.set_active(None, host);
            }
        }
    }

    fn set_active(&mut self, index: Option<usize>, host: &mut impl SnapHost) {
        if self.active == index {
            return;
        }
        self.active = index;
        let change = match index {
            Some(i) => self.theme.apply(i),
            None => self.theme.clear(),
        };
        host.on_active_section(index, &change);
    }

    fn snapshot(host: &impl SnapHost) -> ViewportSnapshot {
        ViewportSnapshot::new(host.scroll_offset(), host.viewport_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::animator::frame_bound;
    use crate::snap::host::MemoryHost;

    fn run_frames(controller: &mut Controller, host: &mut MemoryHost) -> (StepOutcome, u32) {
        let mut frames = 0;
        let mut last = StepOutcome::Idle;
        while controller.needs_frame() {
            frames += 1;
            last = controller.on_frame(host);
            assert!(frames < 10_000, "controller never went idle");
        }
        (last, frames)
    }

    fn started(starts: &[f64], viewport: f64, document: f64) -> (Controller, MemoryHost) {
        let mut host = MemoryHost::with_section_starts(starts, viewport, document);
        let mut controller = Controller::with_defaults();
        controller.start(&mut host);
        (controller, host)
    }

    #[test]
    fn test_look_ahead_snap_end_to_end() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        assert_eq!(controller.state().current_section_index, Some(0));

        host.scroll_offset = 750.0;
        let response = controller.on_scroll(&mut host);
        assert!(matches!(response, ScrollResponse::Snapping(d) if d.target == 1));
        assert_eq!(controller.phase(), Phase::Animating);
        assert!(controller.state().locked);

        let (outcome, frames) = run_frames(&mut controller, &mut host);
        assert_eq!(outcome, StepOutcome::Converged(1));
        assert!(frames <= frame_bound(50.0, 0.15));
        assert_eq!(host.scroll_offset, 800.0);
        assert_eq!(
            controller.state(),
            SnapState {
                current_section_index: Some(1),
                locked: false
            }
        );
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(host.active_signals.last(), Some(&(Some(1), Some("yellow".to_string()))));
    }

    #[test]
    fn test_overlapping_triggers_are_dropped() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        host.scroll_offset = 750.0;
        controller.on_scroll(&mut host);

        host.scroll_offset = 1900.0;
        assert_eq!(controller.on_scroll(&mut host), ScrollResponse::Dropped);
        assert_eq!(controller.snap_to(2, &mut host), AnimateOutcome::Dropped);
        assert_eq!(controller.snap_target(), Some(1));

        run_frames(&mut controller, &mut host);
        assert_eq!(host.scroll_offset, 800.0);
    }

    #[test]
    fn test_tall_section_free_scroll_reports_active_without_snapping() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2400.0], 800.0, 3200.0);

        host.scroll_offset = 1200.0;
        let response = controller.on_scroll(&mut host);
        match response {
            ScrollResponse::Settled(decision) => {
                assert!(decision.free_scroll);
                assert!(!decision.should_animate);
            }
            other => panic!("unexpected response {:?}", other),
        }
        assert!(!controller.needs_frame());
        assert!(!controller.state().locked);
        assert_eq!(controller.active_index(), Some(1));
        assert_eq!(controller.theme().current_class(), Some("yellow"));
        assert!(host.scroll_writes.is_empty());
    }

    #[test]
    fn test_no_sections_is_a_no_op() {
        let mut host = MemoryHost::new(800.0, 2000.0);
        let mut controller = Controller::with_defaults();
        controller.start(&mut host);

        host.scroll_offset = 300.0;
        assert_eq!(controller.on_scroll(&mut host), ScrollResponse::Ignored);
        controller.on_resize(&mut host);
        controller.recalculate(&mut host);
        assert_eq!(controller.on_frame(&mut host), StepOutcome::Idle);
        assert_eq!(controller.snap_by(1, &mut host), AnimateOutcome::Invalid);
        assert_eq!(
            controller.state(),
            SnapState {
                current_section_index: None,
                locked: false
            }
        );
        assert!(host.scroll_writes.is_empty());
    }

    #[test]
    fn test_resize_removing_target_releases_lock() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 1600.0], 800.0, 2400.0);
        assert_eq!(controller.snap_to(2, &mut host), AnimateOutcome::Started);
        controller.on_frame(&mut host);

        host.set_section_starts(&[0.0], 800.0);
        controller.on_resize(&mut host);
        let (outcome, _) = run_frames(&mut controller, &mut host);

        assert_eq!(outcome, StepOutcome::Discarded);
        assert!(!controller.state().locked);
        assert_eq!(controller.state().current_section_index, Some(0));

        // Lock is free for the next snap
        host.set_section_starts(&[0.0, 800.0], 1600.0);
        controller.recalculate(&mut host);
        assert_eq!(controller.snap_to(1, &mut host), AnimateOutcome::Started);
    }

    #[test]
    fn test_recalculate_mid_flight_retargets() {
        let (mut controller, mut host) = started(&[0.0, 800.0], 800.0, 1600.0);
        controller.snap_to(1, &mut host);
        controller.on_frame(&mut host);
        controller.on_frame(&mut host);

        host.set_section_starts(&[0.0, 1000.0], 1800.0);
        controller.recalculate(&mut host);
        assert!(controller.state().locked);

        let (outcome, _) = run_frames(&mut controller, &mut host);
        assert_eq!(outcome, StepOutcome::Converged(1));
        assert_eq!(host.scroll_offset, 1000.0);
    }

    #[test]
    fn test_idle_resize_rederives_without_snapping() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        host.scroll_offset = 800.0;
        controller.on_scroll(&mut host);
        run_frames(&mut controller, &mut host);
        let writes = host.scroll_writes.len();

        // Reflow pushes section 1 below the viewport top
        host.set_section_starts(&[0.0, 900.0, 2100.0], 2900.0);
        controller.on_resize(&mut host);

        assert!(!controller.needs_frame());
        assert_eq!(host.scroll_writes.len(), writes);
        assert_eq!(controller.state().current_section_index, Some(1));
    }

    #[test]
    fn test_resize_past_document_end_snaps_back() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        host.scroll_offset = 2000.0;
        controller.on_scroll(&mut host);
        run_frames(&mut controller, &mut host);

        host.set_section_starts(&[0.0, 400.0], 1000.0);
        controller.on_resize(&mut host);
        assert!(controller.needs_frame());

        let (outcome, _) = run_frames(&mut controller, &mut host);
        assert_eq!(outcome, StepOutcome::Converged(1));
        assert_eq!(host.scroll_offset, 400.0);
    }

    #[test]
    fn test_start_seeds_with_tolerance() {
        let mut host = MemoryHost::with_section_starts(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        host.scroll_offset = 750.0;
        let mut controller = Controller::with_defaults();
        controller.start(&mut host);
        assert_eq!(controller.state().current_section_index, Some(1));
        assert_eq!(controller.active_index(), Some(1));
        assert!(host.scroll_writes.is_empty());
    }

    #[test]
    fn test_snap_by_clamps() {
        let (mut controller, mut host) = started(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
        assert_eq!(controller.snap_by(-1, &mut host), AnimateOutcome::Started);
        run_frames(&mut controller, &mut host);
        assert_eq!(controller.state().current_section_index, Some(0));

        assert_eq!(controller.snap_by(5, &mut host), AnimateOutcome::Started);
        run_frames(&mut controller, &mut host);
        assert_eq!(host.scroll_offset, 2000.0);
        assert_eq!(controller.state().current_section_index, Some(2));
    }

    #[test]
    fn test_instances_are_independent() {
        let (mut first, mut first_host) = started(&[0.0, 800.0], 800.0, 1600.0);
        let (second, _second_host) = started(&[0.0, 800.0], 800.0, 1600.0);

        first_host.scroll_offset = 750.0;
        first.on_scroll(&mut first_host);
        assert!(first.state().locked);
        assert!(!second.state().locked);
        assert!(!second.needs_frame());
    }
}
