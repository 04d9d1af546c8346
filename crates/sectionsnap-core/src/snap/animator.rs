//! Eased snap animation
//!
//! Moves the scroll offset toward a section start by a fixed fraction of the
//! remaining distance each frame (exponential ease-out), never less than one
//! unit, and lands exactly on the target once within one unit. At most one
//! animation runs at a time; a request while one is in flight is dropped.
//!
//! The target is stored as a section index and resolved against the live
//! section list on every step, so a recompute mid-flight retargets the
//! animation or discards it if the section vanished. Either way the lock
//! is released.

use super::section::SectionList;

/// Write access to the host's scroll position
pub trait ScrollSurface {
    /// Current scroll offset
    fn scroll_offset(&self) -> f64;

    /// Move the scroll position
    fn scroll_to(&mut self, offset: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimateOutcome {
    /// A new animation is in flight
    Started,
    /// Another animation holds the lock
    Dropped,
    /// Target index does not exist
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing in flight
    Idle,
    /// Moved one step, another frame is needed
    Continue,
    /// Landed exactly on the section start
    Converged(usize),
    /// Target section no longer exists
    Discarded,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    target_index: usize,
    frames: u32,
}

#[derive(Debug, Clone)]
pub struct SnapAnimator {
    easing_factor: f64,
    in_flight: Option<InFlight>,
    /// Offset tracked by the animator itself, so host-side clamping cannot stall it
    position: f64,
}

impl SnapAnimator {
    pub fn new(easing_factor: f64) -> Self {
        let easing_factor = if easing_factor.is_finite() && easing_factor > 0.0 {
            easing_factor.min(1.0)
        } else {
            0.15
        };
        Self {
            easing_factor,
            in_flight: None,
            position: 0.0,
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Section index the in-flight animation is heading to
    pub fn target_index(&self) -> Option<usize> {
        self.in_flight.map(|f| f.target_index)
    }

    /// Frames stepped by the in-flight animation so far
    pub fn frames(&self) -> u32 {
        self.in_flight.map(|f| f.frames).unwrap_or(0)
    }

    pub fn easing_factor(&self) -> f64 {
        self.easing_factor
    }

    /// Begin animating toward the start of `index`
    ///
    /// Passing an index outside `sections` is a caller bug: it panics in
    /// debug builds and is ignored in release builds.
    pub fn animate_to(
        &mut self,
        index: usize,
        sections: &SectionList,
        current_offset: f64,
    ) -> AnimateOutcome {
        if self.is_locked() {
            tracing::debug!(index, "Snap already in flight, dropping request");
            return AnimateOutcome::Dropped;
        }

        debug_assert!(
            index < sections.len(),
            "snap target {} out of range ({} sections)",
            index,
            sections.len()
        );
        if index >= sections.len() {
            return AnimateOutcome::Invalid;
        }

        self.position = if current_offset.is_finite() {
            current_offset
        } else {
            0.0
        };
        self.in_flight = Some(InFlight {
            target_index: index,
            frames: 0,
        });
        AnimateOutcome::Started
    }

    /// Advance one frame
    pub fn step(&mut self, sections: &SectionList, surface: &mut impl ScrollSurface) -> StepOutcome {
        let Some(flight) = self.in_flight.as_mut() else {
            return StepOutcome::Idle;
        };
        flight.frames += 1;

        let Some(section) = sections.get(flight.target_index) else {
            let index = flight.target_index;
            self.in_flight = None;
            tracing::debug!(index, "Snap target vanished, discarding animation");
            return StepOutcome::Discarded;
        };
        let target = section.start_offset;

        let diff = target - self.position;
        if diff.abs() < 1.0 {
            surface.scroll_to(target);
            self.position = target;
            let index = flight.target_index;
            let frames = flight.frames;
            self.in_flight = None;
            tracing::debug!(index, frames, offset = target, "Snap converged");
            return StepOutcome::Converged(index);
        }

        self.position = ease_step(self.position, target, self.easing_factor);
        surface.scroll_to(self.position);
        StepOutcome::Continue
    }
}

/// One eased step from `current` toward `target`
///
/// Covers `easing_factor` of the remaining distance, at least one unit, and
/// never overshoots.
#[inline]
pub fn ease_step(current: f64, target: f64, easing_factor: f64) -> f64 {
    let diff = target - current;
    let distance = diff.abs();
    if distance < 1.0 {
        return target;
    }
    let step = (distance * easing_factor).max(1.0).min(distance);
    current + step.copysign(diff)
}

/// Upper bound on frames needed to converge from `distance` away
///
/// The geometric phase shrinks the distance by `1 - easing_factor` per frame
/// until steps fall to one unit; the tail then needs at most
/// `1 / easing_factor` unit steps.
#[cfg(test)]
pub(crate) fn frame_bound(distance: f64, easing_factor: f64) -> u32 {
    let distance = distance.abs();
    if distance < 1.0 {
        return 1;
    }
    if easing_factor >= 1.0 {
        return 2;
    }
    let geometric = (distance.ln() / -(1.0 - easing_factor).ln()).ceil();
    let tail = (1.0 / easing_factor).ceil();
    (geometric + tail) as u32 + 2
}
