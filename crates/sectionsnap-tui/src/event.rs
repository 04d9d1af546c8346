use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

use sectionsnap_core::gallery::Photo;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_interval: Duration,
}

/// Result of the background gallery load
pub enum GalleryLoadResult {
    /// Photos from the remote gallery or its cache
    Loaded(Vec<Photo>),
    /// No gallery data could be obtained
    Failed(String),
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            frame_interval: frame_interval(animation_fps),
        }
    }

    /// Poll for the next event
    ///
    /// While `animating` the poll timeout is one animation frame, so the
    /// loop wakes at least that often. Frames themselves are paced by
    /// [`FrameClock`], not by ticks.
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.frame_interval
        } else {
            self.tick_rate
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => Ok(Some(AppEvent::ScrollDown)),
                    MouseEventKind::ScrollUp => Ok(Some(AppEvent::ScrollUp)),
                    _ => Ok(None),
                },
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Mouse wheel down
    ScrollDown,
    /// Mouse wheel up
    ScrollUp,
    /// Poll timed out with nothing to read
    Tick,
}

/// Time between animation frames at `fps`
pub fn frame_interval(fps: u32) -> Duration {
    let fps = fps.clamp(1, 240) as u64;
    Duration::from_millis((1000 / fps).max(1))
}

/// Paces animation frames by wall clock, independent of which event woke the loop
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: frame_interval(fps),
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame is due at `now`; claims it if so
    pub fn take_frame(&mut self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_frame = Some(now);
                true
            }
        }
    }

    /// Forget the last frame so the next animation starts immediately
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}
