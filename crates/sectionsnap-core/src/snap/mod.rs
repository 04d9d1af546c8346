//! Section snap engine
//!
//! Keeps the scroll position of one long page aligned to discrete content
//! sections, easing between them a frame at a time while letting sections
//! taller than the viewport scroll freely.
//!
//! # Layers
//!
//! ## Geometry and policy
//! - `section` - Section measurement (`SectionRegistry`, `SectionList`)
//! - `viewport` - Current-section decision with look-ahead and hysteresis
//!
//! ## Motion
//! - `frame` - Per-repaint task queue
//! - `animator` - Eased, lock-guarded stepping toward a section start
//!
//! ## Orchestration
//! - `controller` - Owns state and wires the layers to a `SnapHost`
//! - `host` - In-memory host for tests and headless simulation
//!
//! # Usage
//!
//! ```ignore
//! use sectionsnap_core::snap::{Controller, MemoryHost};
//!
//! let mut host = MemoryHost::with_section_starts(&[0.0, 800.0, 2000.0], 800.0, 2800.0);
//! let mut controller = Controller::with_defaults();
//! controller.start(&mut host);
//!
//! host.scroll_offset = 750.0;
//! controller.on_scroll(&mut host);
//! while controller.needs_frame() {
//!     controller.on_frame(&mut host);
//! }
//! assert_eq!(host.scroll_offset, 800.0);
//! ```

pub mod section;
pub mod viewport;

pub mod animator;
pub mod frame;

pub mod controller;
pub mod host;

pub use animator::{AnimateOutcome, ScrollSurface, SnapAnimator, StepOutcome};
pub use controller::{Controller, Phase, ScrollResponse, SnapHost, SnapState};
pub use frame::FrameQueue;
pub use host::MemoryHost;
pub use section::{LayoutSource, Section, SectionList, SectionRegistry, TargetGeometry};
pub use viewport::{Decision, ViewportSnapshot, ViewportTracker};
