use anyhow::{bail, Result};

use sectionsnap_core::snap::{Controller, MemoryHost, ScrollResponse, StepOutcome};
use sectionsnap_core::{AppConfig, ThemeSideEffect};

/// Frames after which a simulated snap is reported as stuck
const MAX_FRAMES: u32 = 10_000;

pub fn run(
    config: &AppConfig,
    starts: &[f64],
    viewport: f64,
    document: Option<f64>,
    scroll: &[f64],
) -> Result<()> {
    if starts.iter().any(|s| !s.is_finite()) {
        bail!("section starts must be finite numbers");
    }
    let last = starts.iter().copied().fold(0.0, f64::max);
    let document = document.unwrap_or(last + viewport);

    let mut sorted = starts.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut host = MemoryHost::with_section_starts(&sorted, viewport, document);
    let palette = ThemeSideEffect::new(config.ui.theme.palette.clone());
    let mut controller = Controller::new(config.snap, palette);

    controller.start(&mut host);
    println!(
        "start: {} sections, current {:?}, class {:?}",
        controller.sections().len(),
        controller.state().current_section_index,
        controller.theme().current_class()
    );

    for &offset in scroll {
        host.scroll_offset = offset;
        let response = controller.on_scroll(&mut host);

        let mut frames = 0;
        let mut outcome = StepOutcome::Idle;
        while controller.needs_frame() {
            outcome = controller.on_frame(&mut host);
            frames += 1;
            if frames > MAX_FRAMES {
                bail!("snap to {:?} did not converge", controller.snap_target());
            }
        }

        let summary = match response {
            ScrollResponse::Ignored => "ignored".to_string(),
            ScrollResponse::Dropped => "dropped".to_string(),
            ScrollResponse::Settled(d) if d.free_scroll => {
                format!("free scroll in section {}", d.active)
            }
            ScrollResponse::Settled(d) => format!("settled in section {}", d.active),
            ScrollResponse::Snapping(d) => {
                format!("snapped to section {} in {} frames ({:?})", d.target, frames, outcome)
            }
        };
        println!(
            "scroll {:>8.1} -> {:<40} offset {:>8.1}  class {}",
            offset,
            summary,
            host.scroll_offset,
            controller.theme().current_class().unwrap_or("-")
        );
    }

    Ok(())
}
