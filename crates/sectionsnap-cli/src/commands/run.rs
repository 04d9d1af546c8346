use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use sectionsnap_core::AppConfig;
use sectionsnap_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, GalleryLoadResult},
    input::{apply_action, handle_key_event},
    load_theme,
    widgets::{LightboxWidget, PageWidget, PopupWidget, StatusBarWidget},
};

/// Rows reserved below the page for the status bar
const STATUS_ROWS: u16 = 1;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let library = super::load_library(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Sectionsnap"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), library, theme);

    let result = main_loop(&mut terminal, &mut app, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Arc<AppConfig>,
) -> Result<()> {
    let size = terminal.size()?;
    app.start(size.width, size.height.saturating_sub(STATUS_ROWS));

    // Gallery arrives in the background and is injected into the page
    let (gallery_tx, mut gallery_rx) = mpsc::unbounded_channel::<GalleryLoadResult>();
    if config.gallery.enabled {
        spawn_gallery_load(config.clone(), gallery_tx);
    }

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_fps);

    loop {
        // Process a finished gallery load (non-blocking)
        while let Ok(result) = gallery_rx.try_recv() {
            app.apply_gallery(result);
        }

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
                .split(frame.area());

            PageWidget::render(frame, chunks[0], app);
            StatusBarWidget::render(frame, chunks[1], app);

            match app.mode {
                Mode::Lightbox => LightboxWidget::render(frame, app),
                Mode::Help => PopupWidget::render_help(frame, &app.theme),
                Mode::Normal => {}
            }
        })?;

        // Poll at the animation rate while a snap is in flight
        if let Some(event) = event_handler.next(app.needs_fast_update())? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    apply_action(app, action);
                }
                AppEvent::Resize(width, height) => {
                    app.resize(width, height.saturating_sub(STATUS_ROWS));
                }
                AppEvent::ScrollDown => app.scroll_lines_down(),
                AppEvent::ScrollUp => app.scroll_lines_up(),
                AppEvent::Tick => {}
            }
        }

        // Advance the snap whatever woke the loop
        app.update_snap_animation(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_gallery_load(config: Arc<AppConfig>, tx: mpsc::UnboundedSender<GalleryLoadResult>) {
    tokio::spawn(async move {
        let result = match super::gallery::fetch_photos(&config).await {
            Ok(photos) => GalleryLoadResult::Loaded(photos),
            Err(e) => GalleryLoadResult::Failed(e.to_string()),
        };
        // Receiver is gone once the app quit
        let _ = tx.send(result);
    });
}
