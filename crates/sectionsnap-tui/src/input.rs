use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    NextSection,
    PrevSection,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextPhoto,
    PrevPhoto,
    OpenLightbox,
    CloseLightbox,
    LightboxNext,
    LightboxPrev,
    OpenImage,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match app.mode {
        Mode::Lightbox => return handle_lightbox_mode(key),
        // Any key exits help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Free scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        // Section navigation
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::PageDown, _) => Action::NextSection,
        (KeyCode::PageUp, _) => Action::PrevSection,
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Gallery
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextPhoto,
        (KeyCode::BackTab, _) => Action::PrevPhoto,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::OpenLightbox,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenImage,

        (KeyCode::Char('?'), _) => Action::ToggleHelp,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

/// Handle key events while the lightbox is open
fn handle_lightbox_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::CloseLightbox,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::CloseLightbox,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::LightboxNext,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::LightboxNext,
        (KeyCode::Right, KeyModifiers::NONE) => Action::LightboxNext,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::LightboxPrev,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::LightboxPrev,
        (KeyCode::Left, KeyModifiers::NONE) => Action::LightboxPrev,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenImage,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::OpenImage,
        _ => Action::None,
    }
}

/// Apply an action to the application state
pub fn apply_action(app: &mut App, action: Action) {
    // Any key other than a second 'g' cancels the pending sequence
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_lines_down(),
        Action::ScrollUp => app.scroll_lines_up(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::NextSection => {
            app.next_section();
        }
        Action::PrevSection => {
            app.prev_section();
        }
        Action::JumpToTop => {
            app.jump_to_top();
        }
        Action::JumpToBottom => {
            app.jump_to_bottom();
        }
        Action::PendingG => app.pending_key = Some('g'),
        Action::NextPhoto => app.select_next_photo(),
        Action::PrevPhoto => app.select_prev_photo(),
        Action::OpenLightbox => app.open_lightbox(),
        Action::CloseLightbox => app.close_lightbox(),
        Action::LightboxNext => app.lightbox_next(),
        Action::LightboxPrev => app.lightbox_prev(),
        Action::OpenImage => app.open_full_image(),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => {
            if app.mode == Mode::Help {
                app.mode = Mode::Normal;
            }
            app.clear_status();
        }
        Action::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sectionsnap_core::article::{Article, ArticleLibrary};
    use sectionsnap_core::gallery::fallback_photos;
    use sectionsnap_core::AppConfig;

    use crate::event::GalleryLoadResult;
    use crate::theme::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let library = ArticleLibrary::from_articles(vec![Article::with_contents(
            "a.html",
            "<h1>A</h1><p>text</p>",
        )]);
        let mut app = App::new(Arc::new(AppConfig::default()), library, Theme::default());
        app.start(80, 24);
        app.apply_gallery(GalleryLoadResult::Loaded(fallback_photos()));
        app
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &app), Action::NextSection);
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let mut app = app();
        let first = handle_key_event(key(KeyCode::Char('g')), &app);
        apply_action(&mut app, first);
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);

        apply_action(&mut app, Action::ScrollDown);
        assert_eq!(app.pending_key, None);
    }

    #[test]
    fn test_escape_closes_lightbox() {
        let mut app = app();
        apply_action(&mut app, Action::OpenLightbox);
        assert_eq!(app.mode, Mode::Lightbox);

        // Section keys navigate photos inside the lightbox
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &app), Action::LightboxNext);

        let action = handle_key_event(key(KeyCode::Esc), &app);
        assert_eq!(action, Action::CloseLightbox);
        apply_action(&mut app, action);
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.lightbox.is_open());
    }

    #[test]
    fn test_help_exits_on_any_key() {
        let mut app = app();
        apply_action(&mut app, Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Help);
        let action = handle_key_event(key(KeyCode::Char('x')), &app);
        apply_action(&mut app, action);
        assert_eq!(app.mode, Mode::Normal);
    }
}
