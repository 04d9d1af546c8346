use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use sectionsnap_core::Phase;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal => match app.controller.phase() {
                Phase::Idle => "READ",
                Phase::Animating => "SNAP",
            },
            Mode::Lightbox => "PHOTO",
            Mode::Help => "HELP",
        };

        let total = app.controller.sections().len();
        let section = match app.controller.active_index() {
            Some(i) => format!("{}/{}", i + 1, total),
            None => format!("-/{}", total),
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {} | Section {} | {}",
                mode_str,
                section,
                app.surface.accent_class().unwrap_or("-")
            ),
        };

        let help_hint = " q:quit n/p:section Enter:photo ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey2).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
