use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;
use crate::page::LineKind;

use super::popup::truncate_to_width;

pub struct PageWidget;

impl PageWidget {
    /// Render the visible rows of the page
    ///
    /// Rows of the active section get a gutter marker in the section color.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let layout = app.surface.layout();
        let top = app.surface.top_row();
        let active = app.surface.active_section();
        let marker_color = theme.section_color(app.surface.accent_class());
        let text_width = area.width.saturating_sub(2) as usize;

        let lines: Vec<Line> = layout
            .lines
            .iter()
            .skip(top)
            .take(area.height as usize)
            .map(|row| {
                let marker = if Some(row.section) == active {
                    Span::styled("▎ ", Style::default().fg(marker_color))
                } else {
                    Span::raw("  ")
                };

                let style = match row.kind {
                    LineKind::Title => Style::default()
                        .fg(if Some(row.section) == active {
                            marker_color
                        } else {
                            theme.fg1
                        })
                        .add_modifier(Modifier::BOLD),
                    LineKind::Body | LineKind::Blank => Style::default().fg(theme.fg0),
                    LineKind::Notice => Style::default()
                        .fg(theme.grey2)
                        .add_modifier(Modifier::ITALIC),
                    LineKind::Photo(i) if i == app.selected_photo => Style::default()
                        .fg(theme.fg1)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD),
                    LineKind::Photo(_) => Style::default().fg(theme.fg0),
                };

                Line::from(vec![
                    marker,
                    Span::styled(truncate_to_width(&row.text, text_width), style),
                ])
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().style(Style::default().bg(theme.bg0)));
        frame.render_widget(paragraph, area);
    }
}
