use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

use super::popup::{centered_rect, truncate_to_width};

pub struct LightboxWidget;

impl LightboxWidget {
    /// Render the open photo over the page
    pub fn render(frame: &mut Frame, app: &App) {
        let (Some(index), Some(caption)) = (app.lightbox.current(), app.lightbox.caption(&app.photos))
        else {
            return;
        };
        let Some(photo) = app.photos.get(index) else {
            return;
        };

        let theme = &app.theme;
        let area = frame.area();
        let popup_area = centered_rect(
            area.width.saturating_sub(8).max(20),
            12u16.min(area.height.saturating_sub(2)),
            area,
        );

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} / {} ", index + 1, app.photos.len()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Caption
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Alt text
                Constraint::Length(1), // Source
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let caption_color = if app.lightbox.load_failed() {
            theme.error
        } else {
            theme.fg1
        };
        let caption_style = Style::default().fg(caption_color).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(caption)
                .style(caption_style)
                .alignment(Alignment::Center),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(photo.alt.as_str())
                .style(Style::default().fg(theme.fg0))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[2],
        );

        let source = truncate_to_width(&photo.full_image, chunks[3].width as usize);
        frame.render_widget(
            Paragraph::new(source)
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center),
            chunks[3],
        );

        let hint = Line::from(vec![
            Span::styled("h/l", Style::default().fg(theme.yellow)),
            Span::styled(" prev/next  ", Style::default().fg(theme.grey1)),
            Span::styled("o", Style::default().fg(theme.yellow)),
            Span::styled(" open  ", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.yellow)),
            Span::styled(" close", Style::default().fg(theme.grey1)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[4]);
    }
}
