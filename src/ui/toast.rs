use crate::notify::Notification;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph, Wrap},
};

use super::theme::{Palette, notification_color};

const TOAST_WIDTH: u16 = 46;
const TOAST_HEIGHT: u16 = 6;

/// Top-right toast with a countdown bar.
pub fn render(note: &Notification, remaining: f64, palette: &Palette, frame: &mut Frame) {
    let screen = frame.area();
    let width = TOAST_WIDTH.min(screen.width);
    let height = TOAST_HEIGHT.min(screen.height);
    let area = Rect {
        x: screen.right().saturating_sub(width + 1),
        y: screen.y + 1u16.min(screen.height.saturating_sub(height)),
        width,
        height,
    };
    frame.render_widget(Clear, area);

    let color = notification_color(note.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", note.kind.title()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" x dismiss ").style(palette.muted()))
        .style(palette.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(note.message.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let bar = LineGauge::default()
        .filled_style(Style::default().fg(color))
        .unfilled_style(palette.muted())
        .label("")
        .ratio(remaining.clamp(0.0, 1.0));
    frame.render_widget(bar, chunks[1]);
}
