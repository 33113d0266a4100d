use crate::app::App;
use crate::overview::{self, ACTIVITIES, METRICS, QuickAction};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme::{Palette, activity_color};

const BAR_WIDTH: usize = 16;

pub fn render(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let active = overview::active_systems(&app.catalog).count() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(METRICS.len() as u16 + 2),
            Constraint::Length(QuickAction::ALL.len() as u16 + 2),
            Constraint::Length(active + 3),
            Constraint::Length(active + 2),
            Constraint::Min(3),
        ])
        .split(area);

    // ── Metrics ──
    let metric_lines: Vec<Line> = METRICS
        .iter()
        .map(|m| {
            let change_color = if m.change >= 0.0 { Color::Green } else { Color::Red };
            Line::from(vec![
                Span::raw(format!(" {} ", m.icon)),
                Span::styled(format!("{:<16}", m.name), palette.muted()),
                Span::raw(format!("{:>7} ", m.value)),
                Span::styled(format!("{:+.1}%", m.change), Style::default().fg(change_color)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(metric_lines).block(panel(" Metrics ", palette)),
        chunks[0],
    );

    // ── Quick actions ──
    let action_lines: Vec<Line> = QuickAction::ALL
        .iter()
        .enumerate()
        .map(|(i, a)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), palette.key()),
                Span::raw(a.name()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(action_lines).block(panel(" Quick Actions ", palette)),
        chunks[1],
    );

    // ── System health ──
    let mut health_lines = vec![Line::from(Span::styled(
        " ● All Systems Operational",
        Style::default().fg(Color::Green),
    ))];
    health_lines.extend(overview::active_systems(&app.catalog).map(|s| {
        Line::from(vec![
            Span::raw(format!(" {} {:<22}", s.icon, s.name)),
            Span::styled(format!("{:>6}%", s.uptime), Style::default().fg(Color::Green)),
        ])
    }));
    frame.render_widget(
        Paragraph::new(health_lines).block(panel(" System Health ", palette)),
        chunks[2],
    );

    // ── Usage ──
    let usage_lines: Vec<Line> = overview::active_systems(&app.catalog)
        .map(|s| {
            Line::from(vec![
                Span::raw(format!(" {:<20}", s.name)),
                Span::styled(usage_bar(s.usage), Style::default().fg(palette.accent)),
                Span::styled(format!(" {:>3}%", s.usage), palette.muted()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(usage_lines).block(panel(" Usage This Week ", palette)),
        chunks[3],
    );

    // ── Activity feed ──
    let mut activity_lines = Vec::new();
    for a in &ACTIVITIES {
        activity_lines.push(Line::from(vec![
            Span::styled(" ● ", Style::default().fg(activity_color(a.kind))),
            Span::raw(format!("{} ", a.user)),
            Span::styled(a.action, palette.muted()),
        ]));
        activity_lines.push(Line::from(Span::styled(
            format!("   {} · {}", a.system, a.timestamp),
            palette.muted(),
        )));
    }
    frame.render_widget(
        Paragraph::new(activity_lines).block(panel(" Recent Activity ", palette)),
        chunks[4],
    );
}

fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(title, palette.title()))
}

fn usage_bar(usage: u8) -> String {
    let filled = (usage.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_bar_bounds() {
        assert_eq!(usage_bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(usage_bar(100), "█".repeat(BAR_WIDTH));
        assert_eq!(usage_bar(50).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }
}
