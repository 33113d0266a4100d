use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::theme::{Palette, status_color};

pub fn render(app: &App, palette: &Palette, frame: &mut Frame) {
    let area = frame.area();

    let Some(system) = app.detail_system() else {
        let msg = Paragraph::new("No system selected").style(palette.muted());
        frame.render_widget(msg, area);
        return;
    };

    // Layout: metadata(7) + gauges(6) + description(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Metadata block ──
    let label = |s: &'static str| Span::styled(s, palette.muted());
    let favorite = if app.favorites.contains(system.id) {
        Span::styled("★ favorite", Style::default().fg(palette.favorite))
    } else {
        Span::styled("☆ not a favorite", palette.muted())
    };
    let last_accessed = system
        .last_accessed
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "never".to_string());
    let link = match system.link() {
        Some(url) => Span::styled(
            url.to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED),
        ),
        None => Span::styled("Under Development", palette.muted()),
    };

    let meta_lines = vec![
        Line::from(vec![
            Span::raw(format!(" {} ", system.icon)),
            Span::styled(system.name.as_str(), palette.title()),
            Span::styled(format!("  v{}", system.version), palette.muted()),
            Span::raw("   "),
            favorite,
        ]),
        Line::from(vec![
            label(" Status: "),
            Span::styled(
                system.status.as_str(),
                Style::default().fg(status_color(system.status)),
            ),
            label("   Category: "),
            Span::raw(system.category.as_str()),
            label("   Users: "),
            Span::raw(system.users.to_string()),
        ]),
        Line::from(vec![label(" Last accessed: "), Span::raw(last_accessed)]),
        Line::from(vec![label(" Link: "), link]),
        Line::from(vec![
            label(" Tags: "),
            Span::styled(
                system.tags.join(", "),
                Style::default().fg(palette.accent),
            ),
        ]),
    ];
    let meta = Paragraph::new(meta_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border())
            .title(" System Detail "),
    );
    frame.render_widget(meta, chunks[0]);

    // ── Gauges ──
    let gauge_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(chunks[1]);
    let usage = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(" Usage "),
        )
        .gauge_style(Style::default().fg(palette.accent))
        .percent(u16::from(system.usage.min(100)));
    frame.render_widget(usage, gauge_chunks[0]);
    let uptime = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(" Uptime "),
        )
        .gauge_style(Style::default().fg(status_color(system.status)))
        .ratio((f64::from(system.uptime) / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", system.uptime));
    frame.render_widget(uptime, gauge_chunks[1]);

    // ── Description ──
    let description = Paragraph::new(system.description.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(" Description "),
        );
    frame.render_widget(description, chunks[2]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(" Space", palette.key()),
        Span::raw(" Favorite  "),
        Span::styled("o", palette.key()),
        Span::raw(" Open  "),
        Span::styled("y", palette.key()),
        Span::raw(" Yank Link  "),
        Span::styled("Esc", palette.key()),
        Span::raw(" Back"),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}
