use crate::app::App;
use crate::pipeline::SortKey;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::centered_rect;
use super::theme::Palette;

/// Filter panel overlay: sort key on top, tag toggles below.
pub fn render(app: &App, palette: &Palette, frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Filters ")
        .title_bottom(
            Line::from(" ←→ sort · ↑↓ tag · Space toggle · x clear · Esc close ")
                .style(palette.muted()),
        )
        .style(palette.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    // ── Sort ──
    let mut sort_spans = vec![Span::styled(" Sort By: ", palette.title())];
    for key in SortKey::ALL {
        let style = if key == app.params.sort {
            palette.highlight()
        } else {
            palette.muted()
        };
        sort_spans.push(Span::styled(format!(" {} ", key.label()), style));
    }
    frame.render_widget(
        Paragraph::new(vec![Line::from(""), Line::from(sort_spans)]),
        chunks[0],
    );

    // ── Tags ──
    let items: Vec<ListItem> = app
        .all_tags
        .iter()
        .map(|tag| {
            let selected = app.params.tags.contains(tag);
            let (mark, style) = if selected {
                ("[x] ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            } else {
                ("[ ] ", Style::default().fg(palette.fg))
            };
            ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(tag.as_str(), style)]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(palette.border())
                .title(format!(" Tags ({} selected) ", app.params.tags.len())),
        )
        .highlight_style(palette.highlight())
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.tag_cursor));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
