use crate::app::{App, InputMode};
use crate::catalog::System;
use crate::config::ViewMode;
use crate::pipeline::{CategoryFilter, Section};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::overview;
use super::theme::{Palette, status_color, truncate_str};

/// Terminals narrower than this drop the overview column.
const OVERVIEW_MIN_WIDTH: u16 = 110;

pub fn render(app: &App, palette: &Palette, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + categories(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(app, palette, frame, chunks[0]);
    render_search(app, palette, frame, chunks[1]);
    render_categories(app, palette, frame, chunks[2]);

    let body = if area.width >= OVERVIEW_MIN_WIDTH {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(46)])
            .split(chunks[3])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1)])
            .split(chunks[3])
    };

    render_systems(app, palette, frame, body[0]);
    if let Some(side) = body.get(1) {
        overview::render(app, palette, frame, *side);
    }

    render_status_bar(palette, frame, chunks[4]);
}

fn render_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let visible = app.rows().len();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ◆ Gateway ", palette.title()),
        Span::styled("Employee Portal", palette.muted()),
        Span::raw(format!("   [{} of {} systems]", visible, app.catalog.len())),
        Span::styled(
            if app.favorites.is_empty() {
                "  no favorites".to_string()
            } else {
                format!("  ★ {}", app.favorites.len())
            },
            Style::default().fg(palette.favorite),
        ),
        Span::styled(
            format!(
                "   sort: {}  view: {}  theme: {:?}",
                app.params.sort.label(),
                app.view_mode.label(),
                app.theme
            ),
            palette.muted(),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border()),
    );
    frame.render_widget(header, area);
}

fn render_search(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(palette.favorite),
        InputMode::Normal => palette.muted(),
    };
    let label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter to apply, Esc to cancel): "
    } else {
        " 🔍 Search systems (/): "
    };
    let search = Paragraph::new(format!("{}{}", label, app.params.search))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search, area);

    if app.input_mode == InputMode::Editing {
        let cursor_x = search_cursor_x(area, label, &app.params.search);
        if cursor_x < area.right() {
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

/// Column after the typed text. Saturates for text wider than any terminal.
fn search_cursor_x(area: Rect, label: &str, search: &str) -> u16 {
    use unicode_width::UnicodeWidthStr;
    let typed = u16::try_from(label.width().saturating_add(search.width())).unwrap_or(u16::MAX);
    area.x.saturating_add(1).saturating_add(typed)
}

fn render_categories(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = app
        .category_options
        .iter()
        .map(|c| Line::from(c.label()))
        .collect();
    let selected = app
        .category_options
        .iter()
        .position(|c| *c == app.params.category)
        .unwrap_or(0);
    let tag_info = if app.params.tags.is_empty() {
        String::new()
    } else {
        format!(" tags: {} ", app.params.tags.len())
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(palette.muted())
        .highlight_style(palette.title().add_modifier(Modifier::UNDERLINED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(" Category [Tab/Shift-Tab] ")
                .title_bottom(Line::from(tag_info).alignment(Alignment::Right)),
        );
    frame.render_widget(tabs, area);
}

fn render_systems(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(format!(" Systems · {} ", app.view_mode.label()));

    if let Some(message) = app.empty_state_message() {
        let hint = if app.params.category != CategoryFilter::All || !app.params.tags.is_empty() {
            "Try another category or clear the tag filters (f)."
        } else {
            "Try a different search term (Esc clears it)."
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, palette.title())),
            Line::from(Span::styled(hint, palette.muted())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = 0;
    let mut current_section: Option<Section> = None;

    for (i, (section, system)) in app.rows().into_iter().enumerate() {
        if current_section != Some(section) {
            current_section = Some(section);
            items.push(section_header(app, section, palette));
        }
        if i == app.selected {
            selected_item = items.len();
        }
        let favorite = app.favorites.contains(system.id);
        let lines = match app.view_mode {
            ViewMode::Grid => grid_card(system, favorite, palette, width),
            ViewMode::List => list_row(system, favorite, palette, width),
            ViewMode::Compact => vec![compact_row(system, favorite, palette, width)],
        };
        items.push(ListItem::new(lines));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(selected_item));
    frame.render_stateful_widget(list, area, &mut state);
}

fn section_header(app: &App, section: Section, palette: &Palette) -> ListItem<'static> {
    let count = app.partitions().section(section).len();
    let marker = match section {
        Section::Favorites => "★",
        Section::Recommended => "✦",
        Section::Other => "▦",
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("{} {} ", marker, section.title()), palette.title()),
        Span::styled(format!("({})", count), palette.muted()),
    ]))
}

fn star(favorite: bool, palette: &Palette) -> Span<'static> {
    if favorite {
        Span::styled("★ ", Style::default().fg(palette.favorite))
    } else {
        Span::styled("☆ ", palette.muted())
    }
}

fn status_badge(system: &System) -> Span<'static> {
    Span::styled(
        format!(" {} ", system.status.as_str()),
        Style::default().fg(status_color(system.status)),
    )
}

fn access_span(system: &System, palette: &Palette) -> Span<'static> {
    if system.link().is_some() {
        Span::styled(
            "Access System ↗",
            Style::default().fg(status_color(system.status)).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Under Development", palette.muted().add_modifier(Modifier::DIM))
    }
}

fn grid_card(
    system: &System,
    favorite: bool,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    let last = system
        .last_accessed
        .map(|d| format!("  last accessed {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    vec![
        Line::from(vec![
            star(favorite, palette),
            Span::raw(format!("{} ", system.icon)),
            Span::styled(system.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  v{}", system.version), palette.muted()),
            status_badge(system),
        ]),
        Line::from(Span::styled(
            format!("    {}", truncate_str(&system.description, width.saturating_sub(4))),
            palette.muted(),
        )),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!(
                    "usage {}%  uptime {}%  users {}  ",
                    system.usage, system.uptime, system.users
                ),
                palette.muted(),
            ),
            Span::styled(
                format!("#{}  ", system.tags.join(" #")),
                Style::default().fg(palette.accent),
            ),
            access_span(system, palette),
        ]),
        Line::from(Span::styled(format!("    {}", last), palette.muted())),
    ]
}

fn list_row(
    system: &System,
    favorite: bool,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            star(favorite, palette),
            Span::styled(
                format!("{:<22}", truncate_str(&system.name, 22)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<12}", system.category.as_str()), palette.muted()),
            status_badge(system),
            Span::styled(format!(" {:>3}% ", system.usage), palette.muted()),
            access_span(system, palette),
        ]),
        Line::from(Span::styled(
            format!("  {}", truncate_str(&system.description, width.saturating_sub(2))),
            palette.muted(),
        )),
    ]
}

fn compact_row(system: &System, favorite: bool, palette: &Palette, width: usize) -> Line<'static> {
    Line::from(vec![
        star(favorite, palette),
        Span::raw(format!("{} ", system.icon)),
        Span::raw(truncate_str(&system.name, width.saturating_sub(18))),
        status_badge(system),
    ])
}

fn render_status_bar(palette: &Palette, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (key, label) in [
        (" ↑↓", " Select  "),
        ("/", " Search  "),
        ("Space", " Favorite  "),
        ("Enter", " Details  "),
        ("o", " Open  "),
        ("f", " Filters  "),
        ("s", " Sort  "),
        ("v", " View  "),
        ("t", " Theme  "),
        ("?", " Help  "),
        ("q", " Quit"),
    ] {
        spans.push(Span::styled(key, palette.key()));
        spans.push(Span::raw(label));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
