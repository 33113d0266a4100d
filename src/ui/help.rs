use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use super::theme::Palette;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("t", "Toggle light/dark theme"),
            ("1-4", "Quick actions"),
            ("x", "Dismiss notification (clears tags in Filters)"),
        ],
    ),
    (
        "Dashboard",
        &[
            ("↑/k ↓/j", "Select system"),
            ("g/G", "Jump to first/last"),
            ("/", "Search (name, description, category, tags)"),
            ("Esc", "Clear search"),
            ("Tab/S-Tab", "Next/previous category"),
            ("s/S", "Next/previous sort key"),
            ("f", "Sort and tag filters"),
            ("v", "Cycle grid/list/compact view"),
            ("Space", "Toggle favorite"),
            ("Enter", "Open system detail"),
            ("o", "Open system in browser"),
            ("y", "Copy system link"),
        ],
    ),
    (
        "Filters Panel",
        &[
            ("←/h →/l", "Previous/next sort key"),
            ("↑/k ↓/j", "Move tag cursor"),
            ("Space/Enter", "Toggle tag"),
            ("x", "Clear selected tags"),
            ("Esc/f/q", "Close panel"),
        ],
    ),
    (
        "Detail View",
        &[
            ("Space", "Toggle favorite"),
            ("o / y", "Open / copy link"),
            ("Esc", "Back to dashboard"),
        ],
    ),
];

pub fn render(palette: &Palette, frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(format!("  {}", title), palette.title())));
        for (key, action) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), Style::default().fg(palette.favorite)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Help · Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(palette.muted())),
        )
        .style(palette.base());

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(section: &str) -> &'static [(&'static str, &'static str)] {
        SECTIONS
            .iter()
            .find(|(title, _)| *title == section)
            .map(|(_, b)| *b)
            .unwrap()
    }

    #[test]
    fn test_x_documents_filters_exception() {
        let global_x = bindings("Global").iter().find(|(k, _)| *k == "x").unwrap();
        assert!(global_x.1.contains("Filters"));
        let filters_x = bindings("Filters Panel").iter().find(|(k, _)| *k == "x").unwrap();
        assert_eq!(filters_x.1, "Clear selected tags");
    }
}
