mod dashboard;
mod detail;
mod filters;
mod help;
mod overview;
mod theme;
mod toast;

use crate::app::{App, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
};
use theme::Palette;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    match app.view {
        View::Dashboard => dashboard::render(app, &palette, frame),
        View::Detail => detail::render(app, &palette, frame),
    }

    if app.show_filters {
        filters::render(app, &palette, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(&palette, frame);
    }

    if let Some(note) = app.notifier.current() {
        let remaining = app.notifier.remaining_fraction(tokio::time::Instant::now());
        toast::render(note, remaining, &palette, frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PortalConfig, Theme, ViewMode};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_dashboard_shows_sections() {
        let (app, _rx) = App::new(&PortalConfig::default());
        let text = screen_text(&app, 140, 50);
        assert!(text.contains("Your Favorites"));
        assert!(text.contains("Recommended for You"));
        assert!(text.contains("All Systems"));
        assert!(text.contains("CRM System"));
        assert!(text.contains("Under Development"));
    }

    #[tokio::test]
    async fn test_every_view_mode_and_theme_renders() {
        let (mut app, _rx) = App::new(&PortalConfig::default());
        for theme in [Theme::Light, Theme::Dark] {
            for mode in [ViewMode::Grid, ViewMode::List, ViewMode::Compact] {
                app.theme = theme;
                app.view_mode = mode;
                let text = screen_text(&app, 80, 24);
                assert!(text.contains("Gateway"));
            }
        }
    }

    #[tokio::test]
    async fn test_empty_state_rendered() {
        let (mut app, _rx) = App::new(&PortalConfig::default());
        for c in "zzz".chars() {
            app.push_search_char(c);
        }
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("No systems match \"zzz\""));
    }

    #[tokio::test]
    async fn test_overlays_and_detail_render() {
        let (mut app, _rx) = App::new(&PortalConfig::default());
        app.show_filters = true;
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("Sort By"));

        app.show_filters = false;
        app.show_help = true;
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("Keybindings"));

        app.show_help = false;
        app.toggle_favorite(1);
        app.open_detail();
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("removed from favorites"));
        assert!(text.contains("2.4.1") || text.contains("3.1.0"));
    }

    #[tokio::test]
    async fn test_tiny_terminal_does_not_panic() {
        let (mut app, _rx) = App::new(&PortalConfig::default());
        app.show_filters = true;
        app.show_help = true;
        app.toggle_favorite(3);
        screen_text(&app, 10, 5);
    }
}
