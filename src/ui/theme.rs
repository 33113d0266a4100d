use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::catalog::Status;
use crate::config::Theme;
use crate::notify::NotificationKind;
use crate::overview::ActivityKind;

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub favorite: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::Gray,
                border: Color::DarkGray,
                accent: Color::Cyan,
                highlight_bg: Color::DarkGray,
                highlight_fg: Color::White,
                favorite: Color::Yellow,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                border: Color::Gray,
                accent: Color::Blue,
                highlight_bg: Color::LightBlue,
                highlight_fg: Color::Black,
                favorite: Color::Rgb(202, 138, 4),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Active => Color::Green,
        Status::Maintenance => Color::Yellow,
        Status::Development => Color::Blue,
        Status::Offline => Color::Red,
    }
}

pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Info => Color::Blue,
    }
}

pub fn activity_color(kind: ActivityKind) -> Color {
    match kind {
        ActivityKind::Login => Color::Blue,
        ActivityKind::Update => Color::Magenta,
        ActivityKind::Error => Color::Red,
        ActivityKind::Success => Color::Green,
    }
}

/// Cut `s` to fit `max_width` terminal columns, ending with an ellipsis.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Inventory Hub", 20), "Inventory Hub");
        assert_eq!(truncate_str("Inventory Hub", 6), "Inven…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // each emoji is two columns wide
        let out = truncate_str("📦📦📦📦", 5);
        assert_eq!(out, "📦📦…");
        assert!(out.width() <= 5);
    }

    #[test]
    fn test_palettes_differ() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.bg, dark.bg);
        assert_ne!(light.fg, dark.fg);
    }
}
