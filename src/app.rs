use tokio::sync::mpsc::UnboundedReceiver;

use crate::catalog::{self, System};
use crate::config::{PortalConfig, Theme, ViewMode};
use crate::favorites::FavoriteSet;
use crate::launch;
use crate::notify::{NotificationKind, Notifier};
use crate::overview::QuickAction;
use crate::pipeline::{self, CategoryFilter, Partitions, Section, ViewParams};

/// Which screen is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Detail,
}

/// Input mode for the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state. Owned by the event loop; renderers borrow it.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,
    pub show_filters: bool,

    // Fixed for the whole session
    pub catalog: Vec<System>,
    pub all_tags: Vec<String>,
    pub category_options: Vec<CategoryFilter>,

    pub params: ViewParams,
    pub favorites: FavoriteSet,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,

    // Index into `rows()`
    pub selected: usize,
    pub tag_cursor: usize,
    pub detail_id: Option<u32>,

    pub notifier: Notifier,
}

impl App {
    /// Build the app from startup preferences. The receiver yields expired
    /// notification generations and belongs to the event loop.
    pub fn new(config: &PortalConfig) -> (Self, UnboundedReceiver<u64>) {
        let catalog = catalog::catalog();
        let all_tags = catalog::all_tags(&catalog);
        let category_options = std::iter::once(CategoryFilter::All)
            .chain(
                catalog::categories(&catalog)
                    .into_iter()
                    .map(CategoryFilter::Only),
            )
            .collect();
        let favorites = FavoriteSet::from_iter(config.known_favorites(&catalog));
        let (notifier, dismiss_rx) = Notifier::new(config.notification_ttl());
        tracing::debug!(
            favorites = ?favorites.ids().collect::<Vec<_>>(),
            theme = ?config.theme,
            "app state initialised"
        );

        let app = Self {
            should_quit: false,
            view: View::Dashboard,
            show_help: false,
            show_filters: false,

            catalog,
            all_tags,
            category_options,

            params: ViewParams {
                sort: config.sort,
                ..ViewParams::default()
            },
            favorites,
            theme: config.theme,
            view_mode: config.view_mode,
            input_mode: InputMode::Normal,

            selected: 0,
            tag_cursor: 0,
            detail_id: None,

            notifier,
        };
        (app, dismiss_rx)
    }

    pub fn partitions(&self) -> Partitions<'_> {
        pipeline::derive(&self.catalog, &self.params, &self.favorites)
    }

    pub fn rows(&self) -> Vec<(Section, &System)> {
        self.partitions().rows()
    }

    pub fn selected_system(&self) -> Option<&System> {
        self.rows().get(self.selected).map(|(_, s)| *s)
    }

    /// Shown in place of the list when nothing survives the filters.
    pub fn empty_state_message(&self) -> Option<String> {
        if !self.partitions().is_empty() {
            return None;
        }
        Some(pipeline::empty_state_message(&self.params))
    }

    fn params_changed(&mut self) {
        tracing::debug!(
            search = %self.params.search,
            category = self.params.category.label(),
            sort = self.params.sort.label(),
            tags = self.params.tags.len(),
            "view parameters changed"
        );
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn select_id(&mut self, id: u32) {
        if let Some(pos) = self.rows().iter().position(|(_, s)| s.id == id) {
            self.selected = pos;
        } else {
            self.clamp_selection();
        }
    }

    // ── Navigation ──

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    pub fn open_detail(&mut self) {
        if let Some(id) = self.selected_system().map(|s| s.id) {
            self.detail_id = Some(id);
            self.view = View::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_id = None;
        self.view = View::Dashboard;
    }

    pub fn detail_system(&self) -> Option<&System> {
        self.detail_id.and_then(|id| catalog::find(&self.catalog, id))
    }

    // ── View parameters ──

    pub fn push_search_char(&mut self, c: char) {
        self.params.search.push(c);
        self.selected = 0;
        self.params_changed();
    }

    pub fn pop_search_char(&mut self) {
        if self.params.search.pop().is_some() {
            self.params_changed();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.params.search.is_empty() {
            self.params.search.clear();
            self.selected = 0;
            self.params_changed();
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let n = self.category_options.len();
        if n == 0 {
            return;
        }
        let current = self
            .category_options
            .iter()
            .position(|c| *c == self.params.category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        self.params.category = self.category_options[next];
        self.selected = 0;
        self.params_changed();
    }

    pub fn cycle_sort(&mut self, forward: bool) {
        self.params.sort = if forward {
            self.params.sort.next()
        } else {
            self.params.sort.prev()
        };
        self.params_changed();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.params.tags.remove(tag) {
            self.params.tags.insert(tag.to_string());
        }
        self.selected = 0;
        self.params_changed();
    }

    pub fn toggle_tag_at_cursor(&mut self) {
        if let Some(tag) = self.all_tags.get(self.tag_cursor).cloned() {
            self.toggle_tag(&tag);
        }
    }

    pub fn clear_tags(&mut self) {
        if !self.params.tags.is_empty() {
            self.params.tags.clear();
            self.params_changed();
        }
    }

    pub fn tag_cursor_next(&mut self) {
        if self.tag_cursor + 1 < self.all_tags.len() {
            self.tag_cursor += 1;
        }
    }

    pub fn tag_cursor_prev(&mut self) {
        self.tag_cursor = self.tag_cursor.saturating_sub(1);
    }

    // ── Favorites, theme, view mode ──

    pub fn toggle_favorite(&mut self, id: u32) {
        let Some(name) = catalog::find(&self.catalog, id).map(|s| s.name.clone()) else {
            return;
        };
        let change = self.favorites.toggle(id);
        tracing::info!(id, ?change, "favorite toggled");
        self.notifier.show(
            format!("{} {} favorites", name, change.describe()),
            NotificationKind::Success,
        );
        self.select_id(id);
    }

    pub fn toggle_favorite_selected(&mut self) {
        if let Some(id) = self.selected_system().map(|s| s.id) {
            self.toggle_favorite(id);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
    }

    // ── Outbound actions ──

    fn target_system(&self) -> Option<&System> {
        match self.view {
            View::Detail => self.detail_system(),
            View::Dashboard => self.selected_system(),
        }
    }

    pub fn open_selected_link(&mut self) {
        let Some(system) = self.target_system() else {
            return;
        };
        let (message, kind) = match launch::open_system(system) {
            Ok(_) => (format!("Opening {}", system.name), NotificationKind::Info),
            Err(e @ launch::LaunchError::Unavailable(_)) => {
                (e.user_message(), NotificationKind::Warning)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to open system");
                (e.user_message(), NotificationKind::Error)
            }
        };
        self.notifier.show(message, kind);
    }

    pub fn copy_selected_link(&mut self) {
        let Some(system) = self.target_system() else {
            return;
        };
        let Some(link) = system.link().map(str::to_string) else {
            let message = launch::LaunchError::Unavailable(system.name.clone()).user_message();
            self.notifier.show(message, NotificationKind::Warning);
            return;
        };
        match launch::copy_to_clipboard(&link) {
            Ok(()) => self
                .notifier
                .show(format!("Copied: {}", link), NotificationKind::Success),
            Err(_) => self.notifier.show(
                format!("Link: {} (clipboard not available)", link),
                NotificationKind::Info,
            ),
        }
    }

    pub fn trigger_quick_action(&mut self, action: QuickAction) {
        tracing::info!(action = action.name(), "quick action");
        match action {
            QuickAction::GlobalSearch => {
                self.view = View::Dashboard;
                self.input_mode = InputMode::Editing;
            }
            QuickAction::Support => self.show_help = true,
            QuickAction::Notifications | QuickAction::Settings => {}
        }
        self.notifier
            .show(format!("{} activated", action.name()), NotificationKind::Success);
    }
}
