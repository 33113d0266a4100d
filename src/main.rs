mod app;
mod catalog;
mod config;
mod favorites;
mod launch;
mod logging;
mod notify;
mod overview;
mod pipeline;
mod ui;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use app::{App, InputMode, View};
use clap::{Parser, Subcommand};
use config::{PortalConfig, Theme, ViewMode};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use overview::QuickAction;
use pipeline::{CategoryFilter, SortKey, ViewParams};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Interval, MissedTickBehavior};

/// Terminal dashboard for the internal business systems
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Start in this theme
    #[arg(long, value_enum, global = true)]
    theme: Option<Theme>,

    /// Start in this view mode
    #[arg(long, value_enum, global = true)]
    view: Option<ViewMode>,

    /// Where the TUI writes its log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard (default)
    Run,
    /// Print the filtered catalog and exit
    List {
        /// Case-insensitive search over name, description, category and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category to show, or "all"
        #[arg(long, default_value = "all", value_parser = parse_category)]
        category: CategoryFilter,
        /// Only systems carrying one of these tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Sort key
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Treat these ids as favorites instead of the configured ones (repeatable)
        #[arg(long)]
        favorite: Vec<u32>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_category(s: &str) -> Result<CategoryFilter, String> {
    CategoryFilter::parse(s).ok_or_else(|| {
        format!("unknown category '{s}' (expected all, sales, operations, hr, analytics or security)")
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => PortalConfig::load(path),
        None => PortalConfig::load_default(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(view) = cli.view {
        config.view_mode = view;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::List {
            search,
            category,
            tag,
            sort,
            favorite,
            json,
        } => {
            logging::init_stderr(&config.log_level);
            let params = ViewParams {
                search,
                category,
                sort: sort.unwrap_or(config.sort),
                tags: tag.into_iter().collect(),
            };
            if !favorite.is_empty() {
                config.favorites = favorite;
            }
            print_list(&mut std::io::stdout().lock(), &config, &params, json)?;
        }
        Commands::Run => {
            let log_path = cli
                .log_file
                .or_else(config::default_log_path)
                .unwrap_or_else(|| std::env::temp_dir().join("employee-portal.log"));
            let _guard = logging::init_file(&log_path, &config.log_level)?;
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                log = %log_path.display(),
                "starting employee portal"
            );

            let (mut app, mut dismiss_rx) = App::new(&config);

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app, &mut dismiss_rx).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "event loop failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            tracing::info!("bye");
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ListOutput<'a> {
    favorites: Vec<&'a catalog::System>,
    recommended: Vec<&'a catalog::System>,
    other: Vec<&'a catalog::System>,
}

fn print_list(
    out: &mut impl Write,
    config: &PortalConfig,
    params: &ViewParams,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let systems = catalog::catalog();
    let favorites = favorites::FavoriteSet::from_iter(config.known_favorites(&systems));
    let parts = pipeline::derive(&systems, params, &favorites);
    tracing::debug!(rows = parts.len(), "listing catalog");

    if json {
        let listing = ListOutput {
            favorites: parts.favorites.clone(),
            recommended: parts.recommended.clone(),
            other: parts.other.clone(),
        };
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(());
    }

    if parts.is_empty() {
        writeln!(out, "{}", pipeline::empty_state_message(params))?;
        return Ok(());
    }

    let mut current = None;
    for (section, system) in parts.rows() {
        if current != Some(section) {
            current = Some(section);
            writeln!(out, "{}", section.title())?;
        }
        writeln!(
            out,
            "  {:>2}  {:<22} {:<11} {:<12} {:>3}%  {}",
            system.id,
            system.name,
            system.category.as_str(),
            system.status.as_str(),
            system.usage,
            system.link().unwrap_or("(under development)")
        )?;
    }
    Ok(())
}

/// Redraw cadence for the toast countdown bar. The tick arm is idle while no
/// toast is visible, so missed ticks are skipped rather than replayed.
fn redraw_ticker() -> Interval {
    let mut tick = tokio::time::interval(Duration::from_millis(200));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tick
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    dismiss_rx: &mut UnboundedReceiver<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStream::new();
    let mut tick = redraw_ticker();

    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key);
                    }
                }
                // Resize and the rest only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(generation) = dismiss_rx.recv() => {
                app.notifier.on_dismiss(generation);
            }
            _ = tick.tick(), if app.notifier.current().is_some() => {}
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }
    if app.show_filters {
        handle_filters_key(app, key);
        return;
    }
    if handle_global_key(app, key) {
        return;
    }
    match app.view {
        View::Dashboard => handle_dashboard_key(app, key),
        View::Detail => handle_detail_key(app, key),
    }
}

/// Keys shared by the dashboard and the detail view. Returns true if consumed.
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('x') => app.notifier.dismiss(),
        KeyCode::Char(' ') => match app.view {
            View::Dashboard => app.toggle_favorite_selected(),
            View::Detail => {
                if let Some(id) = app.detail_id {
                    app.toggle_favorite(id);
                }
            }
        },
        KeyCode::Char('o') => app.open_selected_link(),
        KeyCode::Char('y') => app.copy_selected_link(),
        KeyCode::Char(c) => match QuickAction::from_digit(c) {
            Some(action) => app.trigger_quick_action(action),
            None => return false,
        },
        _ => return false,
    }
    true
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Tab => app.cycle_category(true),
        KeyCode::BackTab => app.cycle_category(false),
        KeyCode::Char('s') => app.cycle_sort(true),
        KeyCode::Char('S') => app.cycle_sort(false),
        KeyCode::Char('v') => app.cycle_view_mode(),
        KeyCode::Char('f') => app.show_filters = true,
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

fn handle_filters_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => app.show_filters = false,
        KeyCode::Left | KeyCode::Char('h') => app.cycle_sort(false),
        KeyCode::Right | KeyCode::Char('l') => app.cycle_sort(true),
        KeyCode::Down | KeyCode::Char('j') => app.tag_cursor_next(),
        KeyCode::Up | KeyCode::Char('k') => app.tag_cursor_prev(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_tag_at_cursor(),
        KeyCode::Char('x') => app.clear_tags(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    if let KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace = key.code {
        app.close_detail();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn new_app() -> App {
        App::new(&PortalConfig::default()).0
    }

    #[tokio::test]
    async fn test_search_mode_captures_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Editing);
        // 'q' and 't' are text while editing
        for c in "qt".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(!app.should_quit);
        assert_eq!(app.params.search, "qt");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Esc);
        assert!(app.params.search.is_empty());
    }

    #[tokio::test]
    async fn test_space_toggles_favorite() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.favorites.contains(1));
        assert!(app.notifier.current().is_some());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.notifier.current().is_none());
    }

    #[tokio::test]
    async fn test_filters_panel_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.show_filters);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.params.sort, SortKey::Category);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.params.tags.contains("Sales"));
        // 'q' closes the panel instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_filters);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_next_key() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_detail_navigation() {
        let mut app = new_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Detail);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.favorites.contains(1));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.view, View::Dashboard);
        assert!(!app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_redraw_ticker_does_not_burst_after_idle() {
        use futures_util::FutureExt;

        let mut tick = redraw_ticker();
        tick.tick().await;
        tokio::time::advance(Duration::from_secs(60)).await;

        let mut ready = 0;
        while tick.tick().now_or_never().is_some() {
            ready += 1;
            assert!(ready <= 1, "missed ticks were replayed");
        }
        assert_eq!(ready, 1);
    }

    fn list_output(config: &PortalConfig, params: &ViewParams, json: bool) -> String {
        let mut buf = Vec::new();
        print_list(&mut buf, config, params, json).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_text_sections() {
        let out = list_output(&PortalConfig::default(), &ViewParams::default(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Your Favorites");
        assert!(lines[1].contains("CRM System"));
        assert!(lines[2].contains("Inventory Hub"));
        assert_eq!(lines[3], "Recommended for You");
        assert!(lines[4].contains("Delivery Network"));
        assert_eq!(lines[5], "All Systems");
        assert!(out.contains("(under development)"));
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_list_text_empty_state() {
        let params = ViewParams {
            search: "zzz".to_string(),
            ..ViewParams::default()
        };
        let out = list_output(&PortalConfig::default(), &params, false);
        assert_eq!(out, "No systems match \"zzz\"\n");
    }

    #[test]
    fn test_list_json_follows_favorites() {
        let config = PortalConfig {
            favorites: vec![3],
            ..PortalConfig::default()
        };
        let out = list_output(&config, &ViewParams::default(), true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names = |key: &str| -> Vec<String> {
            value[key]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["name"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(names("favorites"), vec!["Delivery Network"]);
        assert_eq!(names("recommended"), vec!["CRM System", "Inventory Hub"]);
        assert_eq!(names("other").len(), 3);
        assert!(value["favorites"][0]["tags"].is_array());
    }

    #[test]
    fn test_parse_category_arg() {
        assert_eq!(parse_category("all"), Ok(CategoryFilter::All));
        assert!(parse_category("finance").is_err());
    }

    #[test]
    fn test_cli_parses_list() {
        let cli = Cli::try_parse_from([
            "employee-portal",
            "list",
            "--search",
            "crm",
            "--tag",
            "Sales",
            "--sort",
            "last-accessed",
            "--theme",
            "dark",
        ])
        .unwrap();
        assert_eq!(cli.theme, Some(Theme::Dark));
        match cli.command {
            Some(Commands::List { search, tag, sort, .. }) => {
                assert_eq!(search, "crm");
                assert_eq!(tag, vec!["Sales"]);
                assert_eq!(sort, Some(SortKey::LastAccessed));
            }
            _ => panic!("Expected list command"),
        }
    }
}
