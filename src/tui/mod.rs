//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop only draws when something changed:
//!
//! - **Loading**: polls every ~100ms so the fetch result shows up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events, channel messages
//!   or terminal resize.
//!
//! ## Event Routing
//!
//! While the detail panel is open it sits on top of the lists. Pointer events
//! inside the panel never reach the list rows beneath it: moving over the panel
//! keeps the current hover, and a click only counts when it lands on the map
//! link line.
//!
//! Events queued behind an action that changes the lists (a favorite toggle,
//! a filter change, hover, the catalog arriving) wait for the next frame, so
//! every click is hit-tested against what is actually on screen.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::process::{Command, Stdio};
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::country::CountryRecord;
use crate::core::state::App;
use crate::source::{
    CountrySource, DataFetchError, FileSource, RestCountriesSource, RetryPolicy, load_catalog,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{CountryListState, DetailPanelLayout, ListEvent, filter_action};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which list has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Favorites,
    All,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Pane,
    pub favorites_list: CountryListState,
    pub all_list: CountryListState,
    /// Set while the detail panel is on screen.
    pub detail: Option<DetailPanelLayout>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Pane::All,
            favorites_list: CountryListState::new(),
            all_list: CountryListState::new(),
            detail: None,
        }
    }

    /// Forgets every on-screen area; the next render records the live ones.
    pub fn reset_hit_areas(&mut self) {
        self.favorites_list.area = Default::default();
        self.all_list.area = Default::default();
        self.detail = None;
    }

    fn switch_focus(&mut self, has_favorites: bool) {
        self.focus = match self.focus {
            Pane::All if has_favorites => Pane::Favorites,
            _ => Pane::All,
        };
    }

    /// Falls back to the all-countries list once the favorites list disappears.
    fn sync_focus(&mut self, has_favorites: bool) {
        if self.focus == Pane::Favorites && !has_favorites {
            self.focus = Pane::All;
        }
    }

    fn list_mut(&mut self, pane: Pane) -> &mut CountryListState {
        match pane {
            Pane::Favorites => &mut self.favorites_list,
            Pane::All => &mut self.all_list,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the country source named by the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn CountrySource>, DataFetchError> {
    match config.source.as_str() {
        "restcountries" => Ok(Arc::new(RestCountriesSource::new(
            Some(config.base_url.clone()),
            config.fields.clone(),
            config.timeout,
        )?)),
        "file" => {
            let path = config.file_path.clone().ok_or_else(|| {
                DataFetchError::Config(
                    "file source selected but no path given (--file, GLOBETROTTER_FILE or [file] path)"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(FileSource::new(path)))
        }
        other => Err(DataFetchError::Config(format!(
            "unknown source '{other}' (expected \"restcountries\" or \"file\")"
        ))),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(config.source.clone(), config.initial_filter.clone());
    let mut tui = TuiState::new();

    // Channel for actions from the background fetch
    let (tx, rx) = mpsc::channel();

    let fetch_handle = match build_source(&config) {
        Ok(source) => {
            let policy = RetryPolicy::new(config.retries, config.retry_delay);
            Some(spawn_fetch(source, policy, tx))
        }
        Err(e) => {
            warn!("Could not build country source: {}", e);
            update(&mut app, Action::CatalogFailed(e.to_string()));
            None
        }
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync_focus(!app.favorites.is_empty());

        if needs_redraw {
            let favorites = app.favorite_countries();
            let visible = app.visible_countries();
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, &favorites, &visible))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading() {
            std::time::Duration::from_millis(100)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        let mut events = first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate));
        if process_events(&mut events, &mut app, &mut tui) {
            break;
        }

        // Handle background task actions (the catalog fetch result)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            apply(&mut app, action);
        }
    }

    if let Some(handle) = fetch_handle {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Maps and applies events until one changes what the lists show.
///
/// Hit areas come from the last draw, so the batch stops after a layout
/// change and the rest of the events stay queued for the next frame.
/// Returns true when the app should quit.
fn process_events(
    events: &mut impl Iterator<Item = TuiEvent>,
    app: &mut App,
    tui: &mut TuiState,
) -> bool {
    for event in events {
        let Some(action) = map_event(&event, app, tui) else {
            continue;
        };
        let stale = changes_layout(&action);
        if apply(app, action) {
            return true;
        }
        if stale {
            break;
        }
    }
    false
}

/// Actions after which the recorded hit areas no longer match the screen.
fn changes_layout(action: &Action) -> bool {
    !matches!(action, Action::OpenMapsLink(_) | Action::Quit)
}

/// Runs one action through the reducer and executes its effect.
/// Returns true when the app should quit.
fn apply(app: &mut App, action: Action) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::OpenLink(url) => {
            if let Err(e) = open_link(&url) {
                warn!("Failed to open {}: {}", url, e);
                app.status_message = format!("Could not open link: {}", e);
            }
            false
        }
    }
}

fn spawn_fetch(
    source: Arc<dyn CountrySource>,
    policy: RetryPolicy,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning catalog fetch from {}", source.name());
    let handle = tokio::spawn(async move {
        let action = match load_catalog(source.as_ref(), policy).await {
            Ok(batch) => Action::CatalogLoaded(batch),
            Err(e) => Action::CatalogFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send catalog result: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Hands a URL to the platform's default opener without touching the terminal.
fn open_link(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    let mut child = command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap the opener so it doesn't linger as a zombie
    std::thread::spawn(move || child.wait());
    Ok(())
}

fn pane_records(app: &App, pane: Pane) -> Vec<Arc<CountryRecord>> {
    match pane {
        Pane::Favorites => app.favorite_countries(),
        Pane::All => app.visible_countries(),
    }
}

/// The list row under a screen position, with the pane it belongs to.
fn hit_record(
    app: &App,
    tui: &TuiState,
    column: u16,
    row: u16,
) -> Option<(Pane, usize, Arc<CountryRecord>)> {
    [(Pane::Favorites, &tui.favorites_list), (Pane::All, &tui.all_list)]
        .into_iter()
        .find_map(|(pane, list)| {
            let index = list.hit_test(column, row)?;
            let record = pane_records(app, pane).get(index).cloned()?;
            Some((pane, index, record))
        })
}

fn in_detail(tui: &TuiState, column: u16, row: u16) -> bool {
    tui.detail.is_some_and(|d| d.contains(column, row))
}

/// Translates one input event into at most one core action, updating
/// presentation state (focus, cursor) along the way.
fn map_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match *event {
        TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Resize => None,
        TuiEvent::Escape => app.hover.current().map(|_| Action::HoverLeave),
        TuiEvent::OpenMap => app.hover.current().cloned().map(Action::OpenMapsLink),
        TuiEvent::SwitchPane => {
            tui.switch_focus(!app.favorites.is_empty());
            None
        }
        TuiEvent::MouseMove(column, row) => {
            if in_detail(tui, column, row) {
                return None;
            }
            match hit_record(app, tui, column, row) {
                Some((_, _, record)) if app.hover.is_hovered(&record) => None,
                Some((_, _, record)) => Some(Action::HoverEnter(record)),
                None => app.hover.current().map(|_| Action::HoverLeave),
            }
        }
        TuiEvent::MouseClick(column, row) => {
            if in_detail(tui, column, row) {
                let on_link = tui.detail.is_some_and(|d| d.is_link(column, row));
                return on_link
                    .then(|| app.hover.current().cloned())
                    .flatten()
                    .map(Action::OpenMapsLink);
            }
            let (pane, index, record) = hit_record(app, tui, column, row)?;
            tui.focus = pane;
            tui.list_mut(pane).select(index);
            Some(Action::ToggleFavorite(record))
        }
        _ => {
            if let Some(action) = filter_action(event, &app.filter) {
                return Some(action);
            }
            let records = pane_records(app, tui.focus);
            let list = tui.list_mut(tui.focus);
            list.set_len(records.len());
            match list.handle_event(event)? {
                ListEvent::Moved(index) => records.get(index).cloned().map(Action::HoverEnter),
                ListEvent::Activate(index) => {
                    records.get(index).cloned().map(Action::ToggleFavorite)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, GlobetrotterConfig, resolve};
    use crate::core::normalize::NormalizedBatch;
    use crate::test_support::{country, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn loaded_app() -> App {
        let mut app = test_app();
        let mut andorra = country("Andorra", &["Europe"], true);
        andorra.maps_link = Some("https://goo.gl/maps/andorra".to_string());
        let batch = NormalizedBatch {
            records: vec![
                andorra,
                country("Aruba", &["North America"], false),
                country("Benin", &["Africa"], true),
            ],
            ..Default::default()
        };
        update(&mut app, Action::CatalogLoaded(batch));
        app
    }

    fn draw(app: &App, tui: &mut TuiState) {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let favorites = app.favorite_countries();
        let visible = app.visible_countries();
        terminal
            .draw(|f| ui::draw_ui(f, app, tui, &favorites, &visible))
            .unwrap();
    }

    /// Screen position of row `index` in the all-countries list.
    fn all_row(tui: &TuiState, index: u16) -> (u16, u16) {
        let area = tui.all_list.area;
        (area.x + 3, area.y + 1 + index)
    }

    fn name_of(action: &Option<Action>) -> Option<&str> {
        match action {
            Some(Action::HoverEnter(c))
            | Some(Action::ToggleFavorite(c))
            | Some(Action::OpenMapsLink(c)) => Some(c.common_name.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_mouse_move_hovers_row_and_leaves_empty_space() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        let (col, row) = all_row(&tui, 1);
        let action = map_event(&TuiEvent::MouseMove(col, row), &app, &mut tui);
        assert!(matches!(action, Some(Action::HoverEnter(_))));
        assert_eq!(name_of(&action), Some("Aruba"));

        // No hover yet, so leaving is a no-op
        let (col, row) = all_row(&tui, 10);
        assert!(map_event(&TuiEvent::MouseMove(col, row), &app, &mut tui).is_none());
    }

    #[test]
    fn test_moving_off_rows_clears_hover() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
        let (col, row) = all_row(&tui, 0);
        let action = map_event(&TuiEvent::MouseMove(col, row), &app, &mut tui).unwrap();
        update(&mut app, action);
        draw(&app, &mut tui);

        let (col, row) = all_row(&tui, 10);
        assert!(matches!(
            map_event(&TuiEvent::MouseMove(col, row), &app, &mut tui),
            Some(Action::HoverLeave)
        ));
    }

    #[test]
    fn test_click_toggles_favorite() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        let (col, row) = all_row(&tui, 2);
        let action = map_event(&TuiEvent::MouseClick(col, row), &app, &mut tui);
        assert!(matches!(action, Some(Action::ToggleFavorite(_))));
        assert_eq!(name_of(&action), Some("Benin"));

        update(&mut app, action.unwrap());
        assert!(app.favorites.contains("Benin"));
        assert!(app.catalog.find("Benin").is_none());
    }

    #[test]
    fn test_queued_click_waits_for_fresh_layout() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        // Two clicks on Aruba's row arrive in the same batch
        let (col, row) = all_row(&tui, 1);
        let mut events = vec![TuiEvent::MouseClick(col, row), TuiEvent::MouseClick(col, row)]
            .into_iter();
        assert!(!process_events(&mut events, &mut app, &mut tui));

        assert!(app.favorites.contains("Aruba"));
        assert!(app.catalog.find("Benin").is_some());
        assert_eq!(events.len(), 1);

        // Against the redrawn screen the cell is the favorites border
        draw(&app, &mut tui);
        assert!(!process_events(&mut events, &mut app, &mut tui));
        assert!(app.catalog.find("Benin").is_some());
        assert_eq!(app.favorites.len(), 1);
    }

    #[test]
    fn test_events_without_layout_change_drain_together() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        let mut events = vec![TuiEvent::Resize, TuiEvent::SwitchPane, TuiEvent::Quit].into_iter();
        assert!(process_events(&mut events, &mut app, &mut tui));
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_detail_panel_consumes_pointer_events() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);
        let andorra = app.catalog.find("Andorra").cloned().unwrap();
        update(&mut app, Action::HoverEnter(andorra));
        draw(&app, &mut tui);

        let detail = tui.detail.expect("detail panel shown");
        let link = detail.link_row.expect("link row visible");

        // Moving over the panel keeps the hover
        assert!(map_event(&TuiEvent::MouseMove(link.x, link.y), &app, &mut tui).is_none());

        // Clicking the link opens it and never toggles a favorite
        let action = map_event(&TuiEvent::MouseClick(link.x, link.y), &app, &mut tui);
        assert!(matches!(action, Some(Action::OpenMapsLink(_))));
        assert_eq!(name_of(&action), Some("Andorra"));

        // Clicking elsewhere inside the panel does nothing
        let inside = map_event(
            &TuiEvent::MouseClick(detail.area.x + 1, detail.area.y + 1),
            &app,
            &mut tui,
        );
        assert!(inside.is_none());
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_keyboard_cursor_hovers_and_activates() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        draw(&app, &mut tui);

        let action = map_event(&TuiEvent::CursorDown, &app, &mut tui);
        assert!(matches!(action, Some(Action::HoverEnter(_))));
        assert_eq!(name_of(&action), Some("Andorra"));

        let action = map_event(&TuiEvent::Activate, &app, &mut tui);
        assert!(matches!(action, Some(Action::ToggleFavorite(_))));
        assert_eq!(name_of(&action), Some("Andorra"));
    }

    #[test]
    fn test_tab_switches_only_when_favorites_exist() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        map_event(&TuiEvent::SwitchPane, &app, &mut tui);
        assert_eq!(tui.focus, Pane::All);

        let aruba = app.catalog.find("Aruba").cloned().unwrap();
        update(&mut app, Action::ToggleFavorite(aruba));
        map_event(&TuiEvent::SwitchPane, &app, &mut tui);
        assert_eq!(tui.focus, Pane::Favorites);

        let action = map_event(&TuiEvent::CursorDown, &app, &mut tui);
        assert_eq!(name_of(&action), Some("Aruba"));

        map_event(&TuiEvent::SwitchPane, &app, &mut tui);
        assert_eq!(tui.focus, Pane::All);
    }

    #[test]
    fn test_focus_falls_back_when_favorites_empty() {
        let mut tui = TuiState::new();
        tui.focus = Pane::Favorites;
        tui.sync_focus(false);
        assert_eq!(tui.focus, Pane::All);
    }

    #[test]
    fn test_keys_map_to_actions() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            map_event(&TuiEvent::Quit, &app, &mut tui),
            Some(Action::Quit)
        ));
        assert!(matches!(
            map_event(&TuiEvent::ContinentKey(4), &app, &mut tui),
            Some(Action::ToggleContinentFilter(name)) if name == "Europe"
        ));
        // Nothing hovered: Esc and m are no-ops
        assert!(map_event(&TuiEvent::Escape, &app, &mut tui).is_none());
        assert!(map_event(&TuiEvent::OpenMap, &app, &mut tui).is_none());
    }

    #[test]
    fn test_build_source() {
        let mut config = resolve(&GlobetrotterConfig::default(), &CliOverrides::default());

        config.source = "restcountries".to_string();
        assert_eq!(build_source(&config).unwrap().name(), "restcountries");

        config.source = "file".to_string();
        config.file_path = None;
        assert!(matches!(
            build_source(&config),
            Err(DataFetchError::Config(_))
        ));

        config.file_path = Some("countries.json".into());
        assert_eq!(build_source(&config).unwrap().name(), "file");

        config.source = "atlas".to_string();
        assert!(matches!(
            build_source(&config),
            Err(DataFetchError::Config(msg)) if msg.contains("atlas")
        ));
    }
}
