//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks
//!   (terminal input, player snapshots, refresh cycles, play-all runs).
//! - The event loop draws each frame, then awaits the next message or UI tick.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Playback commands go out through `PlayerHandle` on spawned tasks, so the
//!   loop never waits on the player.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use feed_proto::config::Config;
use feed_proto::episode::{Catalog, Episode};
use feed_proto::news::NewsFeed;
use feed_proto::player::{AudioCommands, PlayerSnapshot};

use crate::{
    action::{Action, ComponentId, Workspace},
    app_state::AppState,
    component::Component,
    components::{
        banner::Banner, editors_pick::EditorsPick, episode_detail::EpisodeDetail,
        episode_list::EpisodeList, header::Header, help_overlay::HelpOverlay, news_list::NewsList,
    },
    play_all::{run_play_all, NavError, Navigator, Route},
    player::PlayerHandle,
    refresh::{run_cycle, FeedSource, RefreshEvent},
    screen::{AudioScreen, ButtonIntent},
    widgets::{status_bar, toast::ToastManager},
    workspace::{TabPress, WorkspaceManager},
};

const BANNER_TOAST: &str = "Open your podcast app for more News+ Narrated stories";
const REFRESH_FAILED_TOAST: &str = "Couldn't check for new podcasts";

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Player(PlayerSnapshot),
    Refresh(RefreshEvent),
    /// A play-all run started from the header button finished (either way).
    PlayAllDone,
    Navigate(Route),
}

/// `Navigator` that forwards routes into the app's message channel.
struct ChannelNavigator {
    tx: mpsc::Sender<AppMessage>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) -> Result<(), NavError> {
        self.tx
            .try_send(AppMessage::Navigate(route))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => NavError::Busy,
                mpsc::error::TrySendError::Closed(_) => NavError::Closed,
            })
    }
}

/// Persisted between runs in `ui_state.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct UiSessionState {
    workspace: Workspace,
    selected_episode_id: Option<String>,
}

/// Screen areas from the last draw, for mouse hit-testing.
#[derive(Debug, Default, Clone, Copy)]
struct PaneAreas {
    header: Rect,
    editors_pick: Rect,
    banner: Rect,
    episode_list: Rect,
    news_list: Rect,
}

pub struct App {
    state: AppState,
    wm: WorkspaceManager,

    header: Header,
    editors_pick: EditorsPick,
    banner: Banner,
    episode_list: EpisodeList,
    news_list: NewsList,
    episode_detail: EpisodeDetail,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    player: PlayerHandle,
    source: Arc<dyn FeedSource>,
    settle: Duration,
    ui_state_path: PathBuf,
    tx: Option<mpsc::Sender<AppMessage>>,
    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        catalog: Catalog,
        news: NewsFeed,
        player: PlayerHandle,
        source: Arc<dyn FeedSource>,
        ui_state_path: PathBuf,
    ) -> Self {
        let session = load_ui_session_state(&ui_state_path);
        let audio = AudioScreen::new(catalog, config.feed.editors_pick_count);
        let mut state = AppState::new(audio, news, config.ui.color_scheme);
        state.workspace = session.workspace;

        let mut episode_list = EpisodeList::new();
        episode_list.sync(&state);
        if let Some(id) = session.selected_episode_id.as_deref() {
            if !episode_list.select_id(id) {
                debug!("restored selection {} is no longer in the list", id);
            }
        }

        Self {
            wm: WorkspaceManager::new(session.workspace, config.ui.show_keys_bar),
            state,
            header: Header::new(),
            editors_pick: EditorsPick::new(),
            banner: Banner::new(),
            episode_list,
            news_list: NewsList::new(),
            episode_detail: EpisodeDetail::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            player,
            source,
            settle: config.feed.settle(),
            ui_state_path,
            tx: None,
            pane_areas: PaneAreas::default(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: player snapshots ─────────────────────────────────
        let forwarder = spawn_snapshot_forwarder(self.player.subscribe(), tx.clone());

        // Spinner, visualizer, spring and toast expiry all run off this tick.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg);
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = ui_tick.tick() => {
                    let now = Instant::now();
                    let dt = now - last_tick;
                    last_tick = now;
                    self.state.frame = self.state.frame.wrapping_add(1);
                    self.toast.tick();

                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.header.tick(dt, s));
                        all.extend(self.editors_pick.tick(dt, s));
                        all.extend(self.episode_list.tick(dt, s));
                        all.extend(self.news_list.tick(dt, s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        forwarder.abort();
        self.save_ui_session_state();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(m)) => {
                for action in self.handle_mouse(m) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Player(snapshot) => {
                self.state.audio.on_player_snapshot(&snapshot);
                self.state.player = snapshot;
                true
            }
            AppMessage::Refresh(event) => {
                let failed = matches!(event, RefreshEvent::Fetched(Err(_)));
                self.state.audio.apply_refresh(event);
                if failed {
                    self.toast.warning(REFRESH_FAILED_TOAST);
                }
                true
            }
            AppMessage::PlayAllDone => {
                self.state.audio.finish_play_all();
                true
            }
            AppMessage::Navigate(Route::Episode(id)) => {
                if self.state.audio.find(&id).is_some() {
                    self.dispatch(Action::OpenDetail(id));
                } else {
                    warn!("navigate: unknown episode {}", id);
                }
                true
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Overlays capture keys before the global bindings
        match self.wm.key_target() {
            Some(ComponentId::HelpOverlay) => {
                return self.help_overlay.handle_key(key, &self.state);
            }
            Some(ComponentId::EpisodeDetail) => {
                return match key.code {
                    KeyCode::Char('q') => vec![Action::Quit],
                    KeyCode::Char('?') => vec![Action::ToggleHelp],
                    _ => self.episode_detail.handle_key(key, &self.state),
                };
            }
            _ => {}
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('1') => return vec![Action::SwitchWorkspace(Workspace::Audio)],
            KeyCode::Char('2') => return vec![Action::SwitchWorkspace(Workspace::News)],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        if self.wm.workspace == Workspace::Audio {
            match key.code {
                KeyCode::Char(' ') => return vec![Action::PressPlayButton],
                KeyCode::Char('r') => return vec![Action::Refresh],
                KeyCode::Char('b') => return vec![Action::PressBanner],
                _ => {}
            }
        }

        let s = &self.state;
        match self.wm.focus.current() {
            Some(ComponentId::EpisodeList) => self.episode_list.handle_key(key, s),
            Some(ComponentId::EditorsPick) => self.editors_pick.handle_key(key, s),
            Some(ComponentId::NewsList) => self.news_list.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click || self.wm.show_help || self.wm.detail.is_some() {
            return vec![];
        }

        let col = event.column;
        let row = event.row;

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let s = &self.state;

        // Focus follows the click into focusable panes.
        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if self.wm.focus.current() != Some($id) {
                    actions.insert(0, Action::FocusPane($id));
                }
                return actions;
            }};
        }

        match self.wm.workspace {
            Workspace::Audio => {
                if hit(areas.header, col, row) {
                    return self.header.handle_mouse(event, areas.header, s);
                }
                if hit(areas.banner, col, row) {
                    return self.banner.handle_mouse(event, areas.banner, s);
                }
                if hit(areas.editors_pick, col, row) {
                    click_pane!(ComponentId::EditorsPick, self.editors_pick, areas.editors_pick);
                }
                if hit(areas.episode_list, col, row) {
                    click_pane!(ComponentId::EpisodeList, self.episode_list, areas.episode_list);
                }
            }
            Workspace::News => {
                if hit(areas.news_list, col, row) {
                    click_pane!(ComponentId::NewsList, self.news_list, areas.news_list);
                }
            }
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Components see every action first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.episode_list.on_action(&action, s));
            out.extend(self.editors_pick.on_action(&action, s));
            out.extend(self.news_list.on_action(&action, s));
            out.extend(self.episode_detail.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::PressPlayButton => match self.state.audio.press_play_button() {
                ButtonIntent::Disabled => debug!("play button pressed while disabled"),
                ButtonIntent::TogglePlayPause => self.spawn_toggle(),
                ButtonIntent::PlayAll(episode) => self.spawn_play_all(episode, true),
            },
            Action::TogglePlayPause => self.spawn_toggle(),
            Action::PlayEpisode(episode) => self.spawn_play_all(episode, false),

            Action::Refresh => {
                if self.state.audio.pull_to_refresh() {
                    self.start_refresh();
                }
            }
            Action::ScrollToTop => {
                if self.wm.workspace == Workspace::Audio
                    && self.state.audio.scroll_to_top_and_refresh()
                {
                    self.start_refresh();
                }
            }
            Action::PressBanner => self.toast.info(BANNER_TOAST),

            Action::FocusNext => {
                self.wm.focus.next();
            }
            Action::FocusPrev => {
                self.wm.focus.prev();
            }
            Action::FocusPane(id) => self.wm.focus.set(id),
            Action::OpenDetail(id) => {
                info!("opening episode {}", id);
                self.wm.detail = Some(id);
            }
            Action::CloseDetail => self.wm.detail = None,
            Action::SwitchWorkspace(ws) => match self.wm.press_tab(ws) {
                TabPress::Switched => self.state.workspace = ws,
                TabPress::Reselected => self.dispatch(Action::ScrollToTop),
            },

            Action::ToggleHelp => self.wm.show_help = !self.wm.show_help,
            Action::ToggleKeys => self.wm.show_keys_bar = !self.wm.show_keys_bar,
            Action::Quit => self.should_quit = true,
        }
    }

    // ── Background work ───────────────────────────────────────────────────────

    fn spawn_toggle(&self) {
        let player = self.player.clone();
        tokio::spawn(async move {
            if let Err(e) = player.toggle_play_pause().await {
                warn!("toggle play/pause failed: {}", e);
            }
        });
    }

    /// Close, play, then open the detail view. Only runs started from the
    /// header button report back to clear the loading flag.
    fn spawn_play_all(&self, episode: Episode, from_button: bool) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let player = self.player.clone();
        tokio::spawn(async move {
            play_all_and_report(&player, tx, episode, from_button).await;
        });
    }

    fn start_refresh(&self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let current = self.state.audio.episodes().to_vec();
        let settle = self.settle;
        tokio::spawn(async move {
            let (cycle_tx, mut cycle_rx) = mpsc::channel::<RefreshEvent>(2);
            let forward = async {
                while let Some(event) = cycle_rx.recv().await {
                    if tx.send(AppMessage::Refresh(event)).await.is_err() {
                        break;
                    }
                }
            };
            tokio::join!(run_cycle(source.as_ref(), current, settle, cycle_tx), forward);
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        let status_h = if self.wm.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        status_bar::draw_tabs(frame, outer[0], self.wm.workspace, self.state.player.is_playing);
        status_bar::draw_separator(frame, outer[1]);

        self.pane_areas = PaneAreas::default();
        match self.wm.workspace {
            Workspace::Audio => self.draw_audio(frame, outer[2]),
            Workspace::News => {
                let focused = self.wm.focus.is_focused(ComponentId::NewsList);
                self.news_list.draw(frame, outer[2], focused, &self.state);
                self.pane_areas.news_list = outer[2];
            }
        }

        if self.wm.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[3],
                self.wm.workspace,
                self.wm.detail.is_some(),
            );
        }

        if self.wm.detail.is_some() {
            self.episode_detail.draw(frame, outer[2], true, &self.state);
        }
        if self.wm.show_help {
            self.help_overlay.draw(frame, area, true, &self.state);
        }

        self.toast.draw(frame, area);
    }

    fn draw_audio(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        self.header.draw(frame, rows[0], false, &self.state);
        let pick_focused = self.wm.focus.is_focused(ComponentId::EditorsPick);
        self.editors_pick.draw(frame, rows[1], pick_focused, &self.state);
        self.banner.draw(frame, rows[2], false, &self.state);
        let list_focused = self.wm.focus.is_focused(ComponentId::EpisodeList);
        self.episode_list.draw(frame, rows[3], list_focused, &self.state);

        self.pane_areas.header = rows[0];
        self.pane_areas.editors_pick = rows[1];
        self.pane_areas.banner = rows[2];
        self.pane_areas.episode_list = rows[3];
    }

    fn save_ui_session_state(&self) {
        let ui_state = UiSessionState {
            workspace: self.wm.workspace,
            selected_episode_id: self.episode_list.selected_id().map(str::to_string),
        };
        if let Err(e) = save_ui_session_state(&self.ui_state_path, &ui_state) {
            warn!("saving {} failed: {}", self.ui_state_path.display(), e);
        }
    }
}

/// Forward every published snapshot into the event loop until either side
/// goes away. Aborted on teardown.
fn spawn_snapshot_forwarder(
    mut rx: watch::Receiver<PlayerSnapshot>,
    tx: mpsc::Sender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if tx.send(AppMessage::Player(snapshot)).await.is_err() {
                break;
            }
        }
    })
}

/// Body of a play-all task.  Header-button runs always report back so the
/// loading flag clears, whatever happened to the run.
async fn play_all_and_report(
    player: &dyn AudioCommands,
    tx: mpsc::Sender<AppMessage>,
    episode: Episode,
    from_button: bool,
) {
    let nav = ChannelNavigator { tx: tx.clone() };
    run_play_all(player, &nav, episode).await;
    if from_button {
        let _ = tx.send(AppMessage::PlayAllDone).await;
    }
}

fn load_ui_session_state(path: &Path) -> UiSessionState {
    let Ok(content) = std::fs::read_to_string(path) else {
        return UiSessionState::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

fn save_ui_session_state(path: &Path, state: &UiSessionState) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play_all::tests::{CallLog, RecordingPlayer};
    use crate::player::PlayerCore;
    use crate::refresh::ShuffleSource;
    use crate::screen::tests::{episode, episodes};

    fn test_app(player: PlayerHandle) -> App {
        let source: Arc<dyn FeedSource> = Arc::new(ShuffleSource {
            latency: Duration::from_millis(1000),
        });
        App::new(
            &Config::default(),
            Catalog::from_episodes(episodes(8)).unwrap(),
            NewsFeed::default(),
            player,
            source,
            std::env::temp_dir().join("n3ws-missing-dir").join("ui_state.json"),
        )
    }

    /// Feed everything the task sent back through the event loop's handler.
    fn deliver(app: &mut App, rx: &mut mpsc::Receiver<AppMessage>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            seen.push(match msg {
                AppMessage::PlayAllDone => "done",
                AppMessage::Navigate(_) => "navigate",
                _ => "other",
            });
            app.handle_message(msg);
        }
        seen
    }

    #[tokio::test]
    async fn test_failed_play_all_clears_loading_without_navigating() {
        let (handle, core) = PlayerCore::spawn(Duration::ZERO);
        let mut app = test_app(handle.clone());

        let ep = match app.state.audio.press_play_button() {
            ButtonIntent::PlayAll(ep) => ep,
            other => panic!("expected PlayAll, got {:?}", other),
        };
        assert!(app.state.audio.is_loading());

        let log = CallLog::default();
        let player = RecordingPlayer::new(log.clone(), true);
        let (tx, mut rx) = mpsc::channel::<AppMessage>(8);
        play_all_and_report(&player, tx, ep, true).await;

        assert_eq!(deliver(&mut app, &mut rx), vec!["done"]);
        assert!(!app.state.audio.is_loading());
        assert!(app.wm.detail.is_none());
        assert_eq!(*log.lock().unwrap(), vec!["close", "play(E1)"]);

        handle.shutdown().await;
        core.await.unwrap();
    }

    #[tokio::test]
    async fn test_play_all_opens_detail_then_clears_loading() {
        let (handle, core) = PlayerCore::spawn(Duration::ZERO);
        let mut app = test_app(handle.clone());

        let ButtonIntent::PlayAll(ep) = app.state.audio.press_play_button() else {
            panic!("expected PlayAll");
        };
        let player = RecordingPlayer::new(CallLog::default(), false);
        let (tx, mut rx) = mpsc::channel::<AppMessage>(8);
        play_all_and_report(&player, tx, ep, true).await;

        assert_eq!(deliver(&mut app, &mut rx), vec!["navigate", "done"]);
        assert_eq!(app.wm.detail.as_deref(), Some("E1"));
        assert!(!app.state.audio.is_loading());

        handle.shutdown().await;
        core.await.unwrap();
    }

    #[tokio::test]
    async fn test_row_play_does_not_report_done() {
        let player = RecordingPlayer::new(CallLog::default(), true);
        let (tx, mut rx) = mpsc::channel::<AppMessage>(8);
        play_all_and_report(&player, tx, episode("E3"), false).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_navigator_maps_send_errors() {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(1);
        let nav = ChannelNavigator { tx };
        assert_eq!(nav.navigate(Route::Episode("E1".into())), Ok(()));
        assert_eq!(nav.navigate(Route::Episode("E2".into())), Err(NavError::Busy));

        match rx.try_recv() {
            Ok(AppMessage::Navigate(Route::Episode(id))) => assert_eq!(id, "E1"),
            _ => panic!("expected a navigate message"),
        }
        drop(rx);
        assert_eq!(nav.navigate(Route::Episode("E3".into())), Err(NavError::Closed));
    }

    #[test]
    fn test_ui_session_state_defaults_on_bad_file() {
        let dir = std::env::temp_dir().join(format!("n3ws-ui-state-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ui_state.json");

        std::fs::write(&path, "{ not json").unwrap();
        let s = load_ui_session_state(&path);
        assert_eq!(s.workspace, Workspace::Audio);
        assert!(s.selected_episode_id.is_none());

        let saved = UiSessionState {
            workspace: Workspace::News,
            selected_episode_id: Some("E7".to_string()),
        };
        save_ui_session_state(&path, &saved).unwrap();
        let loaded = load_ui_session_state(&path);
        assert_eq!(loaded.workspace, Workspace::News);
        assert_eq!(loaded.selected_episode_id.as_deref(), Some("E7"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_snapshot_forwarder_relays_changes() {
        let (snap_tx, snap_rx) = watch::channel(PlayerSnapshot::default());
        let (tx, mut rx) = mpsc::channel::<AppMessage>(8);
        let task = spawn_snapshot_forwarder(snap_rx, tx);

        snap_tx.send_modify(|s| {
            s.current_episode = Some(episode("E4"));
            s.is_loading = true;
        });
        match rx.recv().await {
            Some(AppMessage::Player(s)) => assert_eq!(s.current_id(), Some("E4")),
            _ => panic!("expected a player snapshot"),
        }
        task.abort();
    }
}
