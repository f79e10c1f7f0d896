//! EpisodeList component: the "For You" body of the audio feed.
//!
//! Mirrors `AudioScreen::body()`; the list is re-synced whenever the screen's
//! revision changes and keeps the selected row by episode id.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use feed_proto::episode::Episode;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    refresh::RefreshState,
    screen::SECTION_TITLE,
    theme::{
        style_muted, style_secondary, style_selected, style_selected_focused, C_NUMBER_HINT,
        C_PLAYING, C_PRIMARY, C_TOAST_WARNING,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
        text::truncate,
    },
};

/// Rows per episode.
const ROW_HEIGHT: usize = 2;

/// Two-line row: number and title, then show, duration and release date.
pub fn render_row(
    episode: &Episode,
    index: usize,
    width: usize,
    selected: bool,
    now_playing: bool,
) -> ListItem<'static> {
    let marker = if now_playing { "▶" } else { " " };
    let number = format!("{}{:02}  ", marker, index + 1);
    let title_w = width.saturating_sub(number.chars().count());
    let title_style = if now_playing {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY)
    };
    let number_style = if now_playing {
        Style::default().fg(C_PLAYING)
    } else {
        Style::default().fg(C_NUMBER_HINT)
    };

    let meta = format!(
        "{} · {} · {}",
        episode.show_title,
        episode.duration_label(),
        episode.release_label()
    );
    let indent = " ".repeat(number.chars().count());

    let lines = vec![
        Line::from(vec![
            Span::styled(number, number_style),
            Span::styled(truncate(&episode.title, title_w), title_style),
        ]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled(truncate(&meta, title_w), style_secondary()),
        ]),
    ];

    let item = ListItem::new(lines);
    if selected {
        item.style(style_selected())
    } else {
        item
    }
}

pub struct EpisodeList {
    list: ScrollableList<Episode>,
    list_state: ListState,
    synced_revision: Option<u64>,
    scroll_epoch: u64,
    last_click: Option<(usize, Instant)>,
}

impl EpisodeList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|e: &Episode| e.id.as_str()),
            list_state: ListState::default(),
            synced_revision: None,
            scroll_epoch: 0,
            last_click: None,
        }
    }

    /// Pick up a new collection or a scroll-to-top request from the screen.
    pub fn sync(&mut self, state: &AppState) {
        if self.synced_revision != Some(state.audio.revision()) {
            self.list.set_items(state.audio.body().to_vec());
            self.synced_revision = Some(state.audio.revision());
        }
        if self.scroll_epoch != state.audio.scroll_epoch() {
            self.list.select_first();
            self.scroll_epoch = state.audio.scroll_epoch();
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.list.selected_key()
    }

    pub fn select_id(&mut self, id: &str) -> bool {
        self.list.select_key(id)
    }

    fn selected_actions(&self, detail: bool) -> Vec<Action> {
        match self.list.selected_item() {
            Some(ep) if detail => vec![Action::OpenDetail(ep.id.clone())],
            Some(ep) => vec![Action::PlayEpisode(ep.clone())],
            None => vec![],
        }
    }
}

impl Default for EpisodeList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EpisodeList {
    fn id(&self) -> ComponentId {
        ComponentId::EpisodeList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync(state);
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return self.selected_actions(false),
            KeyCode::Char('d') => return self.selected_actions(true),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        self.sync(state);
        let rel_row = event.row.saturating_sub(area.y + 1) as usize / ROW_HEIGHT;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                self.list.handle_click(rel_row);
                if is_double {
                    self.last_click = None;
                    return self.selected_actions(false);
                }
                self.last_click = Some((rel_row, Instant::now()));
            }
            _ => {}
        }
        vec![]
    }

    fn tick(&mut self, _dt: Duration, state: &AppState) -> Vec<Action> {
        self.sync(state);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);

        let badge = match state.audio.refresh_state() {
            RefreshState::Failed(_) => Some(Badge {
                text: "offline",
                color: C_TOAST_WARNING,
            }),
            _ => None,
        };
        let block = pane_chrome(SECTION_TITLE, None, focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no more episodes", style_muted())),
                inner,
            );
            return;
        }

        let rows = (inner.height as usize / ROW_HEIGHT).max(1);
        self.list.ensure_visible(rows);
        let current = state.audio.current_episode_id();
        let width = inner.width as usize;
        let selected = self.list.selected;

        let items: Vec<ListItem> = self
            .list
            .visible_items(rows)
            .into_iter()
            .map(|(idx, ep)| {
                let item = render_row(
                    ep,
                    idx,
                    width,
                    idx == selected,
                    current == Some(ep.id.as_str()),
                );
                if idx == selected && focused {
                    item.style(style_selected_focused())
                } else {
                    item
                }
            })
            .collect();

        self.list_state
            .select(Some(selected.saturating_sub(self.list.scroll_offset)));
        frame.render_stateful_widget(
            List::new(items).highlight_symbol(""),
            inner,
            &mut self.list_state,
        );
    }
}
