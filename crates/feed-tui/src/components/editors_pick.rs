//! EditorsPick component: horizontal strip of the first few episodes.

use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use feed_proto::episode::Episode;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_secondary, C_PLAYING, C_PRIMARY, C_SELECTION_BG},
    widgets::{pane_chrome::pane_chrome, text::truncate},
};

const CARD_WIDTH: u16 = 26;

pub struct EditorsPick {
    selected: usize,
    /// Index of the first card drawn.
    offset: usize,
    last_click: Option<(usize, Instant)>,
}

impl EditorsPick {
    pub fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
            last_click: None,
        }
    }

    fn selected_episode<'a>(&self, state: &'a AppState) -> Option<&'a Episode> {
        let picks = state.audio.editors_pick();
        picks.get(self.selected.min(picks.len().saturating_sub(1)))
    }

    fn cards_in_view(width: u16) -> usize {
        ((width / CARD_WIDTH) as usize).max(1)
    }

    fn ensure_visible(&mut self, per_view: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + per_view {
            self.offset = self.selected + 1 - per_view;
        }
    }
}

impl Default for EditorsPick {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EditorsPick {
    fn id(&self) -> ComponentId {
        ComponentId::EditorsPick
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let count = state.audio.editors_pick().len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = count.saturating_sub(1),
            KeyCode::Enter => {
                if let Some(ep) = self.selected_episode(state) {
                    return vec![Action::PlayEpisode(ep.clone())];
                }
            }
            KeyCode::Char('d') => {
                if let Some(ep) = self.selected_episode(state) {
                    return vec![Action::OpenDetail(ep.id.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let count = state.audio.editors_pick().len();
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let rel = event.column.saturating_sub(area.x + 1);
                let idx = self.offset + (rel / CARD_WIDTH) as usize;
                if idx >= count {
                    return vec![];
                }
                let is_double = self
                    .last_click
                    .map(|(i, t)| i == idx && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                self.selected = idx;
                if is_double {
                    self.last_click = None;
                    if let Some(ep) = self.selected_episode(state) {
                        return vec![Action::PlayEpisode(ep.clone())];
                    }
                } else {
                    self.last_click = Some((idx, Instant::now()));
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("Editor's Pick", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let picks = state.audio.editors_pick();
        if picks.is_empty() || inner.width == 0 {
            return;
        }
        self.selected = self.selected.min(picks.len() - 1);
        let per_view = Self::cards_in_view(inner.width);
        self.ensure_visible(per_view);

        let current = state.audio.current_episode_id();
        for (slot, (idx, ep)) in picks
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(per_view)
            .enumerate()
        {
            let x = inner.x + slot as u16 * CARD_WIDTH;
            let w = CARD_WIDTH.min(inner.x + inner.width - x);
            let card = Rect { x, width: w, ..inner };
            let is_selected = idx == self.selected;
            let lines = card_lines(ep, w.saturating_sub(2) as usize, current == Some(ep.id.as_str()));
            let mut style = Style::default();
            if is_selected && focused {
                style = style.bg(C_SELECTION_BG);
            }
            frame.render_widget(Paragraph::new(lines).style(style), card);
        }
    }
}

fn card_lines(ep: &Episode, width: usize, now_playing: bool) -> Vec<Line<'static>> {
    let title_style = if now_playing {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    };
    vec![
        Line::from(Span::styled(format!(" {}", truncate(&ep.title, width)), title_style)),
        Line::from(Span::styled(format!(" {}", truncate(&ep.show_title, width)), style_secondary())),
        Line::from(Span::styled(
            format!(" {} · {}", ep.duration_label(), ep.release_label()),
            style_muted(),
        )),
    ]
}
