//! EpisodeDetail overlay: the navigation target for an episode id.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use feed_proto::episode::Episode;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::help_overlay::centered_rect,
    theme::{C_BG, C_MUTED, C_PANEL_BORDER_FOCUSED, C_PLAYING, C_PRIMARY, C_SECONDARY},
    widgets::progress_bar::draw_progress,
};

const ARTWORK_SIZE: u32 = 300;

pub struct EpisodeDetail {
    episode_id: Option<String>,
}

impl EpisodeDetail {
    pub fn new() -> Self {
        Self { episode_id: None }
    }
}

impl Default for EpisodeDetail {
    fn default() -> Self {
        Self::new()
    }
}

/// Position to show for `episode`: the player's when it is the loaded one.
pub fn position_for(episode: &Episode, state: &AppState) -> u64 {
    if state.player.current_id() == Some(episode.id.as_str()) {
        state.player.position_ms.min(episode.duration_ms)
    } else {
        0
    }
}

impl Component for EpisodeDetail {
    fn id(&self) -> ComponentId {
        ComponentId::EpisodeDetail
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => vec![Action::CloseDetail],
            KeyCode::Char(' ') => vec![Action::TogglePlayPause],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenDetail(id) => self.episode_id = Some(id.clone()),
            Action::CloseDetail => self.episode_id = None,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(episode) = self.episode_id.as_deref().and_then(|id| state.audio.find(id)) else {
            return;
        };

        let popup = centered_rect(70, 16, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .title(Span::styled(
                " episode ",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(C_BG));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let is_current = state.player.current_id() == Some(episode.id.as_str());
        let status = match (is_current, state.player.is_loading, state.player.is_playing) {
            (false, _, _) => "not playing",
            (true, true, _) => "loading…",
            (true, false, true) => "playing",
            (true, false, false) => "paused",
        };

        let header = vec![
            Line::from(Span::styled(
                episode.title.clone(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                episode.show_title.clone(),
                Style::default().fg(C_SECONDARY),
            )),
            Line::from(vec![
                Span::styled(
                    format!("{} · {} · ", episode.duration_label(), episode.release_label()),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(status, Style::default().fg(C_PLAYING)),
            ]),
            Line::from(""),
            field_line("artwork", episode.artwork_url(ARTWORK_SIZE, ARTWORK_SIZE, "jpg")),
            field_line("stream", episode.stream_url.clone()),
        ];
        frame.render_widget(Paragraph::new(header), rows[0]);

        draw_progress(frame, rows[2], position_for(episode, state), episode.duration_ms);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(episode.summary.clone(), Style::default().fg(C_SECONDARY))),
                Line::from(""),
                Line::from(Span::styled(
                    "space play/pause · esc back",
                    Style::default().fg(C_MUTED),
                )),
            ])
            .wrap(Wrap { trim: false }),
            rows[3],
        );
    }
}

fn field_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<8}", label), Style::default().fg(C_MUTED)),
        Span::styled(value, Style::default().fg(C_SECONDARY)),
    ])
}
