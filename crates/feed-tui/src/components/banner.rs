//! Banner component: "Discover News+ Narrated" call to action.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::C_BANNER_BG,
};

pub const BANNER_TITLE: &str = "Discover News+ Narrated";
pub const BANNER_SUBTITLE: &str = "More audio stories in your podcast app";

pub struct Banner;

impl Banner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Banner {
    fn id(&self) -> ComponentId {
        ComponentId::Banner
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => vec![Action::PressBanner],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let bg = Style::default().bg(C_BANNER_BG).fg(Color::White);
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {}", BANNER_TITLE), bg.add_modifier(Modifier::BOLD)),
                Span::styled("  ›", bg),
            ]),
            Line::from(Span::styled(format!(" {}", BANNER_SUBTITLE), bg)),
        ];
        frame.render_widget(Paragraph::new(lines).style(bg), area);
    }
}
