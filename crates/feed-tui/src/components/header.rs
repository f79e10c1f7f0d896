//! Header component: title, play button and the refresh status line.
//!
//! Row 1: "News Audio" title (left) | play button (right).
//! Row 2: "Checking new podcasts..." while a refresh is running, faded and
//!        slid in by a spring.
//!
//! Not focusable; the button reacts to clicks and the global Space key.

use std::time::Duration;

use chrono::NaiveDate;
use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    motion::{EnterExit, SLIDE_FROM},
    screen::{ButtonIcon, PlayButtonView, REFRESH_STATUS},
    theme::{fade, C_ACCENT, C_BUTTON_IDLE, C_PRIMARY, C_SECONDARY, C_TINT},
};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Rows the status line travels while entering.
const STATUS_SLIDE_ROWS: f32 = 2.0;

pub const LOGO: &str = "News";

/// The secondary title, or today's date ("October 19") when there is none.
pub fn header_title(secondary: Option<&str>, today: NaiveDate) -> String {
    match secondary {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => today.format("%B %-d").to_string(),
    }
}

pub fn spinner_frame(frame: u64) -> char {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

/// Three bouncing bars for the "Playing" state.
pub fn visualizer_bars(frame: u64) -> String {
    // Each bar runs the same triangle wave at a different phase
    const PHASES: [u64; 3] = [0, 5, 2];
    PHASES
        .iter()
        .map(|p| {
            let t = ((frame + p) % 14) as usize;
            let level = if t < 7 { t } else { 14 - t };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

/// Rows still to travel for a given translate value; the line is hidden
/// above its row until this reaches zero.
pub fn status_row_offset(translate_y: f32) -> u16 {
    let travelled = (translate_y / SLIDE_FROM).clamp(0.0, 1.0);
    (travelled * STATUS_SLIDE_ROWS).round() as u16
}

pub fn button_label(view: &PlayButtonView, frame: u64) -> String {
    let icon = match view.icon {
        ButtonIcon::Headset => "♫".to_string(),
        ButtonIcon::Spinner => spinner_frame(frame).to_string(),
        ButtonIcon::Visualizer => visualizer_bars(frame),
    };
    format!(" {} {} ", icon, view.label)
}

pub struct Header {
    /// Secondary title; `None` shows today's date.
    pub secondary_title: Option<String>,
    status: EnterExit,
    button_area: Rect,
}

impl Header {
    pub fn new() -> Self {
        Self {
            secondary_title: Some("Audio".to_string()),
            status: EnterExit::new(),
            button_area: Rect::default(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let b = self.button_area;
            if event.column >= b.x
                && event.column < b.x + b.width
                && event.row >= b.y
                && event.row < b.y + b.height
            {
                return vec![Action::PressPlayButton];
            }
        }
        vec![]
    }

    fn tick(&mut self, dt: Duration, state: &AppState) -> Vec<Action> {
        self.status.update(state.audio.is_refreshing(), dt);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        // ── Row 1: title | button ────────────────────────────────────────────
        let view = state.audio.play_button();
        let label = button_label(&view, state.frame);
        let button_w = (label.width() as u16).min(area.width);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(button_w)])
            .split(rows[0]);

        let today = chrono::Local::now().date_naive();
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", LOGO),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                header_title(self.secondary_title.as_deref(), today),
                Style::default().fg(C_SECONDARY),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), cols[0]);

        let tint = if view.active_tint { C_TINT } else { C_BUTTON_IDLE };
        let mut button_style = Style::default().fg(tint).add_modifier(Modifier::BOLD);
        if view.dimmed {
            button_style = Style::default().fg(fade(tint, 0.5));
        }
        frame.render_widget(Paragraph::new(Span::styled(label, button_style)), cols[1]);
        self.button_area = cols[1];

        // ── Row 2: refresh status ────────────────────────────────────────────
        if rows[1].height == 0 || !self.status.is_visible() {
            return;
        }
        if status_row_offset(self.status.translate_y()) > 0 {
            return;
        }
        let status_area = Rect { height: 1, ..rows[1] };
        let color = fade(C_ACCENT, self.status.opacity());
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", REFRESH_STATUS),
                Style::default().fg(color),
            )),
            status_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::play_button_view;

    #[test]
    fn test_title_falls_back_to_date() {
        let day = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        assert_eq!(header_title(Some("Audio"), day), "Audio");
        assert_eq!(header_title(None, day), "October 19");
        assert_eq!(header_title(Some(""), day), "October 19");
    }

    #[test]
    fn test_button_label_by_state() {
        assert_eq!(button_label(&play_button_view(false, false, false), 0), " ♫ Play All ");
        assert_eq!(button_label(&play_button_view(true, false, true), 1), " ⠙ Loading... ");
        assert_eq!(visualizer_bars(0).chars().count(), 3);
        assert_ne!(visualizer_bars(0), visualizer_bars(3));
    }

    #[test]
    fn test_status_offset_reaches_zero_at_rest() {
        assert_eq!(status_row_offset(SLIDE_FROM), 2);
        assert_eq!(status_row_offset(0.0), 0);
        assert_eq!(status_row_offset(SLIDE_FROM / 2.0), 1);
    }
}
