//! Status bar: tab strip and keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Workspace;
use crate::theme::{C_ACCENT, C_MODE_NORMAL, C_MUTED, C_PLAYING, C_SECONDARY, C_SEPARATOR};

/// Draw the tab strip: "[1] Audio  [2] News", active tab highlighted.
pub fn draw_tabs(frame: &mut Frame, area: Rect, active: Workspace, playing: bool) {
    let mut spans = Vec::new();
    for (i, ws) in Workspace::ALL.iter().enumerate() {
        let style = if *ws == active {
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        spans.push(Span::styled(format!(" [{}] {} ", i + 1, ws.label()), style));
    }
    if playing {
        spans.push(Span::styled(" ♪", Style::default().fg(C_PLAYING)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

pub fn keys_hint(workspace: Workspace, detail_open: bool) -> &'static str {
    if detail_open {
        return " Space play/pause  Esc back  q quit";
    }
    match workspace {
        Workspace::Audio => {
            " ↑↓/jk select  Enter play  d details  Space play all/pause  r refresh  b discover  Tab panes  1/2 tabs  ? help  q quit"
        }
        Workspace::News => " ↑↓/jk select  g top  1/2 tabs  ? help  q quit",
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, workspace: Workspace, detail_open: bool) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", workspace.label().to_uppercase()),
            Style::default().fg(C_MODE_NORMAL).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_hint(workspace, detail_open), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
