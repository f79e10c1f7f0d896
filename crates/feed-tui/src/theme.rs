//! Color palette and style constants for the n3ws TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(253, 50, 90); // refresh status / brand red
pub const C_TINT: Color = Color::Rgb(255, 95, 95); // play button while playing
pub const C_BUTTON_IDLE: Color = Color::Rgb(134, 133, 141);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_BANNER_BG: Color = Color::Rgb(33, 150, 165);
pub const C_TOPIC: Color = Color::Rgb(80, 140, 200);
pub const C_SOURCE: Color = Color::Rgb(180, 120, 220);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

/// Linear blend from the background toward `fg`; `t` in 0..=1.
pub fn fade(fg: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (C_BG, fg) {
        (Color::Rgb(br, bg, bb), Color::Rgb(fr, fg_, fb)) => {
            let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * t).round() as u8;
            Color::Rgb(mix(br, fr), mix(bg, fg_), mix(bb, fb))
        }
        (_, other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(C_ACCENT, 0.0), C_BG);
        assert_eq!(fade(C_ACCENT, 1.0), C_ACCENT);
        assert_eq!(fade(Color::Red, 0.3), Color::Red);
    }
}
