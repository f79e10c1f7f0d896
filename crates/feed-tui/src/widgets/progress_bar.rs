//! Eighth-block playback position bar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PLAYING, C_SECONDARY};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Draw `position_ms / duration_ms` as a bar flanked by time labels.
pub fn draw_progress(frame: &mut Frame, area: Rect, position_ms: u64, duration_ms: u64) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left = fmt_clock(position_ms);
    let right = fmt_clock(duration_ms);
    let label_w = (left.len() + right.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let spans = vec![
        Span::styled(format!("{} ", left), Style::default().fg(C_SECONDARY)),
        Span::styled(
            bar_cells(progress(position_ms, duration_ms), bar_w),
            Style::default().fg(C_PLAYING),
        ),
        Span::styled(format!(" {}", right), Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn progress(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// `width` cells filled to `fraction` with 1/8-cell resolution.
fn bar_cells(fraction: f64, width: usize) -> String {
    let eighths = (fraction.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full {
        bar.push('█');
    }
    if full < width {
        bar.push(BLOCKS[partial]);
        for _ in (full + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

/// `m:ss`, or `h:mm:ss` past the hour.
pub fn fmt_clock(ms: u64) -> String {
    let s = ms / 1000;
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let s = s % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_clock() {
        assert_eq!(fmt_clock(0), "0:00");
        assert_eq!(fmt_clock(65_000), "1:05");
        assert_eq!(fmt_clock(3_725_000), "1:02:05");
    }

    #[test]
    fn test_bar_cells_partial_fill() {
        assert_eq!(bar_cells(0.0, 4), "    ");
        assert_eq!(bar_cells(1.0, 4), "████");
        assert_eq!(bar_cells(0.5625, 2), "█▏");
        assert_eq!(progress(10, 0), 0.0);
    }
}
