//! Display-width aware string helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max` terminal columns, ending in "…" when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Left-pad `s` so it ends at column `width`.
pub fn right_align(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(pad), s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_by_columns() {
        assert_eq!(truncate("Morning Dispatch", 40), "Morning Dispatch");
        assert_eq!(truncate("Morning Dispatch", 8), "Morning…");
        assert_eq!(truncate("日本語ニュース", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_right_align() {
        assert_eq!(right_align("ab", 4), "  ab");
        assert_eq!(right_align("abcdef", 4), "abcdef");
    }
}
