//! NewsList component: the News tab's story cards.
//!
//! Cards have variable height (`CardType::height`), so scrolling is done in
//! whole cards from the top card that still fits.

use chrono::{DateTime, Utc};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use feed_proto::config::ColorScheme;
use feed_proto::news::{CardType, FeedItem};

use crate::{
    action::{Action, ComponentId, Workspace},
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_selected, style_selected_focused, C_PRIMARY, C_SECONDARY, C_SOURCE, C_TOPIC},
    widgets::{pane_chrome::pane_chrome, scrollable_list::ScrollableList, text::truncate},
};

/// One news card. `Full` cards get a third line with the topic when
/// `show_topic` is set (blank otherwise), `Medium` cards two lines.
pub fn feed_item_row(
    item: &FeedItem,
    width: usize,
    now: DateTime<Utc>,
    scheme: ColorScheme,
) -> ListItem<'static> {
    let inner_w = width.saturating_sub(2);
    let logo = if item.source.logo_for(scheme).is_empty() { " " } else { "◆" };
    let byline = format!(
        "{} {} · {} · {}",
        logo,
        item.source.name,
        item.author.name,
        item.age_label(now)
    );

    let title_style = match item.card_type {
        CardType::Full => Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        CardType::Medium => Style::default().fg(C_PRIMARY),
    };

    let mut lines = vec![
        Line::from(Span::styled(format!(" {}", truncate(&item.title, inner_w)), title_style)),
        Line::from(Span::styled(
            format!(" {}", truncate(&byline, inner_w)),
            Style::default().fg(C_SOURCE),
        )),
    ];
    if item.card_type == CardType::Full {
        let topic = if item.show_topic {
            Span::styled(
                format!(" {}", truncate(&item.topic.name.to_uppercase(), inner_w)),
                Style::default().fg(C_TOPIC).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(" ", Style::default().fg(C_SECONDARY))
        };
        lines.push(Line::from(topic));
    }
    ListItem::new(lines)
}

pub struct NewsList {
    list: ScrollableList<FeedItem>,
    synced: bool,
}

impl NewsList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|i: &FeedItem| i.id.as_str()),
            synced: false,
        }
    }

    fn sync(&mut self, state: &AppState) {
        if !self.synced {
            self.list.set_items(state.news.items().to_vec());
            self.synced = true;
        }
    }

    /// Move `scroll_offset` so the selected card is fully inside `height` rows.
    fn ensure_visible(&mut self, height: usize) {
        let items = self.list.items();
        let sel = self.list.selected;
        if sel < self.list.scroll_offset {
            self.list.scroll_offset = sel;
            return;
        }
        let mut offset = self.list.scroll_offset;
        while offset < sel && rows_between(items, offset, sel) > height {
            offset += 1;
        }
        self.list.scroll_offset = offset;
    }

    /// Index of the card drawn at `row` inside the list area.
    fn card_at_row(&self, row: usize) -> Option<usize> {
        let mut top = 0usize;
        for (idx, item) in self.list.items().iter().enumerate().skip(self.list.scroll_offset) {
            let h = item.card_type.height() as usize;
            if row < top + h {
                return Some(idx);
            }
            top += h;
        }
        None
    }
}

/// Rows taken by cards `from..=to`.
fn rows_between(items: &[FeedItem], from: usize, to: usize) -> usize {
    items[from..=to.min(items.len().saturating_sub(1))]
        .iter()
        .map(|i| i.card_type.height() as usize)
        .sum()
}

impl Default for NewsList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NewsList {
    fn id(&self) -> ComponentId {
        ComponentId::NewsList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync(state);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::PageUp => self.list.select_up(5),
            KeyCode::PageDown => self.list.select_down(5),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        self.sync(state);
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let row = event.row.saturating_sub(area.y + 1) as usize;
                if let Some(idx) = self.card_at_row(row) {
                    self.list.selected = idx;
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if let Action::ScrollToTop = action {
            if state.workspace == Workspace::News {
                self.list.select_first();
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);
        let block = pane_chrome("Top Stories", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no stories", style_muted())),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.ensure_visible(height);
        let now = Utc::now();
        let width = inner.width as usize;
        let selected = self.list.selected;

        let mut used = 0usize;
        let mut items = Vec::new();
        for (idx, item) in self.list.items().iter().enumerate().skip(self.list.scroll_offset) {
            let h = item.card_type.height() as usize;
            if used + h > height && !items.is_empty() {
                break;
            }
            used += h;
            let row = feed_item_row(item, width, now, state.color_scheme);
            items.push(match (idx == selected, focused) {
                (true, true) => row.style(style_selected_focused()),
                (true, false) => row.style(style_selected()),
                _ => row,
            });
        }
        frame.render_widget(List::new(items), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_proto::news::NewsFeed;

    fn feed() -> Vec<FeedItem> {
        NewsFeed::bundled().unwrap().items().to_vec()
    }

    #[test]
    fn test_card_heights_follow_card_type() {
        let now = Utc::now();
        for item in feed() {
            let row = feed_item_row(&item, 50, now, ColorScheme::Dark);
            assert_eq!(row.height(), item.card_type.height() as usize);
        }
    }

    #[test]
    fn test_scrolls_whole_cards_into_view() {
        let mut list = NewsList::new();
        list.list.set_items(feed());
        list.list.select_last();
        list.ensure_visible(6);
        let last = list.list.len() - 1;
        let shown = rows_between(list.list.items(), list.list.scroll_offset, last);
        assert!(shown <= 6, "{} rows shown", shown);
        assert_eq!(list.card_at_row(0), Some(list.list.scroll_offset));
    }
}
