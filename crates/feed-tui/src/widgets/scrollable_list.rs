//! Scrollable list keyed by item identity.
//!
//! Selection follows the selected item's key when the items are replaced, so
//! a reorder (e.g. a refresh shuffle) keeps the cursor on the same record
//! rather than the same row.

pub struct ScrollableList<T> {
    items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
    key_fn: Box<dyn Fn(&T) -> &str + Send + Sync>,
}

impl<T> ScrollableList<T> {
    pub fn new(key_fn: impl Fn(&T) -> &str + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            key_fn: Box::new(key_fn),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        let old_key = self.selected_item().map(|it| (self.key_fn)(it).to_string());
        self.items = items;
        match old_key.and_then(|k| self.position_of(&k)) {
            Some(pos) => self.selected = pos,
            None => self.selected = self.selected.min(self.items.len().saturating_sub(1)),
        }
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|it| (self.key_fn)(it) == key)
    }

    pub fn select_key(&mut self, key: &str) -> bool {
        match self.position_of(key) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_item().map(|it| (self.key_fn)(it))
    }

    /// Returns (index, &item) pairs for the rows that fit in `height`.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let start = self.scroll_offset.min(self.items.len());
        let end = (start + height).min(self.items.len());
        self.items[start..end]
            .iter()
            .enumerate()
            .map(|(i, it)| (start + i, it))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() && target != self.selected {
            self.selected = target;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(keys: &[&str]) -> ScrollableList<String> {
        let mut l = ScrollableList::new(|s: &String| s.as_str());
        l.set_items(keys.iter().map(|k| k.to_string()).collect());
        l
    }

    #[test]
    fn test_selection_follows_key_across_reorder() {
        let mut l = list(&["a", "b", "c", "d"]);
        l.select_down(2);
        assert_eq!(l.selected_key(), Some("c"));

        l.set_items(vec!["c".into(), "d".into(), "a".into(), "b".into()]);
        assert_eq!(l.selected, 0);
        assert_eq!(l.selected_key(), Some("c"));
    }

    #[test]
    fn test_selection_clamps_when_key_disappears() {
        let mut l = list(&["a", "b", "c"]);
        l.select_last();
        l.set_items(vec!["x".into()]);
        assert_eq!(l.selected_key(), Some("x"));
    }

    #[test]
    fn test_scroll_window() {
        let mut l = list(&["a", "b", "c", "d", "e"]);
        l.select_down(4);
        l.ensure_visible(2);
        assert_eq!(l.scroll_offset, 3);
        let rows: Vec<usize> = l.visible_items(2).into_iter().map(|(i, _)| i).collect();
        assert_eq!(rows, vec![3, 4]);

        l.select_first();
        assert_eq!(l.scroll_offset, 0);
        assert!(l.handle_click(1));
        assert_eq!(l.selected_key(), Some("b"));
    }
}
