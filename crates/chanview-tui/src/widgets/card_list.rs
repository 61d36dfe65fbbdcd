//! Selection + scrolling for a list of fixed-height cards.
//!
//! Items are replaced wholesale on every fetch, so there is no filter or sort
//! state here; the backend decides content and order.

pub struct CardList<T> {
    items: Vec<T>,
    selected: usize,
    /// Index of the first card drawn.
    scroll_offset: usize,
}

impl<T> CardList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace all items and reset selection to the first card.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    pub fn items(&self) -> &[T] {
        &self.items
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

    pub fn selected_index(&self) -> Option<usize> {
        (self.selected < self.items.len()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Adjust `scroll_offset` so the selected card is on screen, given that
    /// each card occupies `card_height` rows of a `height`-row viewport.
    pub fn ensure_visible(&mut self, height: usize, card_height: usize) {
        let per_page = (height / card_height.max(1)).max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + per_page {
            self.scroll_offset = self.selected + 1 - per_page;
        }
    }

    /// `(index, item)` pairs that fit in the viewport. Call `ensure_visible` first.
    pub fn visible_items(&self, height: usize, card_height: usize) -> Vec<(usize, &T)> {
        let per_page = height / card_height.max(1);
        self.items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(per_page)
            .collect()
    }

    /// Select the card drawn at viewport `row`. Returns true if a card was hit.
    pub fn handle_click(&mut self, row: usize, card_height: usize) -> bool {
        let target = self.scroll_offset + row / card_height.max(1);
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for CardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_clamped() {
        let mut list = CardList::new();
        list.set_items(vec!['a', 'b', 'c']);
        list.select_up(4);
        assert_eq!(list.selected_index(), Some(0));
        list.select_down(10);
        assert_eq!(list.selected_item(), Some(&'c'));
    }

    #[test]
    fn test_replacing_items_resets_selection() {
        let mut list = CardList::new();
        list.set_items(vec![1, 2, 3, 4]);
        list.select_last();
        list.set_items(vec![9]);
        assert_eq!(list.selected_item(), Some(&9));
        list.clear();
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_scrolls_by_whole_cards() {
        let mut list = CardList::new();
        list.set_items((0..10).collect::<Vec<_>>());
        // 7 rows, 3-row cards → 2 cards per screen.
        list.select_down(4);
        list.ensure_visible(7, 3);
        let visible: Vec<_> = list.visible_items(7, 3).into_iter().map(|(i, _)| i).collect();
        assert_eq!(visible, [3, 4]);

        assert!(list.handle_click(1, 3));
        assert_eq!(list.selected_index(), Some(3));
        assert!(!list.handle_click(30, 3));
    }
}
