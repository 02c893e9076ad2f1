/// Any content record that can be dealt as a flashcard. The session only ever
/// looks at the group key; everything else is presentation.
pub trait CardItem {
    fn group_key(&self) -> &str;
}

/// Flip-to-reveal deck over an ordered item list, with an optional group
/// filter. `current_index` always addresses the *filtered* view; navigation
/// wraps circularly and is a no-op when the filtered view is empty.
pub struct FlashcardSession<T> {
    items: Vec<T>,
    selected_group: Option<String>,
    current_index: usize,
    flipped: bool,
    loading: bool,
}

impl<T: CardItem> FlashcardSession<T> {
    /// Placeholder state while the first load is outstanding.
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            selected_group: None,
            current_index: 0,
            flipped: false,
            loading: true,
        }
    }

    /// Replace the deck wholesale. No merge with prior state: group filter,
    /// position, and flip all reset.
    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected_group = None;
        self.current_index = 0;
        self.flipped = false;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn next(&mut self) {
        let len = self.filtered_items().len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
        self.flipped = false;
    }

    pub fn previous(&mut self) {
        let len = self.filtered_items().len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
        self.flipped = false;
    }

    /// Changing the filter always returns to the first card, unflipped, so a
    /// flipped back face never lingers over a different card.
    pub fn select_group(&mut self, group: Option<String>) {
        self.selected_group = group;
        self.current_index = 0;
        self.flipped = false;
    }

    pub fn selected_group(&self) -> Option<&str> {
        self.selected_group.as_deref()
    }

    /// Recomputed on every call so it always reflects the live items and
    /// filter; never cached.
    pub fn filtered_items(&self) -> Vec<&T> {
        match &self.selected_group {
            None => self.items.iter().collect(),
            Some(group) => self
                .items
                .iter()
                .filter(|item| item.group_key() == group)
                .collect(),
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.filtered_items().get(self.current_index).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Distinct group keys in first-seen order. The unfiltered "all" choice
    /// is represented by `None` at the call sites.
    pub fn available_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for item in &self.items {
            let key = item.group_key();
            if !groups.iter().any(|g| g == key) {
                groups.push(key.to_string());
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card {
        group: &'static str,
    }

    impl CardItem for Card {
        fn group_key(&self) -> &str {
            self.group
        }
    }

    fn deck(groups: &[&'static str]) -> FlashcardSession<Card> {
        let mut session = FlashcardSession::loading();
        session.load(groups.iter().map(|g| Card { group: g }).collect());
        session
    }

    #[test]
    fn test_load_resets_everything() {
        let mut session = deck(&["a", "b"]);
        session.flip();
        session.next();
        session.select_group(Some("b".to_string()));

        session.load(vec![Card { group: "c" }]);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_flipped());
        assert!(session.selected_group().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_loading_placeholder_is_empty_and_safe() {
        let mut session: FlashcardSession<Card> = FlashcardSession::loading();
        assert!(session.is_loading());
        assert!(session.current().is_none());
        session.next();
        session.previous();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_next_wraps_after_full_cycle() {
        let mut session = deck(&["a", "a", "a", "a"]);
        let len = session.filtered_items().len();
        for _ in 0..len {
            session.next();
        }
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_previous_wraps_after_full_cycle() {
        let mut session = deck(&["a", "b", "c"]);
        let len = session.filtered_items().len();
        for _ in 0..len {
            session.previous();
        }
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_previous_from_zero_wraps_to_last() {
        let mut session = deck(&["a", "b", "c"]);
        session.previous();
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_navigation_clears_flip() {
        let mut session = deck(&["a", "b"]);
        session.flip();
        assert!(session.is_flipped());
        session.next();
        assert!(!session.is_flipped());
        session.flip();
        session.previous();
        assert!(!session.is_flipped());
    }

    #[test]
    fn test_select_group_resets_position_and_flip() {
        let mut session = deck(&["a", "a", "b"]);
        session.next();
        session.flip();
        session.select_group(Some("b".to_string()));
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_flipped());
        assert_eq!(session.filtered_items().len(), 1);
    }

    #[test]
    fn test_singleton_filter_next_is_wrap_of_length_one() {
        let mut session = deck(&["a", "a", "b"]);
        session.select_group(Some("b".to_string()));
        session.next();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current().map(|c| c.group), Some("b"));
    }

    #[test]
    fn test_empty_filter_navigation_is_noop() {
        let mut session = deck(&["a", "b"]);
        session.select_group(Some("zzz".to_string()));
        assert!(session.filtered_items().is_empty());
        session.next();
        session.previous();
        assert_eq!(session.current_index(), 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_available_groups_distinct_first_seen_order() {
        let session = deck(&["ka", "a", "ka", "sa", "a"]);
        assert_eq!(session.available_groups(), vec!["ka", "a", "sa"]);
    }

    #[test]
    fn test_filtered_items_reflects_current_filter() {
        let mut session = deck(&["a", "b", "a"]);
        assert_eq!(session.filtered_items().len(), 3);
        session.select_group(Some("a".to_string()));
        assert_eq!(session.filtered_items().len(), 2);
        session.select_group(None);
        assert_eq!(session.filtered_items().len(), 3);
    }
}
