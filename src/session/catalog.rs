/// Free-text matching over a fixed, content-type-specific field set.
///
/// Implementations use [`contains_ignore_case`] for alphabetic fields
/// (readings, meanings) and plain `contains` for script-based primary
/// symbols, where letter case does not apply.
pub trait Searchable {
    fn matches_query(&self, query: &str) -> bool;
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Searchable browse list: the full item set plus a free-text query. Unlike
/// the flashcard deck there is no position to reset when the query changes.
pub struct CatalogFilter<T> {
    items: Vec<T>,
    query: String,
    loading: bool,
}

impl<T: Searchable> CatalogFilter<T> {
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            loading: true,
        }
    }

    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.query.clear();
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the query verbatim, no trimming.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Empty query returns every item in original order.
    pub fn filtered(&self) -> Vec<&T> {
        if self.query.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.matches_query(&self.query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        symbol: &'static str,
        meaning: &'static str,
    }

    impl Searchable for Entry {
        fn matches_query(&self, query: &str) -> bool {
            self.symbol.contains(query) || contains_ignore_case(self.meaning, query)
        }
    }

    fn catalog() -> CatalogFilter<Entry> {
        let mut filter = CatalogFilter::loading();
        filter.load(vec![
            Entry { symbol: "日", meaning: "sun, day" },
            Entry { symbol: "月", meaning: "moon, month" },
            Entry { symbol: "山", meaning: "mountain" },
        ]);
        filter
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let filter = catalog();
        let all: Vec<&str> = filter.filtered().iter().map(|e| e.symbol).collect();
        assert_eq!(all, vec!["日", "月", "山"]);
    }

    #[test]
    fn test_meaning_match_is_case_insensitive() {
        let mut filter = catalog();
        filter.set_query("MOON");
        let hits: Vec<&str> = filter.filtered().iter().map(|e| e.symbol).collect();
        assert_eq!(hits, vec!["月"]);
    }

    #[test]
    fn test_symbol_match_is_exact_substring() {
        let mut filter = catalog();
        filter.set_query("山");
        assert_eq!(filter.filtered().len(), 1);
    }

    #[test]
    fn test_filtered_is_idempotent_between_mutations() {
        let mut filter = catalog();
        filter.set_query("mo");
        let first: Vec<&str> = filter.filtered().iter().map(|e| e.symbol).collect();
        let second: Vec<&str> = filter.filtered().iter().map(|e| e.symbol).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_is_stored_verbatim() {
        let mut filter = catalog();
        filter.set_query("  sun ");
        assert_eq!(filter.query(), "  sun ");
        // Leading/trailing spaces participate in matching as typed.
        assert!(filter.filtered().is_empty());
    }

    #[test]
    fn test_no_match_yields_empty_not_error() {
        let mut filter = catalog();
        filter.set_query("xyzzy");
        assert!(filter.filtered().is_empty());
    }

    #[test]
    fn test_clearing_query_restores_original_list() {
        let mut filter = catalog();
        filter.set_query("mountain");
        assert_eq!(filter.filtered().len(), 1);
        filter.set_query("");
        assert_eq!(filter.filtered().len(), 3);
    }

    #[test]
    fn test_load_resets_query() {
        let mut filter = catalog();
        filter.set_query("moon");
        filter.load(vec![Entry { symbol: "川", meaning: "river" }]);
        assert_eq!(filter.query(), "");
        assert_eq!(filter.filtered().len(), 1);
    }
}
