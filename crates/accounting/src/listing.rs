//! In-memory filtering and pagination of the journal entry list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::PersistedJournalEntry;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters (1-based page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<usize>, page_size: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Filter criteria for the entry list. All criteria are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Case-insensitive match on entry number, description or reference.
    pub search: Option<String>,
    /// Inclusive lower bound on the entry date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date.
    pub to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &PersistedJournalEntry) -> bool {
        if self.from.is_some_and(|from| entry.entry_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| entry.entry_date > to) {
            return false;
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        entry.entry_number.to_lowercase().contains(&needle)
            || entry.description.to_lowercase().contains(&needle)
            || entry
                .reference_number
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&needle))
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Filter, sort (newest first) and paginate `entries`.
pub fn query_entries(
    entries: &[PersistedJournalEntry],
    filter: &EntryFilter,
    pagination: Pagination,
) -> Page<PersistedJournalEntry> {
    let mut matching: Vec<&PersistedJournalEntry> =
        entries.iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(|a, b| {
        b.entry_date
            .cmp(&a.entry_date)
            .then_with(|| b.entry_number.cmp(&a.entry_number))
    });

    let total = matching.len();
    let items = matching
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.page_size)
        .cloned()
        .collect();

    Page {
        items,
        total,
        page: pagination.page,
        page_size: pagination.page_size,
        total_pages: total.div_ceil(pagination.page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::test_entry;

    fn sample_entries() -> Vec<PersistedJournalEntry> {
        let mut entries = vec![
            test_entry("JE-0001", "2024-01-05", None),
            test_entry("JE-0002", "2024-02-10", None),
            test_entry("JE-0003", "2024-02-10", None),
            test_entry("JE-0004", "2024-03-15", None),
        ];
        entries[1].description = "Office rent".into();
        entries[2].reference_number = Some("INV-42".into());
        entries
    }

    fn numbers(page: &Page<PersistedJournalEntry>) -> Vec<&str> {
        page.items.iter().map(|e| e.entry_number.as_str()).collect()
    }

    #[test]
    fn sorts_newest_first_with_number_tiebreak() {
        let page = query_entries(&sample_entries(), &EntryFilter::default(), Pagination::default());
        assert_eq!(numbers(&page), vec!["JE-0004", "JE-0003", "JE-0002", "JE-0001"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more());
    }

    #[test]
    fn search_covers_number_description_and_reference() {
        let entries = sample_entries();
        let search = |term: &str| {
            let filter = EntryFilter {
                search: Some(term.into()),
                ..Default::default()
            };
            query_entries(&entries, &filter, Pagination::default())
        };
        assert_eq!(numbers(&search("rent")), vec!["JE-0002"]);
        assert_eq!(numbers(&search("inv-42")), vec!["JE-0003"]);
        assert_eq!(numbers(&search("je-0001")), vec!["JE-0001"]);
        assert_eq!(search("  ").total, 4);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = EntryFilter {
            from: Some("2024-02-10".parse().unwrap()),
            to: Some("2024-03-15".parse().unwrap()),
            ..Default::default()
        };
        let page = query_entries(&sample_entries(), &filter, Pagination::default());
        assert_eq!(numbers(&page), vec!["JE-0004", "JE-0003", "JE-0002"]);
    }

    #[test]
    fn paginates_and_reports_remaining_pages() {
        let entries = sample_entries();
        let first = query_entries(&entries, &EntryFilter::default(), Pagination::new(Some(1), Some(3)));
        assert_eq!(numbers(&first), vec!["JE-0004", "JE-0003", "JE-0002"]);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_more());

        let second = query_entries(&entries, &EntryFilter::default(), Pagination::new(Some(2), Some(3)));
        assert_eq!(numbers(&second), vec!["JE-0001"]);

        let past_end = query_entries(&entries, &EntryFilter::default(), Pagination::new(Some(9), Some(3)));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 4);
    }

    #[test]
    fn pagination_is_clamped() {
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { page: 1, page_size: 1 });
        assert_eq!(Pagination::new(None, Some(5000)).page_size, MAX_PAGE_SIZE);
        assert_eq!(Pagination::new(None, None), Pagination::default());
    }
}
