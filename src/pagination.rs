use crate::models::{Page, SearchTerm};

/// Tracks which term and page the session is on.
///
/// `page` is the page most recently requested, `loaded` the last page that
/// arrived successfully for the current term. The next page is always
/// derived from `loaded`, so a page that failed is asked for again.
#[derive(Debug, Clone, Default)]
pub struct PaginationCursor {
    term: Option<SearchTerm>,
    page: Page,
    loaded: Option<Page>,
}

impl PaginationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_new_search(&mut self, term: SearchTerm) -> (SearchTerm, Page) {
        self.term = Some(term.clone());
        self.page = 0;
        self.loaded = None;
        (term, 0)
    }

    /// Next page of the current term, or `None` while nothing has loaded yet.
    pub fn request_more(&mut self) -> Option<(SearchTerm, Page)> {
        let term = self.term.clone()?;
        let next = self.loaded? + 1;
        self.page = next;
        Some((term, next))
    }

    pub fn mark_loaded(&mut self, page: Page) {
        self.loaded = Some(page);
    }

    pub fn term(&self) -> Option<&SearchTerm> {
        self.term.as_ref()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn loaded(&self) -> Option<Page> {
        self.loaded
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded.is_some()
    }
}
