use crate::catalog::search;
use crate::catalog::sort::{self, SortMode};
use crate::github::types::RepoSummary;

/// The current page's repositories plus the two presentation inputs, sort
/// mode and search term. Contents are kept sorted at all times; the search
/// filter is a derived view and never mutates the contents.
pub struct CollectionState {
    repos: Vec<RepoSummary>,
    sort_mode: SortMode,
    search_term: String,
}

impl CollectionState {
    pub fn new(sort_mode: SortMode) -> Self {
        Self {
            repos: Vec::new(),
            sort_mode,
            search_term: String::new(),
        }
    }

    pub fn repos(&self) -> &[RepoSummary] {
        &self.repos
    }

    pub fn set_page(&mut self, repos: Vec<RepoSummary>) {
        self.repos = repos;
        sort::sort_repos(&mut self.repos, self.sort_mode);
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        sort::sort_repos(&mut self.repos, mode);
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, raw: &str) {
        self.search_term = search::normalize(raw);
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.repos
            .iter()
            .enumerate()
            .filter(|(_, r)| search::matches(r, &self.search_term))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices().len()
    }
}
