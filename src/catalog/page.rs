use crate::github::types::RepoSummary;

/// One batch of repository summaries for a 1-based page index. A page that is
/// not full signals that forward pagination is exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct RepoPage {
    pub repos: Vec<RepoSummary>,
    pub is_full: bool,
}

impl RepoPage {
    pub fn new(repos: Vec<RepoSummary>, per_page: usize) -> Self {
        let is_full = repos.len() >= per_page;
        Self { repos, is_full }
    }
}
