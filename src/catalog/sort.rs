use crate::github::types::RepoSummary;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    StarsDesc,
    StarsAsc,
    UpdatedDesc,
    UpdatedAsc,
    CreatedDesc,
    CreatedAsc,
    NameAsc,
    NameDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 8] = [
        SortMode::StarsDesc,
        SortMode::StarsAsc,
        SortMode::UpdatedDesc,
        SortMode::UpdatedAsc,
        SortMode::CreatedDesc,
        SortMode::CreatedAsc,
        SortMode::NameAsc,
        SortMode::NameDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::StarsDesc => "Most stars",
            SortMode::StarsAsc => "Fewest stars",
            SortMode::UpdatedDesc => "Recently updated",
            SortMode::UpdatedAsc => "Least recently updated",
            SortMode::CreatedDesc => "Newest",
            SortMode::CreatedAsc => "Oldest",
            SortMode::NameAsc => "Name A-Z",
            SortMode::NameDesc => "Name Z-A",
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::StarsDesc
    }
}

/// Stable: entries with equal keys keep their fetch order.
pub fn sort_repos(repos: &mut [RepoSummary], mode: SortMode) {
    repos.sort_by(|a, b| compare(a, b, mode));
}

fn compare(a: &RepoSummary, b: &RepoSummary, mode: SortMode) -> Ordering {
    match mode {
        SortMode::StarsDesc => b.stars.cmp(&a.stars),
        SortMode::StarsAsc => a.stars.cmp(&b.stars),
        SortMode::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        SortMode::UpdatedAsc => a.updated_at.cmp(&b.updated_at),
        SortMode::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortMode::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortMode::NameAsc => name_key(a).cmp(&name_key(b)),
        SortMode::NameDesc => name_key(b).cmp(&name_key(a)),
    }
}

fn name_key(repo: &RepoSummary) -> String {
    repo.name.to_lowercase()
}
