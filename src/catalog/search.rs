use crate::github::types::RepoSummary;

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Substring match over name, description, and language, all lower-cased.
/// Absent fields count as empty strings, so they never match a non-empty term.
pub fn matches(repo: &RepoSummary, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    repo.name.to_lowercase().contains(term)
        || repo
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(term)
        || repo
            .language
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(term)
}
