use crate::catalog::time::relative_time;
use crate::github::types::{FileEntry, RepoSummary};
use chrono::{DateTime, Utc};

pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_LANGUAGE_LABEL: &str = "\u{2014}";

/// Panel display cap. The cache keeps the full listing; only rendering
/// truncates.
pub const FILE_DISPLAY_CAP: usize = 8;

const UNKNOWN_LANGUAGE_COLOR: &str = "#888";
const NO_LANGUAGE_COLOR: &str = "#555";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("Shell", "#89e051"),
    ("Ruby", "#701516"),
    ("PHP", "#4F5D95"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
];

/// Render-ready representation of one repository card.
#[derive(Clone, Debug, PartialEq)]
pub struct RepoCard {
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    pub language: String,
    pub language_color: &'static str,
    pub updated: String,
}

/// The file panel attached to a card, already truncated for display.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelView {
    Hidden,
    Loading,
    Empty,
    Files(Vec<FileEntry>),
    Error(String),
}

#[derive(Clone, Debug)]
pub struct CardPresentation {
    pub card: RepoCard,
    pub panel: PanelView,
}

pub fn build_card(repo: &RepoSummary, now: DateTime<Utc>) -> RepoCard {
    let (language, language_color) = match repo.language.as_deref() {
        Some(lang) => (lang.to_string(), language_color(lang)),
        None => (NO_LANGUAGE_LABEL.to_string(), NO_LANGUAGE_COLOR),
    };

    RepoCard {
        full_name: repo.full_name.clone(),
        name: repo.name.clone(),
        description: repo
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        stars: repo.stars,
        forks: repo.forks,
        watchers: repo.watchers,
        language,
        language_color,
        updated: relative_time(repo.updated_at, now),
    }
}

fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(UNKNOWN_LANGUAGE_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{base_time, make_repo, make_repo_bare};

    #[test]
    fn known_language_gets_its_table_color() {
        let mut repo = make_repo("engine", 3);
        repo.language = Some("Rust".to_string());
        let card = build_card(&repo, base_time());
        assert_eq!(card.language, "Rust");
        assert_eq!(card.language_color, "#dea584");
    }

    #[test]
    fn unknown_language_falls_back_to_neutral() {
        let mut repo = make_repo("engine", 3);
        repo.language = Some("Brainfuck".to_string());
        assert_eq!(build_card(&repo, base_time()).language_color, "#888");
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let card = build_card(&make_repo_bare("quiet"), base_time());
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.language, NO_LANGUAGE_LABEL);
        assert_eq!(card.language_color, "#555");
    }

    #[test]
    fn updated_label_is_relative_to_the_given_clock() {
        let mut repo = make_repo("clockwork", 0);
        repo.updated_at = base_time() - chrono::Duration::seconds(3_600);
        assert_eq!(build_card(&repo, base_time()).updated, "1h ago");
    }
}
