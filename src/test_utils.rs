#![cfg(test)]

use crate::github::types::{FileEntry, FileKind, RepoSummary};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed reference instant so tests never read the wall clock.
pub fn base_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn make_repo(name: &str, stars: u32) -> RepoSummary {
    RepoSummary {
        full_name: format!("cs-tech-hub/{name}"),
        name: name.to_string(),
        description: Some(format!("{name} repository")),
        stars,
        forks: 0,
        watchers: 0,
        language: None,
        created_at: base_time(),
        updated_at: base_time(),
        url: format!("https://github.com/cs-tech-hub/{name}"),
        default_branch: "main".to_string(),
    }
}

/// Repo with neither description nor language.
pub fn make_repo_bare(name: &str) -> RepoSummary {
    let mut repo = make_repo(name, 0);
    repo.description = None;
    repo
}

pub fn make_repo_at(name: &str, stars: u32, updated_secs_ago: i64) -> RepoSummary {
    let mut repo = make_repo(name, stars);
    repo.updated_at = base_time() - Duration::seconds(updated_secs_ago);
    repo
}

pub fn make_file(name: &str, is_dir: bool) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        kind: if is_dir {
            FileKind::Directory
        } else {
            FileKind::File
        },
        url: format!("https://github.com/cs-tech-hub/repo/blob/main/{name}"),
    }
}

pub fn make_page(names: &[&str]) -> Vec<RepoSummary> {
    names.iter().map(|n| make_repo(n, 0)).collect()
}
