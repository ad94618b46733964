use crate::error::Result;
use crate::github::types::{FileEntry, RepoSummary};
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    PageLoaded {
        page: u32,
        result: Result<Vec<RepoSummary>>,
        rate_limit: Option<u32>,
    },
    FilesLoaded {
        repo: String,
        result: Result<Vec<FileEntry>>,
    },
}
