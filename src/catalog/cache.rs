use crate::catalog::page::RepoPage;
use crate::github::types::FileEntry;
use std::collections::HashMap;

/// Process-lifetime memo of gateway results. Pages are keyed by page index,
/// file listings by repository identifier, independent of page. Only
/// successful fetches are ever stored; failures stay out so a retry always
/// reaches the network again.
#[derive(Default)]
pub struct CatalogCache {
    pages: HashMap<u32, RepoPage>,
    files: HashMap<String, Vec<FileEntry>>,
}

impl CatalogCache {
    pub fn page(&self, index: u32) -> Option<&RepoPage> {
        self.pages.get(&index)
    }

    pub fn store_page(&mut self, index: u32, page: RepoPage) {
        self.pages.insert(index, page);
    }

    pub fn files(&self, full_name: &str) -> Option<&[FileEntry]> {
        self.files.get(full_name).map(|f| f.as_slice())
    }

    pub fn store_files(&mut self, full_name: String, files: Vec<FileEntry>) {
        self.files.insert(full_name, files);
    }
}
