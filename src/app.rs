use crate::catalog::cache::CatalogCache;
use crate::catalog::page::RepoPage;
use crate::catalog::pager::Pager;
use crate::catalog::sort::SortMode;
use crate::catalog::state::CollectionState;
use crate::catalog::view_model::{build_card, CardPresentation, PanelView, FILE_DISPLAY_CAP};
use crate::config::Config;
use crate::error::Result;
use crate::event::AppEvent;
use crate::github::types::{FileEntry, RepoSummary};
use crate::ui::{
    banner::{ErrorBanner, LoadingBanner},
    card_list::{self, CardList},
    header_bar::HeaderBar,
    help_panel::HelpPanel,
    input::{self, Action},
    sort_panel::SortPanel,
    status_bar::StatusBar,
};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Sort,
    Help,
}

/// A network operation the coordinator wants performed. Each value maps to
/// exactly one gateway call; the event loop spawns it and posts the
/// completion back as an `AppEvent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    Page(u32),
    Files { repo: String, branch: String },
}

pub struct App {
    pub config: Config,
    pub collection: CollectionState,
    pub pager: Pager,
    pub cache: CatalogCache,

    expanded: HashSet<String>,
    files_pending: HashSet<String>,
    files_failed: HashMap<String, String>,

    pub loading_page: Option<u32>,
    pub page_error: Option<String>,

    pub mode: Mode,
    pub search_input: String,
    sort_cursor: usize,
    selected: usize,
    scroll: usize,

    pub rate_limit: Option<u32>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            collection: CollectionState::new(SortMode::default()),
            pager: Pager::new(),
            cache: CatalogCache::default(),
            expanded: HashSet::new(),
            files_pending: HashSet::new(),
            files_failed: HashMap::new(),
            loading_page: None,
            page_error: None,
            mode: Mode::Normal,
            search_input: String::new(),
            sort_cursor: 0,
            selected: 0,
            scroll: 0,
            rate_limit: None,
            should_quit: false,
        }
    }

    pub fn start(&mut self) -> Option<FetchRequest> {
        self.load_page(1)
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<FetchRequest> {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, self.mode);
                self.handle_action(action)
            }
            AppEvent::PageLoaded {
                page,
                result,
                rate_limit,
            } => {
                self.on_page_loaded(page, result, rate_limit);
                None
            }
            AppEvent::FilesLoaded { repo, result } => {
                self.on_files_loaded(repo, result);
                None
            }
            AppEvent::Resize => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Option<FetchRequest> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::ScrollDown => {
                if self.mode == Mode::Sort {
                    self.sort_cursor = (self.sort_cursor + 1).min(SortMode::ALL.len() - 1);
                } else {
                    let last = self.collection.visible_count().saturating_sub(1);
                    self.selected = (self.selected + 1).min(last);
                }
                None
            }
            Action::ScrollUp => {
                if self.mode == Mode::Sort {
                    self.sort_cursor = self.sort_cursor.saturating_sub(1);
                } else {
                    self.selected = self.selected.saturating_sub(1);
                }
                None
            }
            Action::NextPage => {
                if self.loading_page.is_none() && self.pager.can_next() {
                    return self.load_page(self.pager.current() + 1);
                }
                None
            }
            Action::PrevPage => {
                if self.loading_page.is_none() && self.pager.can_prev() {
                    return self.load_page(self.pager.current() - 1);
                }
                None
            }
            Action::Retry => {
                if self.loading_page.is_none() {
                    return self.load_page(self.pager.current());
                }
                None
            }
            Action::ToggleFiles => {
                let full_name = self.selected_repo().map(|r| r.full_name.clone())?;
                self.toggle_files(&full_name)
            }
            Action::OpenRepo => {
                if let Some(repo) = self.selected_repo() {
                    open_in_browser(&repo.url);
                }
                None
            }
            Action::Search => {
                self.mode = Mode::Search;
                None
            }
            Action::SearchChar(c) => {
                self.search_input.push(c);
                self.update_search();
                None
            }
            Action::SearchBackspace => {
                self.search_input.pop();
                self.update_search();
                None
            }
            Action::SearchConfirm => {
                self.mode = Mode::Normal;
                None
            }
            Action::SearchCancel => {
                self.search_input.clear();
                self.collection.clear_search();
                self.mode = Mode::Normal;
                None
            }
            Action::SortPanel => {
                self.sort_cursor = SortMode::ALL
                    .iter()
                    .position(|m| *m == self.collection.sort_mode())
                    .unwrap_or(0);
                self.mode = Mode::Sort;
                None
            }
            Action::SortConfirm => {
                self.apply_sort(SortMode::ALL[self.sort_cursor]);
                self.mode = Mode::Normal;
                None
            }
            Action::SortCancel => {
                self.mode = Mode::Normal;
                None
            }
            Action::Help => {
                self.mode = Mode::Help;
                None
            }
            Action::ClosePopup => {
                if self.mode != Mode::Normal {
                    self.mode = Mode::Normal;
                } else if !self.collection.search_term().is_empty() {
                    // the clear-search control
                    self.search_input.clear();
                    self.collection.clear_search();
                }
                None
            }
            Action::None => None,
        }
    }

    /// Navigate to `index`, serving from the page cache when possible. File
    /// panels are page-scoped and reset here; sort mode and search term
    /// survive and are re-applied to the incoming contents.
    pub fn load_page(&mut self, index: u32) -> Option<FetchRequest> {
        self.page_error = None;
        self.expanded.clear();
        self.files_failed.clear();
        self.selected = 0;
        self.scroll = 0;
        self.pager.set_current(index);

        if let Some(page) = self.cache.page(index) {
            let page = page.clone();
            self.loading_page = None;
            self.apply_page(page);
            None
        } else {
            self.loading_page = Some(index);
            Some(FetchRequest::Page(index))
        }
    }

    pub fn apply_sort(&mut self, mode: SortMode) {
        self.collection.set_sort_mode(mode);
    }

    pub fn update_search(&mut self) {
        self.collection.set_search_term(&self.search_input);
        let last = self.collection.visible_count().saturating_sub(1);
        self.selected = self.selected.min(last);
    }

    /// Expand or collapse one repository's file panel. Expanding fetches at
    /// most once: a cache hit or an already-pending fetch for the same key is
    /// joined rather than duplicated.
    pub fn toggle_files(&mut self, full_name: &str) -> Option<FetchRequest> {
        if self.expanded.remove(full_name) {
            self.files_failed.remove(full_name);
            return None;
        }

        self.expanded.insert(full_name.to_string());
        if self.cache.files(full_name).is_some() || self.files_pending.contains(full_name) {
            return None;
        }

        self.files_failed.remove(full_name);
        self.files_pending.insert(full_name.to_string());
        let branch = self
            .collection
            .repos()
            .iter()
            .find(|r| r.full_name == full_name)
            .map(|r| r.default_branch.clone())
            .unwrap_or_else(|| "main".to_string());
        Some(FetchRequest::Files {
            repo: full_name.to_string(),
            branch,
        })
    }

    /// Page completions are keyed by index: success always lands in the
    /// cache, but the view only changes if this index is still the one being
    /// awaited.
    pub fn on_page_loaded(
        &mut self,
        index: u32,
        result: Result<Vec<RepoSummary>>,
        rate_limit: Option<u32>,
    ) {
        if rate_limit.is_some() {
            self.rate_limit = rate_limit;
        }
        match result {
            Ok(repos) => {
                let page = RepoPage::new(repos, self.config.per_page);
                self.cache.store_page(index, page.clone());
                if self.loading_page == Some(index) {
                    self.loading_page = None;
                    if self.pager.current() == index {
                        self.apply_page(page);
                    }
                }
            }
            Err(err) => {
                if self.loading_page == Some(index) {
                    self.loading_page = None;
                    if self.pager.current() == index {
                        self.page_error = Some(err.to_string());
                    }
                }
            }
        }
    }

    /// File completions are keyed by repository identifier. Success is cached
    /// even when the panel has since been collapsed or left behind by page
    /// navigation; failure only marks a still-expanded panel and is never
    /// cached, so the next expand retries.
    pub fn on_files_loaded(&mut self, repo: String, result: Result<Vec<FileEntry>>) {
        self.files_pending.remove(&repo);
        match result {
            Ok(files) => {
                self.cache.store_files(repo, files);
            }
            Err(err) => {
                if self.expanded.contains(&repo) {
                    self.files_failed.insert(repo, err.to_string());
                }
            }
        }
    }

    fn apply_page(&mut self, page: RepoPage) {
        self.pager.record_loaded(page.is_full);
        self.collection.set_page(page.repos);
        let last = self.collection.visible_count().saturating_sub(1);
        self.selected = self.selected.min(last);
    }

    fn selected_repo(&self) -> Option<&RepoSummary> {
        let visible = self.collection.visible_indices();
        visible
            .get(self.selected)
            .map(|&i| &self.collection.repos()[i])
    }

    fn panel_view(&self, full_name: &str) -> PanelView {
        if !self.expanded.contains(full_name) {
            return PanelView::Hidden;
        }
        if let Some(message) = self.files_failed.get(full_name) {
            return PanelView::Error(message.clone());
        }
        match self.cache.files(full_name) {
            Some([]) => PanelView::Empty,
            Some(files) => {
                PanelView::Files(files.iter().take(FILE_DISPLAY_CAP).cloned().collect())
            }
            None => PanelView::Loading,
        }
    }

    fn presentations(&self, now: DateTime<Utc>) -> Vec<CardPresentation> {
        self.collection
            .visible_indices()
            .into_iter()
            .map(|i| {
                let card = build_card(&self.collection.repos()[i], now);
                let panel = self.panel_view(&card.full_name);
                CardPresentation { card, panel }
            })
            .collect()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        frame.render_widget(
            HeaderBar {
                org: &self.config.org,
            },
            chunks[0],
        );

        let visible_count;
        if let Some(ref message) = self.page_error {
            visible_count = 0;
            frame.render_widget(
                ErrorBanner {
                    message: message.as_str(),
                },
                chunks[1],
            );
        } else if self.loading_page.is_some() {
            visible_count = 0;
            frame.render_widget(LoadingBanner, chunks[1]);
        } else {
            let cards = self.presentations(Utc::now());
            visible_count = cards.len();
            let heights = card_list::card_heights(&cards);
            self.scroll = card_list::ensure_visible(
                &heights,
                self.scroll,
                self.selected,
                chunks[1].height as usize,
            );
            frame.render_widget(
                CardList {
                    cards: &cards,
                    selected: self.selected,
                    scroll: self.scroll,
                },
                chunks[1],
            );
        }

        frame.render_widget(
            StatusBar {
                visible_count,
                page: self.pager.current(),
                can_prev: self.loading_page.is_none() && self.pager.can_prev(),
                can_next: self.loading_page.is_none() && self.pager.can_next(),
                sort_label: self.collection.sort_mode().label(),
                search_input: &self.search_input,
                search_active: self.mode == Mode::Search,
                rate_limit: self.rate_limit,
            },
            chunks[2],
        );

        match self.mode {
            Mode::Sort => frame.render_widget(
                SortPanel {
                    cursor: self.sort_cursor,
                    current: self.collection.sort_mode(),
                },
                size,
            ),
            Mode::Help => frame.render_widget(HelpPanel, size),
            _ => {}
        }
    }
}

fn open_in_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let program = "xdg-open";
    let _ = std::process::Command::new(program).arg(url).spawn();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PinakesError;
    use crate::test_utils::{base_time, make_file, make_page};

    fn test_app(per_page: usize) -> App {
        App::new(Config {
            org: "cs-tech-hub".to_string(),
            github_token: None,
            per_page,
        })
    }

    fn loaded_app(per_page: usize, names: &[&str]) -> App {
        let mut app = test_app(per_page);
        assert_eq!(app.start(), Some(FetchRequest::Page(1)));
        app.on_page_loaded(1, Ok(make_page(names)), None);
        app
    }

    fn http_error() -> PinakesError {
        PinakesError::HttpStatus {
            status: 500,
            message: "server error".to_string(),
        }
    }

    #[test]
    fn loading_a_cached_page_emits_no_fetch() {
        let mut app = loaded_app(3, &["a", "b", "c"]);
        assert_eq!(app.load_page(1), None);
        assert_eq!(app.collection.repos().len(), 3);
    }

    #[test]
    fn failed_page_load_is_not_cached_and_retry_refetches() {
        let mut app = test_app(3);
        assert_eq!(app.start(), Some(FetchRequest::Page(1)));
        app.on_page_loaded(1, Err(http_error()), None);
        assert!(app.page_error.is_some());
        assert!(app.collection.repos().is_empty());

        // retry reaches the gateway again and a success clears the banner
        assert_eq!(
            app.handle_action(Action::Retry),
            Some(FetchRequest::Page(1))
        );
        app.on_page_loaded(1, Ok(make_page(&["a"])), None);
        assert!(app.page_error.is_none());
        assert_eq!(app.collection.repos().len(), 1);
    }

    #[test]
    fn forward_navigation_follows_page_fullness() {
        let mut app = loaded_app(3, &["a", "b", "c"]);
        assert_eq!(
            app.handle_action(Action::NextPage),
            Some(FetchRequest::Page(2))
        );
        app.on_page_loaded(2, Ok(make_page(&["d", "e"])), None);

        // page 2 was short, so forward is now exhausted
        assert_eq!(app.handle_action(Action::NextPage), None);
        assert_eq!(
            app.handle_action(Action::PrevPage),
            None,
            "page 1 is cached"
        );
        assert_eq!(app.pager.current(), 1);
    }

    #[test]
    fn navigation_is_ignored_while_a_page_load_is_pending() {
        let mut app = loaded_app(2, &["a", "b"]);
        assert_eq!(
            app.handle_action(Action::NextPage),
            Some(FetchRequest::Page(2))
        );
        // still loading page 2
        assert_eq!(app.handle_action(Action::NextPage), None);
        assert_eq!(app.handle_action(Action::PrevPage), None);
    }

    #[test]
    fn stale_page_completion_only_fills_the_cache() {
        let mut app = test_app(2);
        assert_eq!(app.start(), Some(FetchRequest::Page(1)));
        app.on_page_loaded(7, Ok(make_page(&["x", "y"])), None);

        assert!(app.collection.repos().is_empty());
        assert_eq!(app.loading_page, Some(1));

        app.on_page_loaded(1, Ok(make_page(&["a", "b"])), None);
        assert_eq!(app.collection.repos().len(), 2);
        // the stale result is served from cache later
        assert_eq!(app.load_page(7), None);
        assert_eq!(app.collection.repos()[0].name, "x");
    }

    #[test]
    fn sort_and_search_survive_page_change_but_expansion_does_not() {
        let mut app = loaded_app(2, &["beta", "alpha"]);
        app.apply_sort(SortMode::NameAsc);
        app.search_input = "alp".to_string();
        app.update_search();
        assert!(app.toggle_files("cs-tech-hub/alpha").is_some());
        app.on_files_loaded("cs-tech-hub/alpha".to_string(), Ok(vec![]));

        assert_eq!(app.handle_action(Action::NextPage), Some(FetchRequest::Page(2)));
        app.on_page_loaded(2, Ok(make_page(&["gamma", "delta"])), None);

        assert_eq!(app.collection.sort_mode(), SortMode::NameAsc);
        assert_eq!(app.collection.search_term(), "alp");
        assert_eq!(app.collection.repos()[0].name, "delta", "sort re-applied");
        assert_eq!(
            app.panel_view("cs-tech-hub/alpha"),
            PanelView::Hidden,
            "panels are page-scoped"
        );
    }

    #[test]
    fn clearing_the_search_needs_no_fetch() {
        let mut app = loaded_app(2, &["a", "b"]);
        app.search_input = "zzz".to_string();
        app.update_search();
        assert_eq!(app.collection.visible_count(), 0);

        app.handle_action(Action::ClosePopup);
        assert_eq!(app.collection.visible_count(), 2);
        assert_eq!(app.load_page(1), None, "page still served from cache");
    }

    #[test]
    fn toggling_twice_during_a_slow_fetch_issues_one_request() {
        let mut app = loaded_app(1, &["a"]);
        let full = "cs-tech-hub/a";

        assert!(matches!(
            app.toggle_files(full),
            Some(FetchRequest::Files { .. })
        ));
        assert_eq!(app.panel_view(full), PanelView::Loading);

        // collapse, then re-expand before the fetch resolves: no second call
        assert_eq!(app.toggle_files(full), None);
        assert_eq!(app.panel_view(full), PanelView::Hidden);
        assert_eq!(app.toggle_files(full), None);
        assert_eq!(app.panel_view(full), PanelView::Loading);

        app.on_files_loaded(full.to_string(), Ok(vec![make_file("src", true)]));
        assert!(matches!(app.panel_view(full), PanelView::Files(ref f) if f.len() == 1));
    }

    #[test]
    fn late_file_completion_after_collapse_caches_silently() {
        let mut app = loaded_app(1, &["a"]);
        let full = "cs-tech-hub/a";

        assert!(app.toggle_files(full).is_some());
        assert_eq!(app.toggle_files(full), None); // collapse while pending
        app.on_files_loaded(full.to_string(), Ok(vec![make_file("README.md", false)]));

        assert_eq!(app.panel_view(full), PanelView::Hidden);
        // next expand is a pure cache hit
        assert_eq!(app.toggle_files(full), None);
        assert!(matches!(app.panel_view(full), PanelView::Files(_)));
    }

    #[test]
    fn file_errors_stay_in_their_panel_and_are_retriable() {
        let mut app = loaded_app(2, &["a", "b"]);
        let full = "cs-tech-hub/a";

        assert!(app.toggle_files(full).is_some());
        app.on_files_loaded(full.to_string(), Err(http_error()));
        assert!(matches!(app.panel_view(full), PanelView::Error(_)));
        assert!(app.page_error.is_none(), "no page-level banner");

        // collapse + expand retries because the failure was never cached
        assert_eq!(app.toggle_files(full), None);
        assert!(matches!(
            app.toggle_files(full),
            Some(FetchRequest::Files { .. })
        ));
    }

    #[test]
    fn empty_listing_shows_the_no_files_placeholder() {
        let mut app = loaded_app(1, &["a"]);
        let full = "cs-tech-hub/a";
        assert!(app.toggle_files(full).is_some());
        app.on_files_loaded(full.to_string(), Ok(vec![]));
        assert_eq!(app.panel_view(full), PanelView::Empty);
    }

    #[test]
    fn file_panels_truncate_to_the_display_cap() {
        let mut app = loaded_app(1, &["a"]);
        let full = "cs-tech-hub/a";
        assert!(app.toggle_files(full).is_some());
        let files = (0..12).map(|i| make_file(&format!("f{i}"), false)).collect();
        app.on_files_loaded(full.to_string(), Ok(files));

        match app.panel_view(full) {
            PanelView::Files(shown) => assert_eq!(shown.len(), FILE_DISPLAY_CAP),
            other => panic!("expected files panel, got {other:?}"),
        }
        // the cache keeps everything; only the panel truncates
        assert_eq!(app.cache.files(full).map(|f| f.len()), Some(12));
    }

    #[test]
    fn presentations_follow_the_visible_subset() {
        let mut app = loaded_app(3, &["parser", "site", "tool"]);
        app.search_input = "site".to_string();
        app.update_search();
        let cards = app.presentations(base_time());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card.name, "site");
    }
}
