/// Tracks the 1-based page index and whether the last loaded page was full,
/// which is the only forward-pagination signal the listing API gives us.
pub struct Pager {
    current: u32,
    last_full: bool,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current: 1,
            last_full: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn set_current(&mut self, index: u32) {
        self.current = index.max(1);
    }

    pub fn record_loaded(&mut self, is_full: bool) {
        self.last_full = is_full;
    }

    pub fn can_next(&self) -> bool {
        self.last_full
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_allowed_only_after_a_full_page() {
        let mut pager = Pager::new();
        assert!(!pager.can_next());

        pager.record_loaded(true);
        assert!(pager.can_next());

        pager.set_current(2);
        pager.record_loaded(false);
        assert!(!pager.can_next());
    }

    #[test]
    fn backward_blocked_on_first_page() {
        let mut pager = Pager::new();
        assert!(!pager.can_prev());
        pager.set_current(2);
        assert!(pager.can_prev());
        pager.set_current(1);
        assert!(!pager.can_prev());
    }

    #[test]
    fn index_never_drops_below_one() {
        let mut pager = Pager::new();
        pager.set_current(0);
        assert_eq!(pager.current(), 1);
    }
}
