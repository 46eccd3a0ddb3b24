//! Public Feed State
//!
//! Cursor bookkeeping of the public feed: older pages are appended, newer
//! pages are prepended on demand, and realtime arrivals only bump a counter.

use crate::models::{PublicTodo, TodoId};

#[derive(Debug, Clone, PartialEq)]
pub struct PublicFeed {
    /// Displayed rows, newest first
    todos: Vec<PublicTodo>,
    /// Exclusive upper bound of the next "load older" page
    oldest_cursor: TodoId,
    /// Newest id known to exist; arrivals above it bump the counter
    newest_cursor: TodoId,
    /// Newest id merged into (or seeded for) the list; only merges move it
    merged_newest: TodoId,
    new_count: u32,
    older_available: bool,
    error: bool,
}

impl PublicFeed {
    /// Seed the cursors from the latest todo reported by the subscription.
    /// With a latest todo, the first older page starts at (and includes) it.
    pub fn new(latest: Option<&PublicTodo>) -> Self {
        let (oldest_cursor, newest_cursor) = match latest {
            Some(todo) => (todo.id + 1, todo.id),
            None => (0, 0),
        };
        Self {
            todos: Vec::new(),
            oldest_cursor,
            newest_cursor,
            merged_newest: newest_cursor,
            new_count: 0,
            older_available: true,
            error: false,
        }
    }

    pub fn todos(&self) -> &[PublicTodo] {
        &self.todos
    }

    pub fn oldest_cursor(&self) -> TodoId {
        self.oldest_cursor
    }

    pub fn newest_cursor(&self) -> TodoId {
        self.newest_cursor
    }

    pub fn new_count(&self) -> u32 {
        self.new_count
    }

    pub fn older_available(&self) -> bool {
        self.older_available
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Cursor for the next older page, `None` once the feed is exhausted
    pub fn older_request(&self) -> Option<TodoId> {
        self.older_available.then_some(self.oldest_cursor)
    }

    /// Lower bound for "load new": the newest merged row (or the seed).
    /// Arrivals never move it, so the rows they announce stay reachable.
    pub fn newer_request(&self) -> TodoId {
        self.merged_newest
    }

    fn contains(&self, id: TodoId) -> bool {
        self.todos.iter().any(|t| t.id == id)
    }

    /// Append an older page. An empty page ends "load older" for good.
    pub fn apply_older(&mut self, page: Vec<PublicTodo>) {
        let Some(last) = page.last() else {
            self.older_available = false;
            return;
        };
        self.oldest_cursor = last.id;

        let fresh: Vec<_> = page.into_iter().filter(|t| !self.contains(t.id)).collect();
        self.todos.extend(fresh);
        self.sync_cursors();
    }

    /// Prepend a newer page and reset the arrival counter
    pub fn apply_new(&mut self, page: Vec<PublicTodo>) {
        self.new_count = 0;
        let fresh: Vec<_> = page.into_iter().filter(|t| !self.contains(t.id)).collect();
        if fresh.is_empty() {
            return;
        }
        let mut merged = fresh;
        merged.append(&mut self.todos);
        self.todos = merged;
        self.sync_cursors();
    }

    fn sync_cursors(&mut self) {
        if let Some(first) = self.todos.first() {
            self.newest_cursor = self.newest_cursor.max(first.id);
            self.merged_newest = self.merged_newest.max(first.id);
        }
        if let Some(last) = self.todos.last() {
            self.oldest_cursor = self.oldest_cursor.min(last.id);
        }
    }

    /// Realtime report of the newest public todo. Returns whether it counted
    /// as a new arrival; the row itself is not displayed until "load new".
    pub fn on_arrival(&mut self, latest: &PublicTodo) -> bool {
        if latest.id > self.newest_cursor {
            self.new_count += 1;
            self.newest_cursor = latest.id;
            true
        } else {
            false
        }
    }

    /// Sticky: never cleared once set
    pub fn mark_error(&mut self) {
        self.error = true;
    }

    pub fn banner(&self) -> Option<String> {
        (self.new_count > 0).then(|| format!("New tasks have arrived! ({})", self.new_count))
    }

    pub fn older_label(&self) -> &'static str {
        if self.older_available {
            "Load older tasks"
        } else {
            "No more public tasks!"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoUser;

    fn make_todo(id: TodoId) -> PublicTodo {
        PublicTodo {
            id,
            title: format!("Public {}", id),
            is_completed: Some(false),
            created_at: None,
            user: TodoUser { name: "someone".to_string() },
        }
    }

    fn page(ids: impl IntoIterator<Item = TodoId>) -> Vec<PublicTodo> {
        ids.into_iter().map(make_todo).collect()
    }

    fn ids(feed: &PublicFeed) -> Vec<TodoId> {
        feed.todos().iter().map(|t| t.id).collect()
    }

    fn assert_cursor_invariant(feed: &PublicFeed) {
        if let (Some(min), Some(max)) = (feed.todos().iter().map(|t| t.id).min(), feed.todos().iter().map(|t| t.id).max()) {
            assert!(feed.oldest_cursor() <= min);
            assert!(feed.newest_cursor() >= max);
        }
    }

    #[test]
    fn test_init_from_latest() {
        let feed = PublicFeed::new(Some(&make_todo(60)));
        assert_eq!(feed.older_request(), Some(61));
        assert_eq!(feed.newest_cursor(), 60);

        let feed = PublicFeed::new(None);
        assert_eq!(feed.older_request(), Some(0));
        assert_eq!(feed.newest_cursor(), 0);
        assert_eq!(feed.older_label(), "Load older tasks");
        assert_eq!(feed.banner(), None);
    }

    #[test]
    fn test_load_older_until_exhausted() {
        let mut feed = PublicFeed::new(None);

        feed.apply_older(page((44..=50).rev()));
        assert_eq!(ids(&feed), vec![50, 49, 48, 47, 46, 45, 44]);
        assert_eq!(feed.oldest_cursor(), 44);
        assert_eq!(feed.older_request(), Some(44));
        assert_cursor_invariant(&feed);

        feed.apply_older(Vec::new());
        assert!(!feed.older_available());
        assert_eq!(feed.older_label(), "No more public tasks!");
        // Further clicks issue nothing
        assert_eq!(feed.older_request(), None);
        assert_eq!(feed.todos().len(), 7);
    }

    #[test]
    fn test_older_pages_never_duplicate() {
        let mut feed = PublicFeed::new(Some(&make_todo(20)));
        feed.apply_older(page((14..=20).rev()));
        feed.apply_older(page((7..=14).rev()));

        let shown = ids(&feed);
        let mut unique = shown.clone();
        unique.dedup();
        assert_eq!(shown, unique);
        assert_eq!(shown.first(), Some(&20));
        assert_eq!(shown.last(), Some(&7));
        assert_cursor_invariant(&feed);
    }

    #[test]
    fn test_arrival_bumps_counter_only() {
        let mut feed = PublicFeed::new(Some(&make_todo(60)));
        feed.apply_older(page((54..=60).rev()));

        assert!(feed.on_arrival(&make_todo(61)));
        assert_eq!(feed.new_count(), 1);
        assert_eq!(feed.newest_cursor(), 61);
        assert_eq!(feed.banner().as_deref(), Some("New tasks have arrived! (1)"));
        assert_eq!(ids(&feed).first(), Some(&60));

        // Same latest todo reported again does not count twice
        assert!(!feed.on_arrival(&make_todo(61)));
        assert_eq!(feed.new_count(), 1);
    }

    #[test]
    fn test_load_new_prepends_and_resets() {
        let mut feed = PublicFeed::new(Some(&make_todo(60)));
        feed.apply_older(page((54..=60).rev()));
        feed.on_arrival(&make_todo(61));
        feed.on_arrival(&make_todo(62));
        assert_eq!(feed.new_count(), 2);

        // Newer page starts above what was merged, not above the last arrival
        assert_eq!(feed.newer_request(), 60);
        feed.apply_new(page([62, 61]));

        assert_eq!(&ids(&feed)[..3], &[62, 61, 60]);
        assert_eq!(feed.new_count(), 0);
        assert_eq!(feed.banner(), None);
        assert_eq!(feed.newest_cursor(), 62);
        assert_eq!(feed.newer_request(), 62);
        assert_cursor_invariant(&feed);
    }

    #[test]
    fn test_arrival_on_empty_feed_stays_reachable() {
        let mut feed = PublicFeed::new(None);
        feed.apply_older(Vec::new());

        assert!(feed.on_arrival(&make_todo(5)));
        assert_eq!(feed.newer_request(), 0);

        feed.apply_new(page([5]));
        assert_eq!(ids(&feed), vec![5]);
        assert_eq!(feed.newer_request(), 5);
        assert_cursor_invariant(&feed);
    }

    #[test]
    fn test_arrival_before_first_page_stays_reachable() {
        let mut feed = PublicFeed::new(Some(&make_todo(60)));

        // First older page still in flight
        feed.on_arrival(&make_todo(61));
        assert_eq!(feed.newer_request(), 60);

        feed.apply_older(page((54..=60).rev()));
        assert_eq!(feed.newer_request(), 60);

        feed.apply_new(page([61]));
        assert_eq!(ids(&feed).first(), Some(&61));
        assert_eq!(feed.newer_request(), 61);
    }

    #[test]
    fn test_empty_new_page_resets_counter() {
        let mut feed = PublicFeed::new(None);
        feed.on_arrival(&make_todo(3));
        feed.apply_new(Vec::new());
        assert_eq!(feed.new_count(), 0);
        assert!(feed.todos().is_empty());
        assert_eq!(feed.newest_cursor(), 3);
    }

    #[test]
    fn test_racing_pages_skip_known_rows() {
        let mut feed = PublicFeed::new(Some(&make_todo(10)));
        feed.apply_older(page((4..=10).rev()));
        feed.apply_new(page([11, 10]));
        assert_eq!(ids(&feed), vec![11, 10, 9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_error_flag_is_sticky() {
        let mut feed = PublicFeed::new(None);
        feed.mark_error();
        feed.apply_older(page([5]));
        feed.apply_new(page([6]));
        assert!(feed.has_error());
    }
}
