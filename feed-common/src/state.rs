use types::{
    category::{Category, CategoryCatalog},
    post::Post,
    profile::UserProfile,
};

use crate::{
    projection::{window::VisibleWindow, Audience, FeedProjection},
    utils::posts::PostView,
};

/// Ordering token taken before a fetch starts.
/// Later tickets always compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    /// A new collection, e.g. first load or a different user.
    /// Active filter and window go back to their initial values.
    Fresh,
    /// Re-fetch of the same collection after a mutation
    Refresh,
}

/// Sole owner of the feed's mutable state.
/// Everything else only reads snapshots or sends one of the intents below.
#[derive(Clone, Debug)]
pub struct FeedState {
    posts: Vec<Post>,
    catalog: CategoryCatalog,
    audience: Audience,
    active_filter: Option<Category>,
    window: VisibleWindow,
    issued: u64,
    applied: Option<FetchTicket>,
}

impl FeedState {
    pub fn new(catalog: CategoryCatalog, audience: Audience, window: VisibleWindow) -> Self {
        Self {
            posts: vec![],
            catalog,
            audience,
            active_filter: None,
            window,
            issued: 0,
            applied: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    pub fn active_filter(&self) -> Option<&Category> {
        self.active_filter.as_ref()
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Installs a fetched snapshot unless a newer fetch already landed.
    /// Returns whether the snapshot was accepted.
    pub fn set_posts(&mut self, ticket: FetchTicket, posts: Vec<Post>, kind: SnapshotKind) -> bool {
        if self.applied.is_some_and(|applied| applied >= ticket) {
            log::debug!(
                "discarding stale snapshot {ticket:?}, already applied {:?}",
                self.applied
            );
            return false;
        }
        self.applied = Some(ticket);
        self.posts = posts;
        if kind == SnapshotKind::Fresh {
            self.active_filter = None;
            self.window.reset();
        }
        true
    }

    pub fn set_catalog(&mut self, catalog: CategoryCatalog, audience: Audience) {
        self.catalog = catalog;
        self.audience = audience;
    }

    /// Selects at most one category; a new selection replaces the previous one
    pub fn set_active_filter(&mut self, filter: Option<Category>) {
        self.active_filter = filter;
    }

    pub fn load_more(&mut self) -> bool {
        let total = self.projection().total();
        self.window.load_more(total)
    }

    /// Drops a post locally after the backend confirmed its deletion
    pub fn remove_post(&mut self, post_id: u64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != post_id);
        self.posts.len() != before
    }

    pub fn projection(&self) -> FeedProjection<'_> {
        FeedProjection::project(
            &self.posts,
            &self.catalog,
            &self.audience,
            self.active_filter.as_ref(),
            self.window.count(),
        )
    }

    pub fn post_view(&self, post_id: u64, viewer: &UserProfile) -> Option<PostView> {
        self.post(post_id)
            .map(|p| PostView::new(p, &self.catalog, viewer))
    }

    /// Views of the visible window, newest first
    pub fn visible_views(&self, viewer: &UserProfile) -> Vec<PostView> {
        self.projection()
            .page
            .posts
            .iter()
            .map(|p| PostView::new(p, &self.catalog, viewer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{catalog, category, followed, post, viewer};

    fn state() -> FeedState {
        FeedState::new(
            catalog(),
            Audience::Subscribed(followed(&["rust", "math"])),
            VisibleWindow::default(),
        )
    }

    fn rust_posts(n: u64) -> Vec<Post> {
        (1..=n).map(|id| post(id, &[1])).collect()
    }

    #[test]
    fn load_more_reveals_rest_then_stops() {
        let mut state = state();
        let ticket = state.begin_fetch();
        assert!(state.set_posts(ticket, rust_posts(30), SnapshotKind::Fresh));

        assert_eq!(state.projection().page.indicator(), "15/30 posts shown");
        assert!(state.load_more());
        let feed = state.projection();
        assert_eq!(feed.page.indicator(), "30/30 posts shown");
        assert!(!feed.page.has_more());

        assert!(!state.load_more());
        assert_eq!(state.window().count(), 30);
    }

    #[test]
    fn stale_snapshot_never_overwrites_newer() {
        let mut state = state();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        assert!(state.set_posts(newer, rust_posts(3), SnapshotKind::Refresh));
        assert!(!state.set_posts(older, rust_posts(1), SnapshotKind::Refresh));
        assert_eq!(state.posts().len(), 3);

        // the same ticket cannot be applied twice either
        assert!(!state.set_posts(newer, vec![], SnapshotKind::Refresh));
    }

    #[test]
    fn fresh_snapshot_resets_session_state() {
        let mut state = state();
        let t = state.begin_fetch();
        state.set_posts(t, rust_posts(40), SnapshotKind::Fresh);
        state.set_active_filter(Some(category(1)));
        state.load_more();
        assert_eq!(state.window().count(), 30);

        let t = state.begin_fetch();
        state.set_posts(t, rust_posts(40), SnapshotKind::Refresh);
        assert_eq!(state.window().count(), 30);
        assert!(state.active_filter().is_some());

        let t = state.begin_fetch();
        state.set_posts(t, rust_posts(40), SnapshotKind::Fresh);
        assert_eq!(state.window().count(), 15);
        assert!(state.active_filter().is_none());
    }

    #[test]
    fn single_active_filter_replaces_previous() {
        let mut state = state();
        let t = state.begin_fetch();
        state.set_posts(
            t,
            vec![post(1, &[1]), post(2, &[2]), post(3, &[1, 2])],
            SnapshotKind::Fresh,
        );

        state.set_active_filter(Some(category(1)));
        state.set_active_filter(Some(category(2)));
        let ids: Vec<_> = state.projection().refined.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2]);

        state.set_active_filter(None);
        assert_eq!(state.projection().total(), 3);
    }

    #[test]
    fn removed_post_leaves_feed() {
        let mut state = state();
        let t = state.begin_fetch();
        state.set_posts(t, rust_posts(3), SnapshotKind::Fresh);

        assert!(state.remove_post(2));
        assert!(!state.remove_post(2));
        assert!(state.post(2).is_none());
        assert_eq!(state.projection().total(), 2);
    }

    #[test]
    fn views_follow_window_order() {
        let mut state = state();
        let t = state.begin_fetch();
        state.set_posts(t, rust_posts(20), SnapshotKind::Fresh);
        let alice = viewer(&[1]);

        let views = state.visible_views(&alice);
        assert_eq!(views.len(), 15);
        assert_eq!(views[0].id, 20);
        assert_eq!(state.post_view(5, &alice).map(|v| v.id), Some(5));
    }
}
