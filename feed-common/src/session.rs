use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use types::{
    category::{Category, CategoryCatalog},
    post::Post,
    profile::UserProfile,
};

use crate::{
    backend::ForumBackend,
    projection::{window::VisibleWindow, AudienceKind, FeedProjection},
    state::{FeedState, SnapshotKind},
    utils::{
        posts::PostView,
        reaction::{Reaction, ReactionAxis},
    },
    validation::PostDraft,
    Error, Result,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a post as having a reaction change in flight until dropped
struct InFlight<'a> {
    posts: &'a Mutex<HashSet<u64>>,
    post_id: u64,
}

impl<'a> InFlight<'a> {
    fn acquire(posts: &'a Mutex<HashSet<u64>>, post_id: u64) -> Result<Self> {
        if !lock(posts).insert(post_id) {
            return Err(Error::Busy(post_id));
        }
        Ok(Self { posts, post_id })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.posts).remove(&self.post_id);
    }
}

/// A viewer's feed backed by a [`ForumBackend`].
///
/// Mutations go to the backend first and are followed by a full re-fetch;
/// local state is never patched optimistically. Failed calls are logged and
/// leave local state untouched.
pub struct FeedSession<B> {
    backend: B,
    viewer: UserProfile,
    kind: AudienceKind,
    state: Mutex<FeedState>,
    in_flight: Mutex<HashSet<u64>>,
}

impl<B: ForumBackend> FeedSession<B> {
    pub fn new(backend: B, viewer: UserProfile, kind: AudienceKind, window: VisibleWindow) -> Self {
        let catalog = CategoryCatalog::default();
        let audience = kind.resolve(&viewer, &catalog);
        Self {
            backend,
            viewer,
            kind,
            state: Mutex::new(FeedState::new(catalog, audience, window)),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn viewer(&self) -> &UserProfile {
        &self.viewer
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        lock(&self.state)
    }

    /// Loads the category catalog and a fresh post snapshot
    pub async fn load(&self) -> Result<()> {
        let categories = match self.backend.fetch_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!("failed to fetch categories: {e}");
                return Err(e);
            }
        };
        let catalog = CategoryCatalog::new(categories);
        let audience = self.kind.resolve(&self.viewer, &catalog);

        let ticket = self.state().begin_fetch();
        let posts = self.fetch_posts().await?;
        // catalog and posts are installed together, only once the fetch succeeded
        let mut state = self.state();
        state.set_catalog(catalog, audience);
        state.set_posts(ticket, posts, SnapshotKind::Fresh);
        Ok(())
    }

    /// Re-fetches posts keeping the active filter and window.
    /// Returns false if a newer snapshot landed first.
    pub async fn refresh(&self) -> Result<bool> {
        self.fetch(SnapshotKind::Refresh).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.backend.fetch_all_posts().await.inspect_err(|e| {
            log::warn!("failed to fetch posts: {e}");
        })
    }

    async fn fetch(&self, kind: SnapshotKind) -> Result<bool> {
        let ticket = self.state().begin_fetch();
        let posts = self.fetch_posts().await?;
        let accepted = self.state().set_posts(ticket, posts, kind);
        Ok(accepted)
    }

    async fn send_reaction(&self, post_id: u64, axis: ReactionAxis, remove: bool) -> Result<()> {
        let user_id = self.viewer.id;
        let res = match axis {
            ReactionAxis::Like => self.backend.toggle_like(post_id, user_id, remove).await,
            ReactionAxis::Dislike => self.backend.toggle_dislike(post_id, user_id, remove).await,
        };
        if let Err(e) = &res {
            log::warn!("failed to send {axis:?} (remove: {remove}) for post {post_id}: {e}");
        }
        res
    }

    /// Toggles one axis of the viewer's reaction and returns the reaction
    /// the backend reports afterwards
    pub async fn toggle_reaction(&self, post_id: u64, axis: ReactionAxis) -> Result<Reaction> {
        let _in_flight = InFlight::acquire(&self.in_flight, post_id)?;
        let current = {
            let state = self.state();
            let post = state.post(post_id).ok_or(Error::NotFound)?;
            Reaction::of(post, &self.viewer)
        };

        let intent = current.toggle(axis);
        if let Some(opposite) = intent.withdraw {
            self.send_reaction(post_id, opposite, true).await?;
        }
        if let Err(e) = self.send_reaction(post_id, axis, intent.remove).await {
            if intent.withdraw.is_some() {
                // the withdrawal already landed, resync with the backend
                _ = self.fetch(SnapshotKind::Refresh).await;
            }
            return Err(e);
        }

        self.fetch(SnapshotKind::Refresh).await?;
        let state = self.state();
        let reaction = state
            .post(post_id)
            .map(|p| Reaction::of(p, &self.viewer))
            .unwrap_or_default();
        Ok(reaction)
    }

    pub async fn toggle_like(&self, post_id: u64) -> Result<Reaction> {
        self.toggle_reaction(post_id, ReactionAxis::Like).await
    }

    pub async fn toggle_dislike(&self, post_id: u64) -> Result<Reaction> {
        self.toggle_reaction(post_id, ReactionAxis::Dislike).await
    }

    pub fn is_busy(&self, post_id: u64) -> bool {
        lock(&self.in_flight).contains(&post_id)
    }

    /// Deletes one of the viewer's own posts.
    /// Posts owned by someone else are refused without contacting the backend.
    pub async fn delete_post(&self, post_id: u64) -> Result<()> {
        let owned = self
            .state()
            .post(post_id)
            .map(|p| p.is_owned_by(self.viewer.id))
            .ok_or(Error::NotFound)?;
        if !owned {
            return Err(Error::Forbidden);
        }

        if let Err(e) = self.backend.delete_post(post_id, self.viewer.id).await {
            log::warn!("failed to delete post {post_id}: {e}");
            return Err(e);
        }
        self.state().remove_post(post_id);
        Ok(())
    }

    /// Validates the draft locally, then submits it and re-fetches.
    /// Invalid drafts never reach the backend.
    pub async fn create_post(&self, draft: PostDraft) -> Result<()> {
        let is_student = self.kind == AudienceKind::Community;
        let post = draft.into_request(self.viewer.id, is_student)?;

        if let Err(e) = self.backend.create_post(post).await {
            log::warn!("failed to create post: {e}");
            return Err(e);
        }
        self.fetch(SnapshotKind::Refresh).await?;
        Ok(())
    }

    pub fn set_active_filter(&self, filter: Option<Category>) {
        self.state().set_active_filter(filter);
    }

    /// Activates the catalog category with this id, false if it is unknown
    pub fn select_category(&self, category_id: u64) -> bool {
        let mut state = self.state();
        let Some(category) = state.catalog().by_id(category_id).cloned() else {
            return false;
        };
        state.set_active_filter(Some(category));
        true
    }

    pub fn load_more(&self) -> bool {
        self.state().load_more()
    }

    pub fn with_projection<R>(&self, f: impl FnOnce(&FeedProjection<'_>) -> R) -> R {
        let state = self.state();
        f(&state.projection())
    }

    pub fn visible(&self) -> Vec<PostView> {
        self.state().visible_views(&self.viewer)
    }

    pub fn post_view(&self, post_id: u64) -> Option<PostView> {
        self.state().post_view(post_id, &self.viewer)
    }
}
