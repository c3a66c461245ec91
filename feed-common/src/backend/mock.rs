use std::sync::{Mutex, MutexGuard, PoisonError};

use types::{
    category::{Category, CategoryRef},
    post::{ActorRef, NewPost, Post, ReactionRecord},
};

use crate::{Error, Result};

use super::ForumBackend;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    FetchPosts,
    FetchCategories,
    ToggleLike {
        post_id: u64,
        user_id: u64,
        remove: bool,
    },
    ToggleDislike {
        post_id: u64,
        user_id: u64,
        remove: bool,
    },
    DeletePost {
        post_id: u64,
        user_id: u64,
    },
    CreatePost(NewPost),
}

#[derive(Default)]
struct MockStore {
    posts: Vec<Post>,
    categories: Vec<Category>,
    calls: Vec<BackendCall>,
    /// Calls left to succeed before failing with the status
    fail_at: Option<(usize, u16)>,
}

/// In-memory backend with the same ownership and uniqueness rules as the real one.
/// Records every call it receives.
#[derive(Default)]
pub struct MockBackend {
    store: Mutex<MockStore>,
}

impl MockBackend {
    pub fn new(posts: Vec<Post>, categories: Vec<Category>) -> Self {
        Self {
            store: Mutex::new(MockStore {
                posts,
                categories,
                ..Default::default()
            }),
        }
    }

    fn store(&self) -> MutexGuard<'_, MockStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.store().calls.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.store().posts.clone()
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.store().categories = categories;
    }

    /// Makes the next call fail with the given HTTP status
    pub fn fail_next(&self, status: u16) {
        self.fail_after(0, status);
    }

    /// Lets `calls` more calls through, then fails the one after with the given HTTP status
    pub fn fail_after(&self, calls: usize, status: u16) {
        self.store().fail_at = Some((calls, status));
    }

    fn record(&self, call: BackendCall) -> Result<MutexGuard<'_, MockStore>> {
        log::debug!("mock backend received: {call:?}");
        let mut store = self.store();
        store.calls.push(call);
        match store.fail_at.take() {
            Some((0, status)) => Err(Error::from_status(status)),
            Some((left, status)) => {
                store.fail_at = Some((left - 1, status));
                Ok(store)
            }
            None => Ok(store),
        }
    }

    fn react(&self, call: BackendCall, post_id: u64, user_id: u64, remove: bool) -> Result<()> {
        let like = matches!(call, BackendCall::ToggleLike { .. });
        let mut store = self.record(call)?;
        let post = store
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(Error::NotFound)?;
        let records = if like {
            &mut post.likes
        } else {
            &mut post.dislikes
        };

        records.retain(|r| r.profile != ActorRef::Id(user_id));
        if !remove {
            records.push(ReactionRecord {
                profile: ActorRef::Id(user_id),
                post: Some(post_id),
            });
        }
        Ok(())
    }
}

impl ForumBackend for MockBackend {
    async fn fetch_all_posts(&self) -> Result<Vec<Post>> {
        let store = self.record(BackendCall::FetchPosts)?;
        Ok(store.posts.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let store = self.record(BackendCall::FetchCategories)?;
        Ok(store.categories.clone())
    }

    async fn toggle_like(&self, post_id: u64, user_id: u64, remove: bool) -> Result<()> {
        let call = BackendCall::ToggleLike {
            post_id,
            user_id,
            remove,
        };
        self.react(call, post_id, user_id, remove)
    }

    async fn toggle_dislike(&self, post_id: u64, user_id: u64, remove: bool) -> Result<()> {
        let call = BackendCall::ToggleDislike {
            post_id,
            user_id,
            remove,
        };
        self.react(call, post_id, user_id, remove)
    }

    async fn delete_post(&self, post_id: u64, user_id: u64) -> Result<()> {
        let mut store = self.record(BackendCall::DeletePost { post_id, user_id })?;
        let idx = store
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or(Error::NotFound)?;
        if !store.posts[idx].is_owned_by(user_id) {
            return Err(Error::Forbidden);
        }
        store.posts.remove(idx);
        Ok(())
    }

    async fn create_post(&self, post: NewPost) -> Result<()> {
        let mut store = self.record(BackendCall::CreatePost(post.clone()))?;
        let id = store.posts.iter().map(|p| p.id).max().unwrap_or_default() + 1;
        store.posts.push(Post {
            id,
            title: post.question,
            content: post.content,
            user_id: Some(post.creator),
            categories: post.categories.into_iter().map(CategoryRef::Id).collect(),
            likes: vec![],
            dislikes: vec![],
            comments: vec![],
            is_student: post.is_student,
            timestamp: None,
        });
        Ok(())
    }
}
