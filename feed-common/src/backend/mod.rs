pub mod mock;
pub mod rest;

use std::future::Future;

use types::{
    category::Category,
    post::{NewPost, Post},
};

use crate::Result;

/// REST backend owning posts, categories and reactions.
/// Every call is authorized by the backend; the core never trusts local state for that.
pub trait ForumBackend {
    /// Full post collection with embedded likes, dislikes, comments and categories
    fn fetch_all_posts(&self) -> impl Future<Output = Result<Vec<Post>>> + Send;

    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    /// `remove` asks for an unlike instead of a like
    fn toggle_like(
        &self,
        post_id: u64,
        user_id: u64,
        remove: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    fn toggle_dislike(
        &self,
        post_id: u64,
        user_id: u64,
        remove: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_post(&self, post_id: u64, user_id: u64) -> impl Future<Output = Result<()>> + Send;

    fn create_post(&self, post: NewPost) -> impl Future<Output = Result<()>> + Send;
}
