use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use types::{category::CategoryCatalog, post::Post, profile::UserProfile};

use super::reaction::Reaction;

/// What the view layer needs to render one post for a given viewer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostView {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Unknown category ids show as a placeholder
    pub category_names: Vec<String>,
    pub likes: usize,
    pub dislikes: usize,
    pub comments: usize,
    pub reaction: Reaction,
    /// Only the owner is offered the delete control
    pub deletable: bool,
}

impl PartialEq for PostView {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PostView {}

impl PartialOrd for PostView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PostView {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for PostView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PostView {
    pub fn new(post: &Post, catalog: &CategoryCatalog, viewer: &UserProfile) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            category_names: post
                .categories
                .iter()
                .map(|c| catalog.display_name(c).to_string())
                .collect(),
            likes: post.likes.len(),
            dislikes: post.dislikes.len(),
            comments: post.comments.len(),
            reaction: Reaction::of(post, viewer),
            deletable: post.is_owned_by(viewer.id),
        }
    }
}
