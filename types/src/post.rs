use serde::{Deserialize, Serialize};

use crate::category::CategoryRef;

/// User as referenced by reaction and comment records.
/// Some endpoints send the username, others the numeric id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActorRef {
    Id(u64),
    Username(String),
}

impl ActorRef {
    pub fn is_user(&self, user_id: u64, username: &str) -> bool {
        match self {
            Self::Id(id) => *id == user_id,
            Self::Username(name) => name == username,
        }
    }
}

/// A like or dislike left by a user on a post
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReactionRecord {
    pub profile: ActorRef,
    #[serde(default)]
    pub post: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub profile: Option<ActorRef>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// Unique and monotonically increasing, newer posts have higher ids
    pub id: u64,
    #[serde(default, alias = "question")]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Owner of the post
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub likes: Vec<ReactionRecord>,
    #[serde(default)]
    pub dislikes: Vec<ReactionRecord>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, rename = "isStudent")]
    pub is_student: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Post {
    pub fn liked_by(&self, user_id: u64, username: &str) -> bool {
        self.likes.iter().any(|l| l.profile.is_user(user_id, username))
    }

    pub fn disliked_by(&self, user_id: u64, username: &str) -> bool {
        self.dislikes
            .iter()
            .any(|d| d.profile.is_user(user_id, username))
    }

    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Body of a post creation request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    #[serde(rename = "isStudent")]
    pub is_student: bool,
    pub creator: u64,
    pub question: String,
    pub content: String,
    /// Category ids
    pub categories: Vec<u64>,
}

/// Body of a like/dislike toggle.
/// `remove` is set when the user currently holds the reaction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleReactionReq {
    pub post_id: u64,
    pub user_id: u64,
    pub remove: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeletePostReq {
    pub post_id: u64,
    pub user_id: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostDetailsReq {
    pub post_id: u64,
}
