use std::collections::BTreeSet;

use types::{
    category::{Category, CategoryCatalog, CategoryRef},
    post::Post,
    profile::{ProfileData, UserProfile},
};

const NAMES: [&str; 5] = ["rust", "math", "art", "music", "chess"];

/// Categories 1..=5: rust, math, art, music, chess
pub fn catalog() -> CategoryCatalog {
    CategoryCatalog::new((1..=5).map(category).collect())
}

pub fn category(id: u64) -> Category {
    Category {
        id,
        name: NAMES[(id - 1) as usize].to_string(),
    }
}

pub fn post(id: u64, categories: &[u64]) -> Post {
    Post {
        id,
        title: format!("post {id}"),
        content: String::new(),
        user_id: Some(100 + id),
        categories: categories.iter().copied().map(CategoryRef::Id).collect(),
        likes: vec![],
        dislikes: vec![],
        comments: vec![],
        is_student: false,
        timestamp: None,
    }
}

pub fn followed(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// User 1 "alice" following the given category ids
pub fn viewer(following: &[u64]) -> UserProfile {
    UserProfile {
        id: 1,
        username: "alice".into(),
        first_name: "Alice".into(),
        profile_data: ProfileData {
            ctg_following: following.iter().copied().map(CategoryRef::Id).collect(),
        },
    }
}
