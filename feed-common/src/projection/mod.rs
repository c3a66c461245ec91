//! Derives the rendered feed from an immutable post snapshot.
//!
//! The pipeline runs in a fixed order: audience scope (the viewer's category
//! subscriptions, or every student post on the community page), then the
//! active filter, then recency ordering, then the visible window.

pub mod refine;
pub mod subscription;
pub mod window;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use types::{
    category::{Category, CategoryCatalog},
    post::Post,
    profile::UserProfile,
};

use refine::refine;
use subscription::{follows_any, subscribed};
use window::{sort_by_recency, Page};

/// Which posts a feed starts from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Audience {
    /// Posts in any of these followed category names
    Subscribed(BTreeSet<String>),
    /// Every student post, regardless of subscriptions
    Community,
}

impl Audience {
    pub fn admits(&self, post: &Post, catalog: &CategoryCatalog) -> bool {
        match self {
            Self::Subscribed(followed) => follows_any(post, followed, catalog),
            Self::Community => post.is_student,
        }
    }

    pub fn scope<'p>(&self, posts: &'p [Post], catalog: &CategoryCatalog) -> Vec<&'p Post> {
        match self {
            Self::Subscribed(followed) => subscribed(posts, followed, catalog),
            Self::Community => posts.iter().filter(|p| p.is_student).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudienceKind {
    #[default]
    Subscribed,
    Community,
}

impl AudienceKind {
    pub fn resolve(self, viewer: &UserProfile, catalog: &CategoryCatalog) -> Audience {
        match self {
            Self::Subscribed => Audience::Subscribed(viewer.followed_category_names(catalog)),
            Self::Community => Audience::Community,
        }
    }
}

/// Every stage of the pipeline, for the view layer to pick from
#[derive(Clone, Debug)]
pub struct FeedProjection<'p> {
    /// Audience-scoped posts, in snapshot order
    pub scoped: Vec<&'p Post>,
    /// Scoped posts narrowed by the active filter, newest first
    pub refined: Vec<&'p Post>,
    pub page: Page<'p>,
}

impl<'p> FeedProjection<'p> {
    pub fn project(
        posts: &'p [Post],
        catalog: &CategoryCatalog,
        audience: &Audience,
        active_filter: Option<&Category>,
        visible: usize,
    ) -> Self {
        let scoped = audience.scope(posts, catalog);
        let mut refined = refine(scoped.clone(), active_filter, audience, catalog);
        sort_by_recency(&mut refined);
        let page = Page::new(&refined, visible);

        Self {
            scoped,
            refined,
            page,
        }
    }

    pub fn shown(&self) -> usize {
        self.page.shown()
    }

    pub fn total(&self) -> usize {
        self.page.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{catalog, category, followed, post, viewer};

    #[test]
    fn small_subscription_fits_first_window() {
        let catalog = catalog();
        // ids 1..=6 are in rust or math, the rest in art, music and chess
        let posts: Vec<_> = (1..=20)
            .map(|id| {
                if id <= 6 {
                    post(id, &[id % 2 + 1])
                } else {
                    post(id, &[id % 3 + 3])
                }
            })
            .collect();
        let audience = AudienceKind::Subscribed.resolve(&viewer(&[1, 2]), &catalog);

        let feed = FeedProjection::project(&posts, &catalog, &audience, None, 15);
        assert_eq!(feed.scoped.len(), 6);
        assert_eq!(feed.page.indicator(), "6/6 posts shown");
        assert!(!feed.page.has_more());
        assert_eq!(
            feed.page.posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn large_subscription_is_windowed() {
        let catalog = catalog();
        let posts: Vec<_> = (1..=30).map(|id| post(id, &[1])).collect();
        let audience = Audience::Subscribed(followed(&["rust"]));

        let feed = FeedProjection::project(&posts, &catalog, &audience, None, 15);
        assert_eq!((feed.shown(), feed.total()), (15, 30));
        assert!(feed.page.has_more());
        assert_eq!(feed.page.posts[0].id, 30);

        let feed = FeedProjection::project(&posts, &catalog, &audience, None, 30);
        assert_eq!((feed.shown(), feed.total()), (30, 30));
        assert!(!feed.page.has_more());
    }

    #[test]
    fn active_filter_narrows_and_keeps_scope() {
        let catalog = catalog();
        let posts = vec![
            post(1, &[1]),
            post(2, &[2]),
            post(3, &[1, 2]),
            post(4, &[3]),
        ];
        let audience = Audience::Subscribed(followed(&["rust", "math"]));

        let math = category(2);
        let feed = FeedProjection::project(&posts, &catalog, &audience, Some(&math), 15);
        assert_eq!(feed.scoped.len(), 3);
        assert_eq!(
            feed.refined.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![3, 2]
        );

        // filtering on an unfollowed category yields nothing
        let art = category(3);
        let feed = FeedProjection::project(&posts, &catalog, &audience, Some(&art), 15);
        assert!(feed.refined.is_empty());
        assert_eq!(feed.page.indicator(), "0/0 posts shown");
    }

    #[test]
    fn community_shows_student_posts() {
        let catalog = catalog();
        let mut posts: Vec<_> = (1..=4).map(|id| post(id, &[id])).collect();
        posts[1].is_student = true;
        posts[3].is_student = true;

        let feed = FeedProjection::project(&posts, &catalog, &Audience::Community, None, 15);
        assert_eq!(
            feed.refined.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![4, 2]
        );

        let math = category(2);
        let feed =
            FeedProjection::project(&posts, &catalog, &Audience::Community, Some(&math), 15);
        assert_eq!(feed.refined.len(), 1);
    }
}
