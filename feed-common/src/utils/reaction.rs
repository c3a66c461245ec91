use serde::{Deserialize, Serialize};
use types::{post::Post, profile::UserProfile};

/// A user's reaction to a single post
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    #[default]
    None,
    Liked,
    Disliked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionAxis {
    Like,
    Dislike,
}

impl ReactionAxis {
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl From<ReactionAxis> for Reaction {
    fn from(axis: ReactionAxis) -> Self {
        match axis {
            ReactionAxis::Like => Reaction::Liked,
            ReactionAxis::Dislike => Reaction::Disliked,
        }
    }
}

/// Backend signals needed to toggle one axis of a reaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleIntent {
    pub axis: ReactionAxis,
    /// Undo the reaction (unlike / undislike) instead of adding it
    pub remove: bool,
    /// Opposite reaction that must be withdrawn first
    pub withdraw: Option<ReactionAxis>,
    pub expected: Reaction,
}

impl Reaction {
    /// Reaction of `viewer` according to the post's records.
    /// Records holding both a like and a dislike collapse to `Liked`.
    pub fn of(post: &Post, viewer: &UserProfile) -> Self {
        if post.liked_by(viewer.id, &viewer.username) {
            Self::Liked
        } else if post.disliked_by(viewer.id, &viewer.username) {
            Self::Disliked
        } else {
            Self::None
        }
    }

    pub fn holds(self, axis: ReactionAxis) -> bool {
        self == axis.into()
    }

    pub fn toggle(self, axis: ReactionAxis) -> ToggleIntent {
        if self.holds(axis) {
            return ToggleIntent {
                axis,
                remove: true,
                withdraw: None,
                expected: Self::None,
            };
        }
        ToggleIntent {
            axis,
            remove: false,
            withdraw: self.holds(axis.opposite()).then_some(axis.opposite()),
            expected: axis.into(),
        }
    }
}
