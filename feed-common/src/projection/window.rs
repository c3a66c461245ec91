use types::post::Post;

use crate::consts::{DEFAULT_WINDOW, PAGE_STEP};

/// Number of refined posts currently rendered.
/// Only grows within a session, [`VisibleWindow::reset`] restores the initial size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleWindow {
    initial: usize,
    step: usize,
    count: usize,
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, PAGE_STEP)
    }
}

impl VisibleWindow {
    /// A zero step is bumped to 1 so that "load more" always progresses
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            initial,
            step: step.max(1),
            count: initial,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Reveals one more step of posts.
    /// Does nothing once every one of `total` posts is visible.
    pub fn load_more(&mut self, total: usize) -> bool {
        if self.count >= total {
            return false;
        }
        self.count = self.count.saturating_add(self.step);
        true
    }

    pub fn reset(&mut self) {
        self.count = self.initial;
    }
}

/// Newest first. Stable, so equal ids keep their relative order.
pub fn sort_by_recency(posts: &mut [&Post]) {
    posts.sort_by(|a, b| b.id.cmp(&a.id));
}

/// The visible prefix of a sorted feed
#[derive(Clone, Debug, PartialEq)]
pub struct Page<'p> {
    pub posts: Vec<&'p Post>,
    pub total: usize,
}

impl<'p> Page<'p> {
    pub fn new(sorted: &[&'p Post], visible: usize) -> Self {
        let shown = visible.min(sorted.len());
        Self {
            posts: sorted[..shown].to_vec(),
            total: sorted.len(),
        }
    }

    pub fn shown(&self) -> usize {
        self.posts.len()
    }

    /// Whether the "load more" affordance should be offered
    pub fn has_more(&self) -> bool {
        self.shown() < self.total
    }

    pub fn indicator(&self) -> String {
        format!("{}/{} posts shown", self.shown(), self.total)
    }
}
