use types::{
    category::{Category, CategoryCatalog},
    post::Post,
};

use super::{subscription::category_names, Audience};

pub fn has_category(post: &Post, name: &str, catalog: &CategoryCatalog) -> bool {
    category_names(post, catalog).any(|n| n == name)
}

/// Narrows the audience-scoped posts to the active filter.
///
/// Matching is by category name since ids and names are mixed on the wire.
/// The audience predicate is checked again for every kept post.
pub fn refine<'p>(
    scoped: Vec<&'p Post>,
    filter: Option<&Category>,
    audience: &Audience,
    catalog: &CategoryCatalog,
) -> Vec<&'p Post> {
    let Some(filter) = filter else {
        return scoped;
    };
    scoped
        .into_iter()
        .filter(|post| has_category(post, &filter.name, catalog) && audience.admits(post, catalog))
        .collect()
}
