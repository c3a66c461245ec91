use std::collections::BTreeSet;

use types::{category::CategoryCatalog, post::Post};

/// Resolved category names of a post. Ids missing from the catalog are skipped.
pub fn category_names<'a>(
    post: &'a Post,
    catalog: &'a CategoryCatalog,
) -> impl Iterator<Item = &'a str> + 'a {
    post.categories.iter().filter_map(move |c| catalog.resolve(c))
}

pub fn follows_any(post: &Post, followed: &BTreeSet<String>, catalog: &CategoryCatalog) -> bool {
    category_names(post, catalog).any(|name| followed.contains(name))
}

/// Posts sharing at least one category with the followed set, in input order
pub fn subscribed<'p>(
    posts: &'p [Post],
    followed: &BTreeSet<String>,
    catalog: &CategoryCatalog,
) -> Vec<&'p Post> {
    if followed.is_empty() {
        return vec![];
    }
    posts
        .iter()
        .filter(|post| follows_any(post, followed, catalog))
        .collect()
}
