// Paths relative to the API base url, trailing slashes are required by the backend
pub const ALL_POSTS: &str = "all-posts/";
pub const POST_DETAILS: &str = "postData/";
pub const CATEGORIES: &str = "categories/";
pub const NEW_POST: &str = "new-post/";
pub const LIKE_POST: &str = "like-post/";
pub const DISLIKE_POST: &str = "dislike-post/";
pub const DELETE_POST: &str = "delete-post/";
