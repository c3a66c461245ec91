pub mod posts;
pub mod reaction;
