pub mod backend;
pub mod config;
pub mod consts;
mod error;
pub mod projection;
pub mod session;
pub mod state;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use session::FeedSession;
