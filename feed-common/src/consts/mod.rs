pub mod endpoints;

/// Posts visible before any "load more"
pub const DEFAULT_WINDOW: usize = 15;
/// Posts revealed by each "load more"
pub const PAGE_STEP: usize = 15;

pub const MAX_TITLE_CHARS: usize = 99;
pub const MAX_CONTENT_CHARS: usize = 999;
