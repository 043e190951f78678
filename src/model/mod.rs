//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod query;
pub mod repository;
pub mod result_set;

// Re-export for convenience
pub use error::{AppError, FetchError, RATE_LIMIT_STATUS};
pub use key_action::KeyAction;
pub use query::Query;
pub use repository::{
    clamp_per_page, Owner, Page, PageNumber, Repository, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
pub use result_set::PagedResultSet;
