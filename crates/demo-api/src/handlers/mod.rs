//! HTTP request handlers.

mod fallback;
mod health;
mod root;

pub use fallback::{method_not_allowed, not_found};
pub use health::health;
pub use root::root;
