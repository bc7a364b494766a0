pub mod config;
pub mod dates;
pub mod sanitize;
pub mod types;

pub use config::Config;
pub use dates::*;
pub use sanitize::{sanitize_search_text, Sanitized, SEARCH_TEXT_MAX_CHARS};
pub use types::*;
