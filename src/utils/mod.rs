//! Utility functions

pub mod crypto;
pub mod pagination;
pub mod time;
pub mod validation;

pub use crypto::{generate_secure_token, hash_string};
pub use pagination::{Page, PageQuery};
pub use time::format_duration;
pub use validation::{
    normalize_ai_tools, sanitize_string, validate_media_url, validate_slug, validate_username,
};
