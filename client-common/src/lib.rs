pub mod api_client;
pub mod clipboard;
pub mod controller;
pub mod crack_time;
pub mod view;

pub use api_client::{ApiClient, Backend};

/// Client-side sanity check before asking for a breach lookup.
pub fn check_email(email: &str) -> bool {
    validator::validate_email(email)
}
