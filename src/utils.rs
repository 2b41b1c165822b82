//! Utility functions for the roster rating service

use crate::types::{PlayerId, RatingId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique player ID
pub fn generate_player_id() -> PlayerId {
    format!("player-{}", Uuid::new_v4())
}

/// Generate a new unique rating ID
pub fn generate_rating_id() -> RatingId {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`)
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Case-insensitive substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Canonical form of an email address: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether two email addresses name the same person
pub fn same_email(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}
