//! Interactive menu screens
//!
//! One module per main-menu entry. Every screen prints the envelope
//! message on failure and returns to its loop; nothing here is fatal.

use chrono::NaiveDate;

pub mod activities;
pub mod dashboard;
pub mod github;
pub mod projects;
pub mod teams;
pub mod users;

pub(crate) fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub(crate) fn display_date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
