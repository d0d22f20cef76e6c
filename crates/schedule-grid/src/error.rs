//! Error types for schedule-grid configuration.
//!
//! Grid construction itself never fails: malformed events are clamped and
//! unknown resources are counted in the build report. Errors only arise when
//! loading or validating resource configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    /// Operating hours outside `0..=1440` minutes, or ending before they start.
    #[error("Invalid operating hours for resource {resource}: {start}-{end}")]
    InvalidHours {
        resource: String,
        start: u32,
        end: u32,
    },

    /// The configuration document was not valid JSON for the expected shape.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
