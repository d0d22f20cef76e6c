//! Resource configuration: operating hours and slot granularity.
//!
//! A resource (a room, a practitioner, ...) is open between `start_mins` and
//! `end_mins`, both minutes since midnight in `0..=1440`, and divides its day
//! into slots of `slot_size` minutes. Missing fields fall back to 08:00-18:00
//! with 15 minute slots.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::time::{
    normalize_slot_size, DEFAULT_END_MINS, DEFAULT_SLOT_SIZE, DEFAULT_START_MINS, MINUTES_PER_DAY,
};

/// Operating window and slot size for one bookable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Opaque resource identifier, matched against [`Event::resource_id`](crate::Event).
    pub id: String,
    /// Opening time, as minutes since midnight.
    #[serde(default = "default_start")]
    pub start_mins: u32,
    /// Closing time, as minutes since midnight.
    #[serde(default = "default_end")]
    pub end_mins: u32,
    /// Slot size in minutes. Zero is replaced by the default at build time.
    #[serde(default = "default_slot_size")]
    pub slot_size: u32,
}

fn default_start() -> u32 {
    DEFAULT_START_MINS
}

fn default_end() -> u32 {
    DEFAULT_END_MINS
}

fn default_slot_size() -> u32 {
    DEFAULT_SLOT_SIZE
}

impl ResourceConfig {
    /// Create a validated resource configuration.
    ///
    /// # Errors
    /// Returns `GridError::InvalidHours` if the hours fall outside the day or
    /// close before they open.
    pub fn new(id: impl Into<String>, start_mins: u32, end_mins: u32, slot_size: u32) -> Result<Self> {
        let config = Self {
            id: id.into(),
            start_mins,
            end_mins,
            slot_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// A resource open 08:00-18:00 with 15 minute slots.
    pub fn with_defaults(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_mins: DEFAULT_START_MINS,
            end_mins: DEFAULT_END_MINS,
            slot_size: DEFAULT_SLOT_SIZE,
        }
    }

    /// Check that `start_mins <= end_mins <= 1440`.
    pub fn validate(&self) -> Result<()> {
        if self.start_mins > self.end_mins || self.end_mins > MINUTES_PER_DAY {
            return Err(GridError::InvalidHours {
                resource: self.id.clone(),
                start: self.start_mins,
                end: self.end_mins,
            });
        }
        Ok(())
    }

    /// The slot size with a zero value replaced by the default.
    pub fn slot_size(&self) -> u32 {
        normalize_slot_size(self.slot_size)
    }

    /// Operating hours clamped into the day, with `end >= start`.
    ///
    /// Builders use this so that an unvalidated configuration still yields a
    /// usable window.
    pub(crate) fn hours(&self) -> (u32, u32) {
        let start = self.start_mins.min(MINUTES_PER_DAY);
        let end = self.end_mins.clamp(start, MINUTES_PER_DAY);
        (start, end)
    }
}

/// Parse and validate a JSON array of resource configurations.
///
/// ```
/// use schedule_grid::config::load_resources;
///
/// let resources = load_resources(r#"[{"id":"surgery","slot_size":10},{"id":"consult"}]"#).unwrap();
/// assert_eq!(resources[0].slot_size, 10);
/// assert_eq!(resources[1].start_mins, 8 * 60);
/// ```
///
/// # Errors
/// Returns `GridError::Config` for malformed JSON and `GridError::InvalidHours`
/// for the first resource with an invalid operating window.
pub fn load_resources(json: &str) -> Result<Vec<ResourceConfig>> {
    let resources: Vec<ResourceConfig> = serde_json::from_str(json)?;
    for resource in &resources {
        resource.validate()?;
    }
    Ok(resources)
}
