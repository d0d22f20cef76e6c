//! The booking value placed into grids.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::{floor_to_slot, normalize_slot_size};

/// A booking of one resource over `[start, end)`.
///
/// Times are local wall-clock times. Attributes are opaque to the engine and
/// carried through to grid lookups for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRecord")]
pub struct Event {
    pub id: String,
    pub resource_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

/// Wire shape of an event, before interval clamping.
#[derive(Deserialize)]
struct EventRecord {
    id: String,
    resource_id: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        let mut event = Event::new(record.id, record.resource_id, record.start, record.end);
        event.attributes = record.attributes;
        event
    }
}

impl Event {
    /// Create an event. An `end` before `start` is clamped to `start`,
    /// producing a zero-length event.
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        let id = id.into();
        let end = if end < start {
            tracing::debug!(event = %id, %start, %end, "event ends before it starts, clamping to zero length");
            start
        } else {
            end
        };
        Self {
            id,
            resource_id: resource_id.into(),
            start,
            end,
            attributes: Map::new(),
        }
    }

    /// Attach a display attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up a display attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether the half-open intervals of the two events intersect.
    ///
    /// Adjacent events (one ends exactly when the other starts) do not
    /// intersect. A zero-length event intersects any event strictly
    /// enclosing its instant.
    pub fn intersects(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The interval the event claims in a column of `slot_size`-minute
    /// slots: `[start, end)` for a timed event, the whole slot containing
    /// `start` for a zero-length one. A zero-length event is still drawn in
    /// one slot, so it must not share that slot with another event.
    pub fn placement(&self, slot_size: u32) -> (NaiveDateTime, NaiveDateTime) {
        if self.start < self.end {
            return (self.start, self.end);
        }
        let slot_size = normalize_slot_size(slot_size);
        let from = floor_to_slot(self.start, slot_size);
        (from, from + Duration::minutes(i64::from(slot_size)))
    }
}
