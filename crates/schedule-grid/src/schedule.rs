//! A resource's calendar for one grid, and the columns built from it.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::config::ResourceConfig;
use crate::event::Event;
use crate::time::{ceil_to_slot, floor_to_slot, normalize_slot_size};

/// One resource's operating window, slot size and events.
///
/// The events of a schedule supplied by a caller may overlap; schedules
/// created by the column allocator never hold intersecting events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub resource_id: String,
    /// Opening time, as minutes since midnight.
    pub start_mins: u32,
    /// Closing time, as minutes since midnight.
    pub end_mins: u32,
    /// Slot size in minutes, always non-zero.
    pub slot_size: u32,
    events: Vec<Event>,
}

impl Schedule {
    /// Create an empty schedule from a resource configuration.
    pub fn new(config: &ResourceConfig) -> Self {
        let (start_mins, end_mins) = config.hours();
        Self {
            resource_id: config.id.clone(),
            start_mins,
            end_mins,
            slot_size: config.slot_size(),
            events: Vec::new(),
        }
    }

    /// An empty schedule with the same resource, hours and slot size.
    pub fn empty_clone(&self) -> Self {
        Self {
            resource_id: self.resource_id.clone(),
            start_mins: self.start_mins,
            end_mins: self.end_mins,
            slot_size: self.slot_size,
            events: Vec::new(),
        }
    }

    /// The events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Append an event. Ordering is the caller's responsibility; the grid
    /// builders add events sorted by start time.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Whether any stored event's `[start, end)` intersects `event`'s.
    pub fn has_intersecting_event(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e.intersects(event))
    }

    /// Whether any stored event's range, as computed by `range`, intersects
    /// `[start, end)`. Used by the day grid to compare day-slot ranges.
    pub fn has_intersecting_range<K, F>(&self, start: K, end: K, range: F) -> bool
    where
        K: Ord,
        F: Fn(&Event) -> (K, K),
    {
        self.events.iter().any(|event| {
            let (s, e) = range(event);
            s < end && start < e
        })
    }

    /// The event occupying the slot `[time, time + slot_size)`.
    ///
    /// An event occupies a slot when its slot-quantized interval (start
    /// rounded down, end rounded up, at least one slot long) contains the
    /// whole slot. When no event does and `first_slot` is set, an event whose
    /// raw interval spans `time` is returned instead; this catches events
    /// beginning before the grid's first slot.
    pub fn event_at(&self, time: NaiveDateTime, slot_size: u32, first_slot: bool) -> Option<&Event> {
        let slot_size = normalize_slot_size(slot_size);
        let slot = Duration::minutes(i64::from(slot_size));
        let contained = self.events.iter().find(|e| {
            let start = floor_to_slot(e.start, slot_size);
            let end = ceil_to_slot(e.end, slot_size).max(start + slot);
            start <= time && time + slot <= end
        });
        if contained.is_some() || !first_slot {
            return contained;
        }
        self.events.iter().find(|e| e.start <= time && time < e.end)
    }

    /// Whether the resource is open at `minutes` past midnight.
    pub fn is_open(&self, minutes: u32) -> bool {
        minutes >= self.start_mins && minutes < self.end_mins
    }
}

/// One rendered lane of a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub schedule: Schedule,
    /// `true` for lanes created to hold overlapping events of the resource.
    pub synthetic: bool,
}

impl Column {
    pub(crate) fn primary(schedule: Schedule) -> Self {
        Self {
            schedule,
            synthetic: false,
        }
    }

    pub(crate) fn synthetic(schedule: Schedule) -> Self {
        Self {
            schedule,
            synthetic: true,
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.schedule.resource_id
    }

    pub fn events(&self) -> &[Event] {
        self.schedule.events()
    }
}
