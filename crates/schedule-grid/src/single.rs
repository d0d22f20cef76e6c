//! Single-resource grids: one column, overlapping events laid end to end.
//!
//! A single column cannot show two simultaneous events side by side, so
//! double bookings are serialized instead: each event keeps its start-time
//! order and its slot count, but an event that overlaps its predecessor is
//! placed directly after it rather than at its wall-clock start. Exact
//! alignment of overlapping events is lost on purpose; callers that need it
//! should build a [`MultiResourceGrid`](crate::MultiResourceGrid).

use std::slice;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::ResourceConfig;
use crate::event::Event;
use crate::grid::{partition_by_resource, retain_on_date, Availability, BuildReport, ScheduleGrid};
use crate::schedule::{Column, Schedule};
use crate::time::{at_minutes, minutes_since, slot_minutes};

/// One row of a single-resource grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Start of the slot, as minutes since midnight of the grid date.
    start_mins: u32,
    /// Index into `groups`, if an event occupies the slot.
    group: Option<usize>,
}

/// The run of consecutive slots assigned to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotGroup {
    /// Index of the event in the column's schedule.
    event: usize,
    start_slot: usize,
    slots: usize,
}

/// A grid for one resource whose events are linearized into one column.
#[derive(Debug, Clone)]
pub struct SingleResourceGrid {
    date: NaiveDate,
    start_mins: u32,
    end_mins: u32,
    slot_size: u32,
    columns: Vec<Column>,
    slots: Vec<Slot>,
    groups: Vec<SlotGroup>,
    report: BuildReport,
}

/// Build a single-column grid for `resource` on `date`.
///
/// Events for other resources are counted as skipped; events not touching
/// `date` are counted as out of range. The grid always spans at least the
/// resource's operating hours, widened to whole slots around any event
/// outside them.
pub fn build_single_resource(
    resource: &ResourceConfig,
    events: &[Event],
    date: NaiveDate,
) -> SingleResourceGrid {
    let mut report = BuildReport::default();
    let mut schedule = Schedule::new(resource);
    let slot_size = schedule.slot_size;

    let mut events = partition_by_resource(slice::from_ref(resource), events, &mut report)
        .pop()
        .unwrap_or_default();
    retain_on_date(&mut events, date, &mut report);

    // Quantized [start, end) of each event, in minutes of the grid date.
    let spans: Vec<(u32, u32)> = events
        .iter()
        .map(|e| {
            let start = slot_minutes(date, e.start, slot_size, false);
            let end = slot_minutes(date, e.end, slot_size, true);
            (start, end.max(start))
        })
        .collect();

    let start_bound = spans
        .iter()
        .map(|&(start, _)| start)
        .fold(schedule.start_mins, u32::min);
    let end_bound = spans
        .iter()
        .map(|&(_, end)| end)
        .fold(schedule.end_mins, u32::max);

    let mut slots = Vec::new();
    let mut groups = Vec::with_capacity(spans.len());
    let mut cursor = start_bound;

    for (index, &(start, end)) in spans.iter().enumerate() {
        if start > cursor {
            while cursor < start {
                slots.push(Slot {
                    start_mins: cursor,
                    group: None,
                });
                cursor += slot_size;
            }
            cursor = start;
        }
        // An event overlapping its predecessor starts at the cursor instead.
        let count = ((end - start) / slot_size).max(1) as usize;
        let group = groups.len();
        groups.push(SlotGroup {
            event: index,
            start_slot: slots.len(),
            slots: count,
        });
        for _ in 0..count {
            slots.push(Slot {
                start_mins: cursor,
                group: Some(group),
            });
            cursor += slot_size;
        }
    }

    while cursor < end_bound {
        slots.push(Slot {
            start_mins: cursor,
            group: None,
        });
        cursor += slot_size;
    }

    for event in events {
        schedule.add_event(event);
    }

    tracing::debug!(
        resource = %resource.id,
        %date,
        slots = slots.len(),
        events = groups.len(),
        "built single-resource grid"
    );

    SingleResourceGrid {
        date,
        start_mins: start_bound,
        end_mins: cursor.max(end_bound),
        slot_size,
        columns: vec![Column::primary(schedule)],
        slots,
        groups,
        report,
    }
}

impl SingleResourceGrid {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Grid start, as minutes since midnight.
    pub fn start_mins(&self) -> u32 {
        self.start_mins
    }

    /// Grid end, as minutes since midnight. May pass the nominal end bound
    /// when double bookings push events later.
    pub fn end_mins(&self) -> u32 {
        self.end_mins
    }

    pub fn slot_size(&self) -> u32 {
        self.slot_size
    }

    /// The resource's schedule, holding every event of the grid.
    pub fn schedule(&self) -> &Schedule {
        &self.columns[0].schedule
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    /// Start of `slot`, as minutes since midnight. Slots past the end clamp
    /// to the grid end.
    pub fn slot_start_mins(&self, slot: usize) -> u32 {
        self.slots
            .get(slot)
            .map_or(self.end_mins, |s| s.start_mins)
    }

    /// The hour (0-23 within the grid date) in which `slot` starts.
    pub fn hour(&self, slot: usize) -> u32 {
        self.slot_start_mins(slot) / 60
    }

    /// Slots remaining in the event group containing `slot`, counting `slot`
    /// itself. Zero for an empty slot.
    pub fn slots_remaining_in_group(&self, slot: usize) -> usize {
        self.group_at(slot)
            .map(|g| g.start_slot + g.slots - slot)
            .unwrap_or(0)
    }

    /// The first slot whose `[start, start + slot size)` contains `minutes`.
    pub fn first_slot(&self, minutes: u32) -> Option<usize> {
        self.slots
            .iter()
            .take_while(|s| s.start_mins <= minutes)
            .position(|s| minutes < s.start_mins + self.slot_size)
    }

    /// The last slot whose `[start, start + slot size)` contains `minutes`.
    pub fn last_slot(&self, minutes: u32) -> Option<usize> {
        self.slots
            .iter()
            .rposition(|s| s.start_mins <= minutes && minutes < s.start_mins + self.slot_size)
    }

    fn group_at(&self, slot: usize) -> Option<&SlotGroup> {
        self.slots
            .get(slot)
            .and_then(|s| s.group)
            .map(|g| &self.groups[g])
    }
}

impl ScheduleGrid for SingleResourceGrid {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_size_minutes(&self) -> u32 {
        self.slot_size
    }

    fn start_time(&self) -> NaiveDateTime {
        at_minutes(self.date, self.start_mins)
    }

    fn end_time(&self) -> NaiveDateTime {
        at_minutes(self.date, self.end_mins)
    }

    fn slot_start_time(&self, slot: usize) -> NaiveDateTime {
        at_minutes(self.date, self.slot_start_mins(slot))
    }

    fn slot_for_time(&self, time: NaiveDateTime) -> usize {
        let mins = minutes_since(self.date, time);
        let started = self
            .slots
            .partition_point(|s| i64::from(s.start_mins) <= mins);
        started.saturating_sub(1)
    }

    fn event_at(&self, column: usize, slot: usize) -> Option<&Event> {
        if column != 0 {
            return None;
        }
        self.group_at(slot)
            .map(|g| &self.columns[0].schedule.events()[g.event])
    }

    fn availability_at(&self, column: usize, slot: usize) -> Availability {
        let Some(s) = self.slots.get(slot).filter(|_| column == 0) else {
            return Availability::Unavailable;
        };
        if s.group.is_some() {
            Availability::Busy
        } else if self.schedule().is_open(s.start_mins) {
            Availability::Free
        } else {
            Availability::Unavailable
        }
    }

    fn slots_spanned(&self, column: usize, slot: usize) -> usize {
        if column != 0 {
            return 0;
        }
        self.slots_remaining_in_group(slot)
    }
}
