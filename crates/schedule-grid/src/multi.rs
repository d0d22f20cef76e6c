//! Multi-resource grids: overlapping events get extra columns.
//!
//! Column allocation is a greedy interval-graph coloring. Each resource's
//! events are visited in start order and placed in the first of that
//! resource's columns holding no intersecting event; when every column
//! conflicts, a synthetic column is appended after the resource's existing
//! ones. Intersection is judged on [`Event::placement`], which is the raw
//! interval except that a zero-length event claims its whole slot. Visiting
//! events in start order makes the first-fit scan optimal: a resource ends
//! up with exactly as many columns as the largest number of its events
//! overlapping at one instant.
//!
//! Columns live in a single arena, and each resource records the contiguous
//! index range of its columns.

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::ResourceConfig;
use crate::event::Event;
use crate::grid::{partition_by_resource, retain_on_date, Availability, BuildReport, ScheduleGrid};
use crate::schedule::{Column, Schedule};
use crate::time::{at_minutes, minutes_since, slot_minutes, DEFAULT_END_MINS, DEFAULT_SLOT_SIZE, DEFAULT_START_MINS};

/// A grid of one or more resources, each expanded to as many columns as its
/// double bookings require.
#[derive(Debug, Clone)]
pub struct MultiResourceGrid {
    date: NaiveDate,
    start_mins: u32,
    end_mins: u32,
    slot_size: u32,
    columns: Vec<Column>,
    resource_columns: Vec<(String, Range<usize>)>,
    report: BuildReport,
}

/// Build a grid for `resources` on `date`, resolving overlaps with extra
/// columns.
///
/// The slot size is the smallest slot size among the resources, so that no
/// resource is displayed coarser than it is configured. The bounds cover
/// every resource's operating hours, widened to whole slots around any event
/// outside them.
pub fn build_multi_resource(
    resources: &[ResourceConfig],
    events: &[Event],
    date: NaiveDate,
) -> MultiResourceGrid {
    let mut report = BuildReport::default();
    let mut partitioned = partition_by_resource(resources, events, &mut report);
    for list in &mut partitioned {
        retain_on_date(list, date, &mut report);
    }

    let schedules: Vec<Schedule> = resources.iter().map(Schedule::new).collect();
    let slot_size = schedules
        .iter()
        .map(|s| s.slot_size)
        .min()
        .unwrap_or(DEFAULT_SLOT_SIZE);
    for list in &mut partitioned {
        list.sort_by_key(|e| e.placement(slot_size).0);
    }

    let (mut start_mins, mut end_mins) = match (
        schedules.iter().map(|s| s.start_mins).min(),
        schedules.iter().map(|s| s.end_mins).max(),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => (DEFAULT_START_MINS, DEFAULT_END_MINS),
    };
    for event in partitioned.iter().flatten() {
        let (from, to) = event.placement(slot_size);
        start_mins = start_mins.min(slot_minutes(date, from, slot_size, false));
        end_mins = end_mins.max(slot_minutes(date, to, slot_size, true));
    }

    let mut columns: Vec<Column> = Vec::new();
    let mut resource_columns = Vec::with_capacity(resources.len());

    for (schedule, events) in schedules.into_iter().zip(partitioned) {
        let first = columns.len();
        let resource_id = schedule.resource_id.clone();
        columns.push(Column::primary(schedule));

        for event in events {
            let (from, to) = event.placement(slot_size);
            let own = &mut columns[first..];
            match own.iter().position(|c| {
                !c.schedule
                    .has_intersecting_range(from, to, |e| e.placement(slot_size))
            }) {
                Some(i) => own[i].schedule.add_event(event),
                None => {
                    let mut extra = own[0].schedule.empty_clone();
                    tracing::trace!(
                        resource = %resource_id,
                        event = %event.id,
                        column = columns.len() - first,
                        "allocating synthetic column"
                    );
                    extra.add_event(event);
                    columns.push(Column::synthetic(extra));
                }
            }
        }

        resource_columns.push((resource_id, first..columns.len()));
    }

    tracing::debug!(
        %date,
        resources = resources.len(),
        columns = columns.len(),
        slot_size,
        "built multi-resource grid"
    );

    MultiResourceGrid {
        date,
        start_mins,
        end_mins,
        slot_size,
        columns,
        resource_columns,
        report,
    }
}

impl MultiResourceGrid {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Grid start, as minutes since midnight.
    pub fn start_mins(&self) -> u32 {
        self.start_mins
    }

    /// Grid end, as minutes since midnight.
    pub fn end_mins(&self) -> u32 {
        self.end_mins
    }

    pub fn slot_size(&self) -> u32 {
        self.slot_size
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    /// The column index range allocated to a resource.
    pub fn resource_columns(&self, resource_id: &str) -> Option<Range<usize>> {
        self.resource_columns
            .iter()
            .find(|(id, _)| id == resource_id)
            .map(|(_, range)| range.clone())
    }

    /// Resource ids with their column ranges, in resource order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, Range<usize>)> {
        self.resource_columns
            .iter()
            .map(|(id, range)| (id.as_str(), range.clone()))
    }

    /// Start of `slot`, as minutes since midnight. Slots past the end clamp
    /// to the boundary after the final slot.
    pub fn slot_start_mins(&self, slot: usize) -> u32 {
        let slot = slot.min(self.slot_count()) as u32;
        self.start_mins + slot * self.slot_size
    }

    /// The hour in which `slot` starts.
    pub fn hour(&self, slot: usize) -> u32 {
        self.slot_start_mins(slot) / 60
    }

    /// The slot boundary at or after `time`, clamped to `0..=slot_count`.
    fn end_slot(&self, time: NaiveDateTime) -> usize {
        let mins = slot_minutes(self.date, time, self.slot_size, true);
        let slots = mins.saturating_sub(self.start_mins).div_ceil(self.slot_size) as usize;
        slots.min(self.slot_count())
    }
}

impl ScheduleGrid for MultiResourceGrid {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn slot_count(&self) -> usize {
        (self.end_mins - self.start_mins).div_ceil(self.slot_size) as usize
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
        let mins = minutes_since(self.date, time) - i64::from(self.start_mins);
        if mins <= 0 {
            return 0;
        }
        let slot = (mins / i64::from(self.slot_size)) as usize;
        slot.min(self.slot_count().saturating_sub(1))
    }

    fn event_at(&self, column: usize, slot: usize) -> Option<&Event> {
        if slot >= self.slot_count() {
            return None;
        }
        let time = self.slot_start_time(slot);
        self.columns
            .get(column)?
            .schedule
            .event_at(time, self.slot_size, slot == 0)
    }

    fn availability_at(&self, column: usize, slot: usize) -> Availability {
        let Some(col) = self.columns.get(column) else {
            return Availability::Unavailable;
        };
        if slot >= self.slot_count() {
            return Availability::Unavailable;
        }
        if self.event_at(column, slot).is_some() {
            Availability::Busy
        } else if col.schedule.is_open(self.slot_start_mins(slot)) {
            Availability::Free
        } else {
            Availability::Unavailable
        }
    }

    fn slots_spanned(&self, column: usize, slot: usize) -> usize {
        match self.event_at(column, slot) {
            Some(event) => self.end_slot(event.end).saturating_sub(slot).max(1),
            None => 0,
        }
    }
}
