//! The read-only grid surface shared by every grid shape.
//!
//! A grid is a dense `columns × slots` matrix. Each column is backed by a
//! [`Schedule`](crate::Schedule); each slot is a half-open time interval
//! addressed by index. Availability is derived on demand, never stored.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::ResourceConfig;
use crate::day::DayGrid;
use crate::event::Event;
use crate::multi::MultiResourceGrid;
use crate::schedule::Column;
use crate::single::SingleResourceGrid;
use crate::time::midnight;

/// Availability of one cell of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Open and unbooked.
    Free,
    /// An event occupies the slot.
    Busy,
    /// The slot lies outside the column's operating hours.
    Unavailable,
}

/// Events left out of a grid while building it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Events whose resource was not among the supplied resources.
    pub skipped_unknown_resource: usize,
    /// Events that fall entirely outside the grid's date range.
    pub outside_range: usize,
}

impl BuildReport {
    /// Total number of events excluded from the grid.
    pub fn skipped(&self) -> usize {
        self.skipped_unknown_resource + self.outside_range
    }
}

/// Read-only queries over a constructed grid.
///
/// Slot and column indices outside the grid never panic: lookups return
/// `None`, availability is [`Availability::Unavailable`] and counts are 0.
pub trait ScheduleGrid {
    /// The columns, in display order.
    fn columns(&self) -> &[Column];

    fn column_count(&self) -> usize {
        self.columns().len()
    }

    fn slot_count(&self) -> usize;

    /// Slot length in minutes (1440 for day grids).
    fn slot_size_minutes(&self) -> u32;

    /// Start of the first slot.
    fn start_time(&self) -> NaiveDateTime;

    /// End of the grid's time range.
    fn end_time(&self) -> NaiveDateTime;

    /// The time at which `slot` starts. Indices at or past `slot_count()`
    /// give the end of the final slot.
    fn slot_start_time(&self, slot: usize) -> NaiveDateTime;

    /// The slot containing `time`. Times before the grid map to slot 0 and
    /// times after it map to the final slot.
    fn slot_for_time(&self, time: NaiveDateTime) -> usize;

    /// The event occupying a cell, if any.
    fn event_at(&self, column: usize, slot: usize) -> Option<&Event>;

    fn availability_at(&self, column: usize, slot: usize) -> Availability;

    /// Number of consecutive [`Availability::Unavailable`] slots starting at
    /// `slot` in `column`.
    fn unavailable_run_length(&self, column: usize, slot: usize) -> usize {
        (slot..self.slot_count())
            .take_while(|&s| self.availability_at(column, s) == Availability::Unavailable)
            .count()
    }

    /// Number of slots the event at `(column, slot)` occupies from `slot`
    /// onward, or 0 if the cell is empty.
    fn slots_spanned(&self, column: usize, slot: usize) -> usize;
}

/// A constructed grid of any shape.
#[derive(Debug, Clone)]
pub enum Grid {
    Single(SingleResourceGrid),
    Multi(MultiResourceGrid),
    Day(DayGrid),
}

impl Grid {
    /// Events excluded while building the grid.
    pub fn report(&self) -> BuildReport {
        match self {
            Grid::Single(grid) => grid.report(),
            Grid::Multi(grid) => grid.report(),
            Grid::Day(grid) => grid.report(),
        }
    }

    fn inner(&self) -> &dyn ScheduleGrid {
        match self {
            Grid::Single(grid) => grid,
            Grid::Multi(grid) => grid,
            Grid::Day(grid) => grid,
        }
    }
}

impl ScheduleGrid for Grid {
    fn columns(&self) -> &[Column] {
        self.inner().columns()
    }

    fn slot_count(&self) -> usize {
        self.inner().slot_count()
    }

    fn slot_size_minutes(&self) -> u32 {
        self.inner().slot_size_minutes()
    }

    fn start_time(&self) -> NaiveDateTime {
        self.inner().start_time()
    }

    fn end_time(&self) -> NaiveDateTime {
        self.inner().end_time()
    }

    fn slot_start_time(&self, slot: usize) -> NaiveDateTime {
        self.inner().slot_start_time(slot)
    }

    fn slot_for_time(&self, time: NaiveDateTime) -> usize {
        self.inner().slot_for_time(time)
    }

    fn event_at(&self, column: usize, slot: usize) -> Option<&Event> {
        self.inner().event_at(column, slot)
    }

    fn availability_at(&self, column: usize, slot: usize) -> Availability {
        self.inner().availability_at(column, slot)
    }

    fn unavailable_run_length(&self, column: usize, slot: usize) -> usize {
        self.inner().unavailable_run_length(column, slot)
    }

    fn slots_spanned(&self, column: usize, slot: usize) -> usize {
        self.inner().slots_spanned(column, slot)
    }
}

/// Whether `event` touches `date`. A zero-length event touches the date its
/// instant falls on.
pub(crate) fn touches_date(event: &Event, date: NaiveDate) -> bool {
    let day_start = midnight(date);
    let day_end = day_start + Duration::days(1);
    event.start < day_end && (event.end > day_start || event.start >= day_start)
}

/// Drop events that do not touch `date`, counting them in `report`.
pub(crate) fn retain_on_date(events: &mut Vec<Event>, date: NaiveDate, report: &mut BuildReport) {
    events.retain(|e| {
        let on_date = touches_date(e, date);
        if !on_date {
            tracing::debug!(event = %e.id, %date, "event falls outside the grid date");
            report.outside_range += 1;
        }
        on_date
    });
}

/// Split `events` into one list per resource, in resource order, each sorted
/// by start time. Events for unknown resources are counted in `report`.
pub(crate) fn partition_by_resource(
    resources: &[ResourceConfig],
    events: &[Event],
    report: &mut BuildReport,
) -> Vec<Vec<Event>> {
    // a repeated resource id keeps its first position
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, resource) in resources.iter().enumerate() {
        index.entry(resource.id.as_str()).or_insert(i);
    }

    let mut partitioned: Vec<Vec<Event>> = vec![Vec::new(); resources.len()];
    for event in events {
        match index.get(event.resource_id.as_str()) {
            Some(&i) => partitioned[i].push(event.clone()),
            None => {
                tracing::debug!(
                    event = %event.id,
                    resource = %event.resource_id,
                    "skipping event for unknown resource"
                );
                report.skipped_unknown_resource += 1;
            }
        }
    }

    for list in &mut partitioned {
        // stable, so events starting together keep their input order
        list.sort_by_key(|e| e.start);
    }
    partitioned
}
