//! Day-granularity grids for multi-day views.
//!
//! Each slot is one calendar day. Columns are allocated with the same
//! first-fit scan as [`MultiResourceGrid`](crate::MultiResourceGrid), but
//! conflicts are judged on the days an event occupies rather than its exact
//! times: once an event holds a day in a column, no other event of the
//! resource shares that day in that column.

use std::ops::Range;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::ResourceConfig;
use crate::event::Event;
use crate::grid::{partition_by_resource, Availability, BuildReport, ScheduleGrid};
use crate::schedule::{Column, Schedule};
use crate::time::{day_span, midnight, MINUTES_PER_DAY};

/// A grid with one slot per day over an inclusive date range.
#[derive(Debug, Clone)]
pub struct DayGrid {
    start_date: NaiveDate,
    end_date: NaiveDate,
    columns: Vec<Column>,
    resource_columns: Vec<(String, Range<usize>)>,
    report: BuildReport,
}

/// Day-slot range `[first, last)` of an event relative to `start_date`,
/// before clipping to the grid.
fn day_range(start_date: NaiveDate, event: &Event) -> (i64, i64) {
    let first = (event.start.date() - start_date).num_days();
    (first, first + day_span(event.start, event.end))
}

/// Build a day grid covering `start_date..=end_date`.
///
/// An `end_date` before `start_date` collapses the grid to the single day
/// `start_date`. Events that touch no day of the range are counted as out of
/// range; events partly inside are clipped to the grid.
pub fn build_day_grid(
    resources: &[ResourceConfig],
    events: &[Event],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> DayGrid {
    let end_date = if end_date < start_date {
        tracing::debug!(%start_date, %end_date, "day grid ends before it starts, collapsing to one day");
        start_date
    } else {
        end_date
    };
    let days = (end_date - start_date).num_days() + 1;

    let mut report = BuildReport::default();
    let partitioned = partition_by_resource(resources, events, &mut report);

    let mut columns: Vec<Column> = Vec::new();
    let mut resource_columns = Vec::with_capacity(resources.len());

    for (resource, events) in resources.iter().zip(partitioned) {
        let first = columns.len();
        columns.push(Column::primary(Schedule::new(resource)));

        for event in events {
            let (from, to) = day_range(start_date, &event);
            if to <= 0 || from >= days {
                tracing::debug!(event = %event.id, %start_date, %end_date, "event falls outside the day grid");
                report.outside_range += 1;
                continue;
            }

            let own = &mut columns[first..];
            let free = own.iter().position(|c| {
                !c.schedule
                    .has_intersecting_range(from, to, |e| day_range(start_date, e))
            });
            match free {
                Some(i) => own[i].schedule.add_event(event),
                None => {
                    let mut extra = own[0].schedule.empty_clone();
                    tracing::trace!(
                        resource = %resource.id,
                        event = %event.id,
                        "allocating synthetic day column"
                    );
                    extra.add_event(event);
                    columns.push(Column::synthetic(extra));
                }
            }
        }

        resource_columns.push((resource.id.clone(), first..columns.len()));
    }

    tracing::debug!(
        %start_date,
        %end_date,
        columns = columns.len(),
        "built day grid"
    );

    DayGrid {
        start_date,
        end_date,
        columns,
        resource_columns,
        report,
    }
}

impl DayGrid {
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the grid, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
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

    /// The calendar day of `slot`. Slots past the end clamp to the day after
    /// `end_date`.
    pub fn slot_date(&self, slot: usize) -> NaiveDate {
        let slot = slot.min(self.slot_count());
        self.start_date + Duration::days(slot as i64)
    }

    /// Number of day slots `event` occupies from `from_slot` to its last day
    /// inside the grid. Zero if the event ends before `from_slot`.
    pub fn slots_spanned_by(&self, event: &Event, from_slot: usize) -> usize {
        let (_, to) = day_range(self.start_date, event);
        let to = to.clamp(0, self.slot_count() as i64) as usize;
        to.saturating_sub(from_slot)
    }

    fn occupies(&self, event: &Event, slot: usize) -> bool {
        let (from, to) = day_range(self.start_date, event);
        let slot = slot as i64;
        from <= slot && slot < to
    }
}

impl ScheduleGrid for DayGrid {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn slot_count(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1) as usize
    }

    fn slot_size_minutes(&self) -> u32 {
        MINUTES_PER_DAY
    }

    fn start_time(&self) -> NaiveDateTime {
        midnight(self.start_date)
    }

    fn end_time(&self) -> NaiveDateTime {
        midnight(self.end_date + Duration::days(1))
    }

    fn slot_start_time(&self, slot: usize) -> NaiveDateTime {
        midnight(self.slot_date(slot))
    }

    fn slot_for_time(&self, time: NaiveDateTime) -> usize {
        let days = (time.date() - self.start_date).num_days();
        days.clamp(0, self.slot_count() as i64 - 1) as usize
    }

    fn event_at(&self, column: usize, slot: usize) -> Option<&Event> {
        if slot >= self.slot_count() {
            return None;
        }
        self.columns
            .get(column)?
            .events()
            .iter()
            .find(|e| self.occupies(e, slot))
    }

    fn availability_at(&self, column: usize, slot: usize) -> Availability {
        if column >= self.columns.len() || slot >= self.slot_count() {
            Availability::Unavailable
        } else if self.event_at(column, slot).is_some() {
            Availability::Busy
        } else {
            Availability::Free
        }
    }

    fn slots_spanned(&self, column: usize, slot: usize) -> usize {
        self.event_at(column, slot)
            .map(|e| self.slots_spanned_by(e, slot))
            .unwrap_or(0)
    }
}
