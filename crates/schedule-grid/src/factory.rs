//! Choosing and building the right grid shape for a request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ResourceConfig;
use crate::day::build_day_grid;
use crate::event::Event;
use crate::grid::{touches_date, Grid};
use crate::multi::build_multi_resource;
use crate::overlap::has_overlapping_events;
use crate::single::build_single_resource;

/// Shape of a one-day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridShape {
    /// A single column when there is one resource without double bookings,
    /// otherwise one or more columns per resource.
    #[default]
    Auto,
    /// Always linearize into one column (first resource only).
    Single,
    /// Always allocate columns per resource.
    Multi,
}

/// What to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridRequest {
    /// A minute-granularity grid for one date.
    Day { date: NaiveDate, shape: GridShape },
    /// A day-granularity grid over an inclusive date range.
    Days { start: NaiveDate, end: NaiveDate },
}

impl GridRequest {
    /// A one-day grid with automatic shape selection.
    pub fn day(date: NaiveDate) -> Self {
        GridRequest::Day {
            date,
            shape: GridShape::Auto,
        }
    }

    pub fn days(start: NaiveDate, end: NaiveDate) -> Self {
        GridRequest::Days { start, end }
    }
}

/// Build a grid for `resources` from a snapshot of `events`.
///
/// With [`GridShape::Auto`], exactly one resource whose events on the date
/// never intersect yields a [`Grid::Single`]; anything else yields a
/// [`Grid::Multi`], so that double bookings show side by side.
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_grid::{build_grid, Event, Grid, GridRequest, ResourceConfig, ScheduleGrid};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let at = |h, m| date.and_hms_opt(h, m, 0).unwrap();
/// let resources = vec![ResourceConfig::with_defaults("room-1")];
/// let events = vec![
///     Event::new("a", "room-1", at(9, 0), at(9, 30)),
///     Event::new("b", "room-1", at(9, 15), at(9, 45)),
/// ];
///
/// let grid = build_grid(&resources, &events, &GridRequest::day(date));
/// assert!(matches!(grid, Grid::Multi(_)));
/// assert_eq!(grid.column_count(), 2);
/// ```
pub fn build_grid(resources: &[ResourceConfig], events: &[Event], request: &GridRequest) -> Grid {
    match *request {
        GridRequest::Day { date, shape } => {
            let single = match shape {
                GridShape::Single => !resources.is_empty(),
                GridShape::Multi => false,
                GridShape::Auto => match resources {
                    [resource] => !resource_has_overlaps(resource, events, date),
                    _ => false,
                },
            };
            tracing::debug!(%date, ?shape, single, "selected grid shape");
            match resources {
                [first, ..] if single => Grid::Single(build_single_resource(first, events, date)),
                _ => Grid::Multi(build_multi_resource(resources, events, date)),
            }
        }
        GridRequest::Days { start, end } => Grid::Day(build_day_grid(resources, events, start, end)),
    }
}

/// Whether the resource's events on `date` overlap. Bookings on other dates
/// never reach the grid and do not count.
fn resource_has_overlaps(resource: &ResourceConfig, events: &[Event], date: NaiveDate) -> bool {
    let own: Vec<Event> = events
        .iter()
        .filter(|e| e.resource_id == resource.id && touches_date(e, date))
        .cloned()
        .collect();
    has_overlapping_events(&own)
}
