//! # schedule-grid
//!
//! Calendar grid construction for resource schedules.
//!
//! Given a snapshot of bookings ([`Event`]s) for bookable resources, the
//! engine builds a dense `columns × slots` grid ready for rendering a day or
//! multi-day calendar. Double-booked resources are resolved either by
//! allocating extra display columns (interval-graph coloring) or, when only
//! one column is wanted, by laying overlapping bookings end to end.
//!
//! Grids are immutable once built. A changed event set means building a new
//! grid; a built grid can be shared freely between readers.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use schedule_grid::{build_grid, Availability, Event, GridRequest, ResourceConfig, ScheduleGrid};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let at = |h, m| date.and_hms_opt(h, m, 0).unwrap();
//!
//! let resources = vec![ResourceConfig::new("consult-1", 8 * 60, 18 * 60, 15).unwrap()];
//! let events = vec![Event::new("appt-1", "consult-1", at(9, 0), at(9, 30))];
//!
//! let grid = build_grid(&resources, &events, &GridRequest::day(date));
//! let slot = grid.slot_for_time(at(9, 0));
//! assert_eq!(grid.availability_at(0, slot), Availability::Busy);
//! assert_eq!(grid.slots_spanned(0, slot), 2);
//! ```
//!
//! ## Modules
//!
//! - [`single`]: one resource, overlaps linearized into one column
//! - [`multi`]: one or more resources, overlaps resolved with extra columns
//! - [`day`]: one slot per day for multi-day views
//! - [`view`]: clip a built grid to a time window
//! - [`factory`]: pick the grid shape for a request
//! - [`free`]: free-slot runs over any grid
//! - [`overlap`]: overlap detection within an event list
//! - [`schedule`], [`event`], [`config`]: the data model
//! - [`time`]: slot arithmetic
//! - [`error`]: Error types

pub mod config;
pub mod day;
pub mod error;
pub mod event;
pub mod factory;
pub mod free;
pub mod grid;
pub mod multi;
pub mod overlap;
pub mod schedule;
pub mod single;
pub mod time;
pub mod view;

pub use config::{load_resources, ResourceConfig};
pub use day::{build_day_grid, DayGrid};
pub use error::GridError;
pub use event::Event;
pub use factory::{build_grid, GridRequest, GridShape};
pub use free::{first_free_run, first_free_run_any, free_runs, FreeRun};
pub use grid::{Availability, BuildReport, Grid, ScheduleGrid};
pub use multi::{build_multi_resource, MultiResourceGrid};
pub use overlap::{find_overlaps, has_overlapping_events, max_concurrent, max_concurrent_on_slots};
pub use schedule::{Column, Schedule};
pub use single::{build_single_resource, SingleResourceGrid};
pub use view::GridView;
