//! A clipped, read-only window onto a built grid.
//!
//! [`GridView`] re-bases slot indices so that the first slot intersecting the
//! requested window is slot 0. It stores nothing but the window and borrows
//! the underlying grid for every query.

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::grid::{Availability, ScheduleGrid};
use crate::schedule::Column;

/// A sub-range of a grid's time span.
#[derive(Debug)]
pub struct GridView<'a, G: ScheduleGrid + ?Sized> {
    grid: &'a G,
    start: NaiveDateTime,
    end: NaiveDateTime,
    first_slot: usize,
    slot_count: usize,
}

impl<G: ScheduleGrid + ?Sized> Clone for GridView<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ScheduleGrid + ?Sized> Copy for GridView<'_, G> {}

impl<'a, G: ScheduleGrid + ?Sized> GridView<'a, G> {
    /// View the slots of `grid` intersecting `[requested_start, requested_end)`.
    ///
    /// The window is clamped to the grid's own range. A window that does not
    /// overlap the grid at all collapses to zero length.
    pub fn new(grid: &'a G, requested_start: NaiveDateTime, requested_end: NaiveDateTime) -> Self {
        let end = requested_end.min(grid.end_time());
        let start = requested_start.max(grid.start_time()).min(end);

        let first_slot = grid.slot_for_time(start);
        let slot_count = if start == end || grid.slot_count() == 0 {
            0
        } else {
            let last = grid.slot_for_time(end);
            let end_slot = if grid.slot_start_time(last) < end {
                last + 1
            } else {
                last
            };
            end_slot.saturating_sub(first_slot)
        };

        Self {
            grid,
            start,
            end,
            first_slot,
            slot_count,
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'a G {
        self.grid
    }

    /// Index in the underlying grid of this view's slot 0.
    pub fn first_slot(&self) -> usize {
        self.first_slot
    }

    pub fn is_empty(&self) -> bool {
        self.slot_count == 0
    }

    fn inner_slot(&self, slot: usize) -> Option<usize> {
        (slot < self.slot_count).then(|| self.first_slot + slot)
    }
}

impl<G: ScheduleGrid + ?Sized> ScheduleGrid for GridView<'_, G> {
    fn columns(&self) -> &[Column] {
        self.grid.columns()
    }

    fn slot_count(&self) -> usize {
        self.slot_count
    }

    fn slot_size_minutes(&self) -> u32 {
        self.grid.slot_size_minutes()
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start
    }

    fn end_time(&self) -> NaiveDateTime {
        self.end
    }

    fn slot_start_time(&self, slot: usize) -> NaiveDateTime {
        let slot = slot.min(self.slot_count);
        self.grid.slot_start_time(self.first_slot + slot)
    }

    fn slot_for_time(&self, time: NaiveDateTime) -> usize {
        let time = time.clamp(self.start, self.end);
        self.grid
            .slot_for_time(time)
            .saturating_sub(self.first_slot)
            .min(self.slot_count.saturating_sub(1))
    }

    fn event_at(&self, column: usize, slot: usize) -> Option<&Event> {
        self.grid.event_at(column, self.inner_slot(slot)?)
    }

    fn availability_at(&self, column: usize, slot: usize) -> Availability {
        match self.inner_slot(slot) {
            Some(inner) => self.grid.availability_at(column, inner),
            None => Availability::Unavailable,
        }
    }

    fn slots_spanned(&self, column: usize, slot: usize) -> usize {
        match self.inner_slot(slot) {
            Some(inner) => self
                .grid
                .slots_spanned(column, inner)
                .min(self.slot_count - slot),
            None => 0,
        }
    }
}
