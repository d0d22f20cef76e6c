//! Find runs of free slots in a built grid.
//!
//! Walks a column slot by slot, collecting maximal runs of
//! [`Availability::Free`] cells. Works on any [`ScheduleGrid`], including a
//! clipped [`GridView`](crate::GridView).

use chrono::NaiveDateTime;

use crate::grid::{Availability, ScheduleGrid};

/// A maximal run of free slots in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeRun {
    pub column: usize,
    pub first_slot: usize,
    pub slots: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// All free runs in `column`, in slot order.
pub fn free_runs<G: ScheduleGrid + ?Sized>(grid: &G, column: usize) -> Vec<FreeRun> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for slot in 0..=grid.slot_count() {
        let free = slot < grid.slot_count() && grid.availability_at(column, slot) == Availability::Free;
        match (free, run_start) {
            (true, None) => run_start = Some(slot),
            (false, Some(first)) => {
                runs.push(FreeRun {
                    column,
                    first_slot: first,
                    slots: slot - first,
                    start: grid.slot_start_time(first),
                    end: grid.slot_start_time(slot),
                });
                run_start = None;
            }
            _ => {}
        }
    }

    runs
}

/// The first free run in `column` at least `min_slots` long.
pub fn first_free_run<G: ScheduleGrid + ?Sized>(
    grid: &G,
    column: usize,
    min_slots: usize,
) -> Option<FreeRun> {
    free_runs(grid, column)
        .into_iter()
        .find(|run| run.slots >= min_slots)
}

/// The earliest-starting free run of at least `min_slots` across all
/// columns. Ties go to the leftmost column.
pub fn first_free_run_any<G: ScheduleGrid + ?Sized>(grid: &G, min_slots: usize) -> Option<FreeRun> {
    (0..grid.column_count())
        .filter_map(|column| first_free_run(grid, column, min_slots))
        .min_by_key(|run| (run.first_slot, run.column))
}
