//! Tests for multi-resource column allocation.

use chrono::{NaiveDate, NaiveDateTime};
use schedule_grid::{
    build_multi_resource, max_concurrent, max_concurrent_on_slots, Availability, Event,
    ResourceConfig, ScheduleGrid,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

fn at(hour: u32, min: u32) -> NaiveDateTime {
    date().and_hms_opt(hour, min, 0).unwrap()
}

fn event(id: &str, resource: &str, start: (u32, u32), end: (u32, u32)) -> Event {
    Event::new(id, resource, at(start.0, start.1), at(end.0, end.1))
}

fn resource(id: &str) -> ResourceConfig {
    ResourceConfig::new(id, 8 * 60, 18 * 60, 15).unwrap()
}

fn column_ids<G: ScheduleGrid>(grid: &G, column: usize) -> Vec<&str> {
    grid.columns()[column]
        .events()
        .iter()
        .map(|e| e.id.as_str())
        .collect()
}

#[test]
fn two_way_overlap_allocates_a_second_column() {
    let events = vec![
        event("a", "room-1", (9, 0), (9, 30)),
        event("b", "room-1", (9, 15), (9, 45)),
    ];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    assert_eq!(grid.column_count(), 2);
    assert_eq!(column_ids(&grid, 0), vec!["a"]);
    assert_eq!(column_ids(&grid, 1), vec!["b"]);
    assert!(!grid.columns()[0].synthetic);
    assert!(grid.columns()[1].synthetic);
    assert_eq!(grid.columns()[1].resource_id(), "room-1");
    assert_eq!(grid.resource_columns("room-1"), Some(0..2));

    // b keeps its wall-clock position in its own column
    assert_eq!(grid.event_at(1, 5).map(|e| e.id.as_str()), Some("b"));
    assert_eq!(grid.event_at(1, 6).map(|e| e.id.as_str()), Some("b"));
    assert_eq!(grid.availability_at(1, 4), Availability::Free);
    assert_eq!(grid.availability_at(0, 6), Availability::Free);
}

#[test]
fn first_fit_reuses_earlier_columns() {
    let events = vec![
        event("a", "room-1", (9, 0), (10, 0)),
        event("b", "room-1", (9, 30), (10, 30)),
        event("c", "room-1", (10, 0), (11, 0)),
        event("d", "room-1", (10, 15), (10, 45)),
    ];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    // c fits back into column 0 once a ends; d conflicts with b and c.
    assert_eq!(grid.column_count(), 3);
    assert_eq!(column_ids(&grid, 0), vec!["a", "c"]);
    assert_eq!(column_ids(&grid, 1), vec!["b"]);
    assert_eq!(column_ids(&grid, 2), vec!["d"]);
    assert_eq!(max_concurrent(&events), 3);
}

#[test]
fn resources_keep_contiguous_columns_in_resource_order() {
    let events = vec![
        event("s1", "surgery", (9, 0), (10, 0)),
        event("c1", "consult", (9, 0), (9, 30)),
        event("s2", "surgery", (9, 30), (10, 30)),
        event("c2", "consult", (9, 0), (9, 30)),
        event("c3", "consult", (9, 0), (9, 30)),
    ];
    let resources = vec![resource("consult"), resource("surgery")];
    let grid = build_multi_resource(&resources, &events, date());

    assert_eq!(grid.resource_columns("consult"), Some(0..3));
    assert_eq!(grid.resource_columns("surgery"), Some(3..5));
    assert_eq!(grid.resource_columns("unknown"), None);
    assert_eq!(column_ids(&grid, 3), vec!["s1"]);
    assert_eq!(column_ids(&grid, 4), vec!["s2"]);

    let order: Vec<&str> = grid.resources().map(|(id, _)| id).collect();
    assert_eq!(order, vec!["consult", "surgery"]);
}

#[test]
fn resource_without_events_keeps_one_empty_column() {
    let events = vec![event("a", "room-1", (9, 0), (9, 30))];
    let grid = build_multi_resource(&[resource("room-1"), resource("room-2")], &events, date());

    assert_eq!(grid.column_count(), 2);
    assert!(grid.columns()[1].events().is_empty());
    assert_eq!(grid.availability_at(1, 4), Availability::Free);
}

#[test]
fn shared_slot_size_is_the_finest_resource() {
    let resources = vec![
        ResourceConfig::new("coarse", 8 * 60, 18 * 60, 30).unwrap(),
        ResourceConfig::new("fine", 8 * 60, 18 * 60, 10).unwrap(),
    ];
    let grid = build_multi_resource(&resources, &[], date());

    assert_eq!(grid.slot_size(), 10);
    assert_eq!(grid.slot_count(), 60);
    // the coarse resource keeps its own schedule slot size
    assert_eq!(grid.columns()[0].schedule.slot_size, 30);
}

#[test]
fn bounds_cover_every_resource_and_event() {
    let resources = vec![
        ResourceConfig::new("early", 7 * 60, 12 * 60, 15).unwrap(),
        ResourceConfig::new("late", 12 * 60, 20 * 60, 15).unwrap(),
    ];
    let events = vec![event("night", "late", (20, 10), (20, 50))];
    let grid = build_multi_resource(&resources, &events, date());

    assert_eq!(grid.start_mins(), 7 * 60);
    assert_eq!(grid.end_mins(), 21 * 60);
    assert_eq!(grid.slot_count(), 56);

    // early is closed in the afternoon, late is closed in the morning
    let afternoon = grid.slot_for_time(at(14, 0));
    assert_eq!(grid.availability_at(0, afternoon), Availability::Unavailable);
    assert_eq!(grid.availability_at(1, afternoon), Availability::Free);
    assert_eq!(grid.availability_at(1, 0), Availability::Unavailable);
    assert_eq!(grid.unavailable_run_length(1, 0), 20, "07:00-12:00");

    let night = grid.slot_for_time(at(20, 10));
    assert_eq!(grid.availability_at(1, night), Availability::Busy);
}

#[test]
fn slots_spanned_counts_to_the_event_end() {
    let events = vec![event("a", "room-1", (9, 0), (10, 5))];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    let start = grid.slot_for_time(at(9, 0));
    assert_eq!(grid.slots_spanned(0, start), 5, "10:05 rounds up to 10:15");
    assert_eq!(grid.slots_spanned(0, start + 2), 3);
    assert_eq!(grid.slots_spanned(0, start + 5), 0);
}

#[test]
fn slot_time_conversions_clamp() {
    let grid = build_multi_resource(&[resource("room-1")], &[], date());

    assert_eq!(grid.slot_start_time(0), at(8, 0));
    assert_eq!(grid.slot_start_time(4), at(9, 0));
    assert_eq!(grid.slot_for_time(at(9, 7)), 4);
    assert_eq!(grid.slot_for_time(at(5, 0)), 0);
    assert_eq!(grid.slot_for_time(at(23, 59)), 39);
    assert_eq!(grid.hour(4), 9);
}

#[test]
fn out_of_range_queries_do_not_panic() {
    let events = vec![event("a", "room-1", (9, 0), (9, 30))];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    assert!(grid.event_at(5, 4).is_none());
    assert!(grid.event_at(0, 400).is_none());
    assert_eq!(grid.availability_at(5, 4), Availability::Unavailable);
    assert_eq!(grid.availability_at(0, 400), Availability::Unavailable);
    assert_eq!(grid.unavailable_run_length(0, 400), 0);
    assert_eq!(grid.slots_spanned(5, 4), 0);
}

#[test]
fn unknown_resources_are_counted_not_fatal() {
    let events = vec![
        event("a", "room-1", (9, 0), (9, 30)),
        event("x", "room-9", (9, 0), (9, 30)),
        event("y", "room-9", (10, 0), (10, 30)),
    ];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    assert_eq!(grid.report().skipped_unknown_resource, 2);
    assert_eq!(grid.column_count(), 1);
}

#[test]
fn no_resources_builds_an_empty_default_grid() {
    let grid = build_multi_resource(&[], &[], date());

    assert_eq!(grid.column_count(), 0);
    assert_eq!(grid.start_mins(), 8 * 60);
    assert_eq!(grid.end_mins(), 18 * 60);
    assert_eq!(grid.slot_size(), 15);
}

#[test]
fn zero_length_events_claim_their_slot() {
    // an inverted booking clamps to zero length at 09:00
    let events = vec![
        event("z1", "room-1", (9, 0), (8, 0)),
        event("z2", "room-1", (9, 0), (9, 0)),
        event("a", "room-1", (9, 0), (9, 30)),
    ];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    assert_eq!(grid.column_count(), 3, "no two of them can share the 09:00 cell");
    assert_eq!(max_concurrent_on_slots(&events, 15), 3);
    assert_eq!(column_ids(&grid, 0), vec!["z1"]);
    assert_eq!(column_ids(&grid, 1), vec!["z2"]);
    assert_eq!(column_ids(&grid, 2), vec!["a"]);

    let nine = grid.slot_for_time(at(9, 0));
    assert_eq!(grid.event_at(0, nine).map(|e| e.id.as_str()), Some("z1"));
    assert_eq!(grid.event_at(1, nine).map(|e| e.id.as_str()), Some("z2"));
    assert_eq!(grid.event_at(2, nine).map(|e| e.id.as_str()), Some("a"));
    assert_eq!(grid.slots_spanned(0, nine), 1);
    assert_eq!(grid.slots_spanned(2, nine), 2, "a keeps its full span");
}

#[test]
fn zero_length_event_conflicts_within_its_slot_only() {
    let events = vec![
        event("z", "room-1", (9, 5), (9, 5)),
        event("a", "room-1", (9, 10), (9, 30)),
        event("b", "room-1", (9, 15), (9, 45)),
    ];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    // z shares the 09:00 slot with a, but b starts in the next slot.
    assert_eq!(column_ids(&grid, 0), vec!["z", "b"]);
    assert_eq!(column_ids(&grid, 1), vec!["a"]);
    assert_eq!(max_concurrent(&events), 2);
    assert_eq!(max_concurrent_on_slots(&events, 15), 2);
    assert_eq!(grid.event_at(0, grid.slot_for_time(at(9, 0))).map(|e| e.id.as_str()), Some("z"));
}

#[test]
fn zero_length_event_at_closing_time_widens_the_grid() {
    let events = vec![event("late", "room-1", (18, 0), (18, 0))];
    let grid = build_multi_resource(&[resource("room-1")], &events, date());

    assert_eq!(grid.end_mins(), 18 * 60 + 15);
    let last = grid.slot_count() - 1;
    assert_eq!(grid.event_at(0, last).map(|e| e.id.as_str()), Some("late"));
}
