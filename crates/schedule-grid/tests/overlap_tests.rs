//! Tests for overlap detection within one booking list.

use chrono::NaiveDate;
use schedule_grid::{
    find_overlaps, has_overlapping_events, max_concurrent, max_concurrent_on_slots, Event,
};

/// Helper to create an Event from hour ranges on a given day.
fn event(id: &str, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Event {
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    Event::new(
        id,
        "room-1",
        day.and_hms_opt(start_hour, start_min, 0).unwrap(),
        day.and_hms_opt(end_hour, end_min, 0).unwrap(),
    )
}

#[test]
fn two_overlapping_events_detected() {
    // 09:00-10:00 and 09:30-10:30 → 30-min overlap
    let events = vec![event("a", 9, 0, 10, 0), event("b", 9, 30, 10, 30)];

    let overlaps = find_overlaps(&events);

    assert_eq!(overlaps.len(), 1, "should detect exactly one overlap");
    assert_eq!(overlaps[0].overlap_minutes, 30);
    assert_eq!(overlaps[0].event_a.id, "a");
    assert_eq!(overlaps[0].event_b.id, "b");
    assert!(has_overlapping_events(&events));
}

#[test]
fn adjacent_events_not_an_overlap() {
    // 09:00-10:00 and 10:00-11:00 → adjacent, NOT overlapping
    let events = vec![event("a", 9, 0, 10, 0), event("b", 10, 0, 11, 0)];

    assert!(
        find_overlaps(&events).is_empty(),
        "adjacent events (end == start) should not overlap"
    );
    assert!(!has_overlapping_events(&events));
    assert_eq!(max_concurrent(&events), 1);
}

#[test]
fn fully_contained_event_correct_overlap() {
    // 09:00-12:00 contains 10:00-11:00
    let events = vec![event("a", 9, 0, 12, 0), event("b", 10, 0, 11, 0)];

    let overlaps = find_overlaps(&events);

    assert_eq!(overlaps.len(), 1);
    assert_eq!(
        overlaps[0].overlap_minutes, 60,
        "overlap should be the duration of the smaller event"
    );
}

#[test]
fn max_concurrent_counts_the_largest_simultaneous_group() {
    // a overlaps b and c, but b and c do not overlap each other.
    let events = vec![
        event("a", 9, 0, 12, 0),
        event("b", 9, 30, 10, 0),
        event("c", 10, 0, 11, 0),
    ];
    assert_eq!(max_concurrent(&events), 2);

    // d overlaps a and c at 10:30.
    let mut more = events.clone();
    more.push(event("d", 10, 30, 11, 30));
    assert_eq!(max_concurrent(&more), 3);
}

#[test]
fn max_concurrent_ignores_input_order() {
    let events = vec![
        event("late", 10, 0, 11, 0),
        event("early", 9, 0, 10, 30),
        event("mid", 9, 45, 10, 15),
    ];
    assert_eq!(max_concurrent(&events), 3);
}

#[test]
fn empty_list_has_no_overlaps() {
    assert!(find_overlaps(&[]).is_empty());
    assert!(!has_overlapping_events(&[]));
    assert_eq!(max_concurrent(&[]), 0);
}

#[test]
fn zero_length_events_count_per_slot() {
    // 10:05 and 10:20 instants, plus a booking 10:10-10:15
    let events = vec![
        event("z1", 10, 5, 10, 5),
        event("z2", 10, 20, 10, 20),
        event("a", 10, 10, 10, 15),
    ];

    assert_eq!(max_concurrent(&events), 1, "instants never overlap raw intervals here");
    assert_eq!(max_concurrent_on_slots(&events, 15), 2, "z1 and a share 10:00-10:15");
    assert_eq!(max_concurrent_on_slots(&events, 30), 3, "all three share 10:00-10:30");
    assert_eq!(max_concurrent_on_slots(&[], 15), 0);
}
