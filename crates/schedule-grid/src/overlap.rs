//! Detect overlapping events within one resource's booking list.
//!
//! Adjacent events (where one ends exactly when another starts) are NOT
//! overlaps.

use crate::event::Event;

/// A detected overlap between two events of the same list.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub event_a: Event,
    pub event_b: Event,
    pub overlap_minutes: i64,
}

/// Find all pairwise overlaps in an event list.
///
/// Two events overlap when `a.start < b.end && b.start < a.end`. The overlap
/// duration is `min(a.end, b.end) - max(a.start, b.start)`. Pairs are
/// reported in input order, `event_a` always preceding `event_b`.
pub fn find_overlaps(events: &[Event]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.intersects(b) {
                let overlap_start = a.start.max(b.start);
                let overlap_end = a.end.min(b.end);
                overlaps.push(Overlap {
                    event_a: a.clone(),
                    event_b: b.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    overlaps
}

/// Whether any two events in the list intersect.
pub fn has_overlapping_events(events: &[Event]) -> bool {
    events
        .iter()
        .enumerate()
        .any(|(i, a)| events[i + 1..].iter().any(|b| a.intersects(b)))
}

/// The largest number of events that pairwise overlap.
///
/// For every event, counts the events starting no later than it that
/// intersect it; those all share the event's start instant. For a list
/// without zero-length events this is the number of columns the allocator
/// needs; see [`max_concurrent_on_slots`] for the general case.
pub fn max_concurrent(events: &[Event]) -> usize {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let earlier = events
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other.start <= event.start && other.intersects(event))
                .count();
            earlier + 1
        })
        .max()
        .unwrap_or(0)
}

/// The number of columns a grid of `slot_size`-minute slots allocates for
/// the list: the largest number of [`placement`](Event::placement)
/// intervals covering one instant.
pub fn max_concurrent_on_slots(events: &[Event], slot_size: u32) -> usize {
    let placements: Vec<_> = events.iter().map(|e| e.placement(slot_size)).collect();
    placements
        .iter()
        .map(|&(instant, _)| {
            placements
                .iter()
                .filter(|&&(start, end)| start <= instant && instant < end)
                .count()
        })
        .max()
        .unwrap_or(0)
}
