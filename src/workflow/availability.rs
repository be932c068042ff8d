// src/workflow/availability.rs — Last-query-wins slot tracking
//
// No transport-level cancellation exists: a superseded query is
// neutralized by discarding its response. Each dispatch gets a ticket
// carrying a monotonically increasing sequence number plus the selection
// key it was issued under; a response is applied only when both still
// match the tracker's current state.

use crate::api::types::TimeSlot;
use crate::workflow::selection::SelectionKey;

#[derive(Debug, Clone)]
pub struct QueryTicket {
    seq: u64,
    key: SelectionKey,
}

#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    next_seq: u64,
    latest_seq: Option<u64>,
    active_key: Option<SelectionKey>,
    slots: Vec<TimeSlot>,
    /// Distinguishes "no availability" (a query returned empty) from
    /// "not queried yet".
    resolved: bool,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new query dispatch. Supersedes every ticket issued before.
    pub fn begin(&mut self, key: SelectionKey) -> QueryTicket {
        self.next_seq += 1;
        self.latest_seq = Some(self.next_seq);
        self.active_key = Some(key.clone());
        QueryTicket {
            seq: self.next_seq,
            key,
        }
    }

    /// Apply a response. Returns false (and changes nothing) when the
    /// ticket is stale — superseded by a newer query or issued under a
    /// selection that has since changed.
    pub fn apply(&mut self, ticket: &QueryTicket, slots: Vec<TimeSlot>) -> bool {
        if self.latest_seq != Some(ticket.seq) || self.active_key.as_ref() != Some(&ticket.key) {
            return false;
        }
        self.slots = slots;
        self.resolved = true;
        true
    }

    /// Drop the rendered slot set; called when the selection changes so
    /// no in-flight response can land against the old choice.
    pub fn invalidate(&mut self) {
        self.latest_seq = None;
        self.active_key = None;
        self.slots.clear();
        self.resolved = false;
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// True once a query for the current selection has completed, even
    /// with zero slots.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn key(service_id: i64, day: u32) -> SelectionKey {
        SelectionKey {
            service_id,
            stylist_id: Some(2),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    fn slots(n: usize) -> Vec<TimeSlot> {
        (0..n)
            .map(|i| TimeSlot {
                start_time: Utc.with_ymd_and_hms(2024, 6, 1, 9 + i as u32, 0, 0).unwrap(),
                end_time: Utc.with_ymd_and_hms(2024, 6, 1, 9 + i as u32, 30, 0).unwrap(),
                stylist_id: Some(2),
            })
            .collect()
    }

    #[test]
    fn fresh_response_is_applied() {
        let mut tracker = AvailabilityTracker::new();
        let ticket = tracker.begin(key(1, 1));
        assert!(tracker.apply(&ticket, slots(3)));
        assert_eq!(tracker.slots().len(), 3);
        assert!(tracker.is_resolved());
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut tracker = AvailabilityTracker::new();
        let old_ticket = tracker.begin(key(1, 1));
        let new_ticket = tracker.begin(key(1, 2));

        // Newer query resolves first.
        assert!(tracker.apply(&new_ticket, slots(2)));
        // The stale response must not overwrite the newer one.
        assert!(!tracker.apply(&old_ticket, slots(5)));
        assert_eq!(tracker.slots().len(), 2);
    }

    #[test]
    fn response_after_invalidation_is_discarded() {
        let mut tracker = AvailabilityTracker::new();
        let ticket = tracker.begin(key(1, 1));
        tracker.invalidate();
        assert!(!tracker.apply(&ticket, slots(3)));
        assert!(tracker.slots().is_empty());
        assert!(!tracker.is_resolved());
    }

    #[test]
    fn empty_result_still_counts_as_resolved() {
        let mut tracker = AvailabilityTracker::new();
        let ticket = tracker.begin(key(1, 1));
        assert!(tracker.apply(&ticket, vec![]));
        assert!(tracker.slots().is_empty());
        assert!(tracker.is_resolved(), "no availability is not the same as not queried");
    }
}
