//! Merged view of live calls fed by both the push stream and fallback polling.
//!
//! A record replaces the stored one only when its `updated_at` is the same or
//! newer, so the same update arriving from both sources is applied once and
//! an older poll snapshot can never roll back a newer pushed state.

use std::collections::HashMap;

use crate::{CallEvent, CallRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct CallFeed {
    calls: HashMap<String, CallRecord>,
    limit: usize,
}

impl Default for CallFeed {
    fn default() -> Self {
        Self::new(50)
    }
}

impl CallFeed {
    pub fn new(limit: usize) -> Self {
        Self {
            calls: HashMap::new(),
            limit: limit.max(1),
        }
    }

    /// Returns true when the feed changed.
    pub fn upsert(&mut self, call: CallRecord) -> bool {
        let changed = match self.calls.get(&call.id) {
            Some(existing) if existing.updated_at > call.updated_at => false,
            Some(existing) if *existing == call => false,
            _ => {
                self.calls.insert(call.id.clone(), call);
                true
            }
        };
        if changed {
            self.trim();
        }
        changed
    }

    pub fn apply_event(&mut self, event: CallEvent) -> bool {
        match event {
            CallEvent::CallUpdated { call } => self.upsert(call),
            CallEvent::Heartbeat => false,
        }
    }

    pub fn apply_snapshot(&mut self, calls: Vec<CallRecord>) -> bool {
        calls
            .into_iter()
            .fold(false, |changed, call| self.upsert(call) || changed)
    }

    /// Newest first by start time.
    pub fn calls(&self) -> Vec<CallRecord> {
        let mut list: Vec<CallRecord> = self.calls.values().cloned().collect();
        list.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    pub fn active(&self) -> Vec<CallRecord> {
        self.calls()
            .into_iter()
            .filter(|c| c.status.is_active())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    // Drop the oldest finished calls beyond the limit; active calls always stay.
    fn trim(&mut self) {
        if self.calls.len() <= self.limit {
            return;
        }
        let mut finished: Vec<(chrono::DateTime<chrono::FixedOffset>, String)> = self
            .calls
            .values()
            .filter(|c| !c.status.is_active())
            .map(|c| (c.started_at, c.id.clone()))
            .collect();
        finished.sort();
        let excess = self.calls.len() - self.limit;
        for (_, id) in finished.into_iter().take(excess) {
            self.calls.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CallStatus;
    use chrono::DateTime;

    fn call(id: &str, status: CallStatus, started: &str, updated: &str) -> CallRecord {
        CallRecord {
            id: id.to_string(),
            caller_number: "+15550001111".to_string(),
            caller_name: None,
            status,
            started_at: DateTime::parse_from_rfc3339(started).unwrap(),
            updated_at: DateTime::parse_from_rfc3339(updated).unwrap(),
            duration_secs: 0,
            summary: None,
        }
    }

    #[test]
    fn test_same_update_from_push_and_poll_applies_once() {
        let mut feed = CallFeed::new(50);
        let pushed = call("c1", CallStatus::InProgress, "2026-10-17T10:00:00Z", "2026-10-17T10:01:00Z");

        assert!(feed.apply_event(CallEvent::CallUpdated { call: pushed.clone() }));
        assert!(!feed.apply_snapshot(vec![pushed]));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_older_snapshot_does_not_regress() {
        let mut feed = CallFeed::new(50);
        feed.upsert(call("c1", CallStatus::Completed, "2026-10-17T10:00:00Z", "2026-10-17T10:05:00Z"));
        let stale = call("c1", CallStatus::InProgress, "2026-10-17T10:00:00Z", "2026-10-17T10:01:00Z");

        assert!(!feed.apply_snapshot(vec![stale]));
        assert_eq!(feed.calls()[0].status, CallStatus::Completed);
        assert!(feed.active().is_empty());
    }

    #[test]
    fn test_ordering_and_active_filter() {
        let mut feed = CallFeed::new(50);
        feed.upsert(call("old", CallStatus::Missed, "2026-10-17T08:00:00Z", "2026-10-17T08:00:00Z"));
        feed.upsert(call("new", CallStatus::Ringing, "2026-10-17T09:00:00Z", "2026-10-17T09:00:00Z"));
        assert!(!feed.apply_event(CallEvent::Heartbeat));

        let ids: Vec<String> = feed.calls().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
        assert_eq!(feed.active().len(), 1);
    }

    #[test]
    fn test_trim_keeps_active_calls() {
        let mut feed = CallFeed::new(2);
        feed.upsert(call("a", CallStatus::Ringing, "2026-10-17T07:00:00Z", "2026-10-17T07:00:00Z"));
        feed.upsert(call("b", CallStatus::Completed, "2026-10-17T08:00:00Z", "2026-10-17T08:00:00Z"));
        feed.upsert(call("c", CallStatus::Completed, "2026-10-17T09:00:00Z", "2026-10-17T09:00:00Z"));

        let ids: Vec<String> = feed.calls().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["c".to_string(), "a".to_string()]);
    }
}
