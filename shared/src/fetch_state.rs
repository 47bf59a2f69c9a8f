//! Load state shared by every data-backed view and widget.
//!
//! `Loading -> {Populated | Empty | Error}`. A fresh load starts on mount,
//! on a date or view change, on a timer tick, or on manual retry. Each load
//! takes a [`RequestTicket`]; results carrying a superseded ticket are
//! dropped so a slow response can never overwrite newer state.

use std::cell::Cell;
use std::rc::Rc;

use crate::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Error(String),
    Empty,
    Populated(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    /// Map a finished request onto a terminal state. `is_empty` decides
    /// between the empty call-to-action and the populated view.
    pub fn from_result(result: Result<T, ApiError>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(data) if is_empty(&data) => FetchState::Empty,
            Ok(data) => FetchState::Populated(data),
            Err(e) => FetchState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Populated(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Error(e) => FetchState::Error(e),
            FetchState::Empty => FetchState::Empty,
            FetchState::Populated(data) => FetchState::Populated(f(data)),
        }
    }
}

/// Generation stamp handed out per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Hands out request tickets and decides whether a completion is still wanted.
///
/// Clones share the same counter, so a tracker can be moved into async
/// completions while the owning component keeps issuing new tickets.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    current: Rc<Cell<u64>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current.get() == ticket.0
    }

    /// Invalidate everything in flight (e.g. on unmount).
    pub fn cancel_all(&self) {
        self.begin();
    }

    /// Run `apply` only if `ticket` is still the newest request.
    /// Returns whether the result was applied.
    pub fn complete(&self, ticket: RequestTicket, apply: impl FnOnce()) -> bool {
        if self.is_current(ticket) {
            apply();
            true
        } else {
            false
        }
    }
}

impl PartialEq for RequestTracker {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_distinguishes_empty() {
        let empty: FetchState<Vec<u32>> = FetchState::from_result(Ok(vec![]), Vec::is_empty);
        assert_eq!(empty, FetchState::Empty);

        let populated = FetchState::from_result(Ok(vec![1, 2]), Vec::is_empty);
        assert_eq!(populated.data(), Some(&vec![1, 2]));

        let failed: FetchState<Vec<u32>> =
            FetchState::from_result(Err(ApiError::http(500, "boom")), Vec::is_empty);
        assert_eq!(failed.error(), Some("Server error 500: boom"));
    }

    #[test]
    fn test_default_is_loading() {
        let state: FetchState<()> = FetchState::default();
        assert!(state.is_loading());
        assert_eq!(FetchState::Populated(2).map(|n| n * 10), FetchState::Populated(20));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let tracker = RequestTracker::new();
        let mut applied = Vec::new();

        let day_n = tracker.begin();
        let day_n_plus_1 = tracker.clone().begin();

        // The newer request resolves first, then the slow one arrives.
        assert!(tracker.complete(day_n_plus_1, || applied.push("n+1")));
        assert!(!tracker.complete(day_n, || applied.push("n")));
        assert_eq!(applied, vec!["n+1"]);
    }

    #[test]
    fn test_cancel_all_invalidates_in_flight() {
        let tracker = RequestTracker::new();
        let ticket = tracker.begin();
        tracker.cancel_all();
        assert!(!tracker.is_current(ticket));
        assert!(tracker.begin().generation() > ticket.generation());
    }
}
