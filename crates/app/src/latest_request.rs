//! Stale-result guard for consumers that fire overlapping fetches.
//!
//! A scale change can race a periodic refresh and the two fetches may
//! complete in any order. Take a [`Ticket`] before each fetch, then either
//! apply its result only while the ticket is still current
//! ([`LatestRequest::is_current`]), or apply any result newer than the last
//! one applied ([`LatestRequest::accept`]). The latter keeps making progress
//! when fetches take longer than the interval between them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed out by [`LatestRequest::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Tracks the most recently started and the most recently applied request.
#[derive(Debug, Default)]
pub struct LatestRequest {
    latest: AtomicU64,
    applied: AtomicU64,
}

impl LatestRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no request has started since `ticket` was issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Record `ticket`'s result as applied if it is newer than every result
    /// applied so far. Returns `false` for results that arrive out of order.
    pub fn accept(&self, ticket: Ticket) -> bool {
        self.applied.fetch_max(ticket.0, Ordering::SeqCst) < ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_latest_ticket() {
        let guard = LatestRequest::new();
        let ticket = guard.begin();
        assert!(guard.is_current(ticket));
    }

    #[test]
    fn should_reject_superseded_ticket() {
        let guard = LatestRequest::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn should_issue_increasing_tickets() {
        let guard = LatestRequest::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(first < second);
    }

    #[test]
    fn should_accept_superseded_ticket_newer_than_last_applied() {
        let guard = LatestRequest::new();
        let first = guard.begin();
        let second = guard.begin();
        let third = guard.begin();

        assert!(guard.accept(first));
        assert!(guard.accept(second));
        assert!(!guard.is_current(second));
        assert!(guard.accept(third));
    }

    #[test]
    fn should_refuse_ticket_older_than_last_applied() {
        let guard = LatestRequest::new();
        let slow = guard.begin();
        let fast = guard.begin();

        assert!(guard.accept(fast));
        assert!(!guard.accept(slow));
        assert!(!guard.accept(fast));
    }

    #[tokio::test]
    async fn should_discard_result_completing_out_of_order() {
        let guard = std::sync::Arc::new(LatestRequest::new());
        let slow = guard.begin();
        let fast = guard.begin();

        let applied = tokio::spawn({
            let guard = std::sync::Arc::clone(&guard);
            async move { [slow, fast].map(|ticket| guard.is_current(ticket)) }
        })
        .await
        .unwrap();

        assert_eq!(applied, [false, true]);
    }
}
