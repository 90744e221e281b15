//! Stale-result guard for view fetches
//!
//! A view that starts a fetch takes a ticket. Starting another fetch or
//! dismissing the view retires every earlier ticket, and results carrying
//! a retired ticket are dropped instead of applied.
//!
//! This is the library-side liveness primitive for view-layer consumers
//! of the repository. The HTTP gateway answers each request once and has
//! no view to go stale, so it never takes tickets.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Generation of the fetch that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    generation: Arc<AtomicU64>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any fetch already in flight
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Retire all outstanding tickets, e.g. when the view goes away
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Await `fut` and return its output only if `ticket` is still current
    pub async fn run<F, T>(&self, ticket: Ticket, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let output = fut.await;
        if self.is_current(ticket) {
            Some(output)
        } else {
            debug!(ticket = ticket.0, "Discarding stale fetch result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_latest_ticket_is_current() {
        let guard = FetchGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_invalidate_retires_tickets() {
        let guard = FetchGuard::new();
        let ticket = guard.begin();
        guard.invalidate();
        assert!(!guard.is_current(ticket));
    }

    #[test]
    fn test_run_applies_current_result() {
        let guard = FetchGuard::new();
        let ticket = guard.begin();
        assert_eq!(tokio_test::block_on(guard.run(ticket, async { 42 })), Some(42));
    }

    #[tokio::test]
    async fn test_superseded_result_is_dropped() {
        let guard = FetchGuard::new();
        let (tx, rx) = oneshot::channel::<&str>();

        let stale = guard.begin();
        let pending = {
            let guard = guard.clone();
            tokio::spawn(async move { guard.run(stale, async { rx.await.ok() }).await })
        };

        let fresh = guard.begin();
        tx.send("old").ok();

        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(guard.run(fresh, async { "new" }).await, Some("new"));
    }

    #[tokio::test]
    async fn test_dismissed_view_drops_result() {
        let guard = FetchGuard::new();
        let ticket = guard.begin();
        let result = guard
            .run(ticket, async {
                guard.invalidate();
                vec![1, 2, 3]
            })
            .await;
        assert!(result.is_none());
    }
}
