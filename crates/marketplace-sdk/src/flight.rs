//! Single-flight execution
//!
//! [`SingleFlight`] lets many concurrent callers share one in-flight
//! operation. The first caller starts it, everyone arriving before it
//! settles awaits the same shared future, and the slot is emptied by the
//! operation itself as its final step so the next caller starts fresh.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::{Arc, Weak};

type Flight<T> = Shared<BoxFuture<'static, T>>;

/// Start-or-join coordinator for a single outstanding operation
pub struct SingleFlight<T: Clone> {
    slot: Arc<Mutex<Option<Flight<T>>>>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Join the outstanding operation, or start one with `start`
    ///
    /// `start` is only invoked when nothing is in flight. The returned
    /// future is owned by the flight, so it keeps running as long as any
    /// joiner (or the slot itself) still holds it.
    pub async fn run<F, Fut>(&self, start: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let flight = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some(flight) => flight.clone(),
                None => {
                    let flight = Self::settle_into(Arc::downgrade(&self.slot), start());
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    /// Whether an operation is currently outstanding
    pub fn in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }

    fn settle_into<Fut>(slot: Weak<Mutex<Option<Flight<T>>>>, operation: Fut) -> Flight<T>
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        async move {
            let output = operation.await;
            // Nothing new can be installed until this take, so the slot
            // still holds this flight.
            if let Some(slot) = slot.upgrade() {
                slot.lock().take();
            }
            output
        }
        .boxed()
        .shared()
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> std::fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.slot.lock().is_some())
            .finish()
    }
}
