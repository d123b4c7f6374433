//! Sequential gate
//!
//! Admits at most one unit of row work at a time and exposes an explicit
//! drain barrier: `drain` completes only after every registered unit has
//! finished. Admission is queued fairly, so units run in registration order.
//!
//! The in-flight count is tracked separately from the admission slot, making
//! "drained" a first-class condition rather than a side effect of lock
//! fairness.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

/// Cheaply cloneable handle to one gate.
#[derive(Clone)]
pub struct SequentialGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    /// Single admission slot; tokio's mutex queues waiters FIFO.
    slot: Mutex<()>,
    in_flight: AtomicUsize,
    drained: Notify,
}

impl SequentialGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GateInner {
                slot: Mutex::new(()),
                in_flight: AtomicUsize::new(0),
                drained: Notify::new(),
            }),
        }
    }

    /// Register one unit of work ahead of running it.
    ///
    /// Registration is synchronous, so a unit counts toward `drain` from the
    /// moment it exists, not from the moment it is first polled.
    pub fn register(&self) -> GateTicket {
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        GateTicket {
            inner: Arc::clone(&self.inner),
            done: false,
        }
    }

    /// Wait until every registered unit has finished.
    pub async fn drain(&self) {
        loop {
            let notified = self.inner.drained.notified();
            let mut notified = std::pin::pin!(notified);
            // Enable the waiter before re-checking the count, so a release
            // between the check and the await cannot be missed.
            notified.as_mut().enable();
            if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for SequentialGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one registered unit of work.
///
/// Dropping a ticket without running it still counts the unit as finished,
/// so an abandoned row cannot wedge `drain`.
pub struct GateTicket {
    inner: Arc<GateInner>,
    done: bool,
}

impl GateTicket {
    /// Run the unit under the single admission slot.
    pub async fn run<F, T>(mut self, work: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let output = {
            let _slot = self.inner.slot.lock().await;
            work.await
        };
        self.finish();
        output
    }

    fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        if self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.drained.notify_waiters();
        }
    }
}

impl Drop for GateTicket {
    fn drop(&mut self) {
        self.finish();
    }
}
