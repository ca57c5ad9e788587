//! Status listeners and their replay.
//!
//! Every convenience subscription (`on_building`, `on_error`, ...) is a
//! [`Listener`] with a different predicate; there is only one registration
//! path and one replay loop.

use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use super::lifecycle::DexTransaction;
use super::status::TransactionStatus;

/// Callback invoked with the lifecycle after a matching status write.
pub type StatusCallback = Box<dyn Fn(&DexTransaction) + Send + Sync>;

/// Predicate over the status at the time of the write.
pub type StatusPredicate = Box<dyn Fn(TransactionStatus) -> bool + Send + Sync>;

/// A registered observer.
pub(crate) struct Listener {
    predicate: StatusPredicate,
    callback: StatusCallback,
}

impl Listener {
    pub(crate) fn new(predicate: StatusPredicate, callback: StatusCallback) -> Self {
        Self {
            predicate,
            callback,
        }
    }
}

/// What happened during one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    /// The status that was written.
    pub status: TransactionStatus,
    /// Listeners whose predicate matched and were called.
    pub invoked: usize,
    /// Of those, how many panicked.
    pub panicked: usize,
}

impl ReplayReport {
    /// Returns `true` if every invoked listener returned normally.
    pub fn is_clean(&self) -> bool {
        self.panicked == 0
    }
}

/// Runs every matching listener in registration order.
///
/// Each listener runs behind its own unwind boundary: a panic is logged and
/// counted, and the remaining listeners still run.
pub(crate) fn replay(tx: &DexTransaction, listeners: &[Listener]) -> ReplayReport {
    let status = tx.status();
    let mut report = ReplayReport {
        status,
        invoked: 0,
        panicked: 0,
    };

    for (index, listener) in listeners.iter().enumerate() {
        if !(listener.predicate)(status) {
            continue;
        }
        report.invoked += 1;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (listener.callback)(tx)));
        if let Err(payload) = outcome {
            report.panicked += 1;
            error!(
                tx_id = %tx.id(),
                status = %status,
                listener = index,
                reason = panic_message(payload.as_ref()),
                "status listener panicked"
            );
        }
    }

    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
