//! Single-flight lock and event dispatch shared by every stack mutation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use scopeguard::ScopeGuard;

use super::events::{EventKind, NavigatorEvent};
use crate::error::{NavigatorError, Result};

/// Event listener.
pub type Listener = Arc<dyn Fn(&NavigatorEvent) + Send + Sync>;

/// Handle returned by [`Navigator::on`](super::Navigator::on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Held while a mutation is in flight; clears the running flag when dropped.
///
/// Owns its flag so a claimed operation can move to a spawned task.
pub(crate) type RunningGuard = ScopeGuard<Arc<AtomicBool>, fn(Arc<AtomicBool>)>;

fn release(flag: Arc<AtomicBool>) {
    flag.store(false, Ordering::SeqCst);
}

pub(crate) struct EventGate {
    running: Arc<AtomicBool>,
    listeners: RwLock<Vec<(ListenerId, EventKind, Listener)>>,
    next_id: AtomicU64,
}

impl EventGate {
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Claim the running flag.
    ///
    /// Check and set are one atomic step, so two callers on different threads
    /// cannot both proceed.
    ///
    /// The flag is claimed before the pre-event is dispatched: `prepush` and
    /// `prepop` listeners observe `is_running() == true`, and a listener that
    /// cancels releases the flag again before the call resolves.
    pub(crate) fn try_begin(
        &self,
        operation: &'static str,
        pre_event: EventKind,
        cancel_if_running: bool,
    ) -> Result<RunningGuard> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            if cancel_if_running {
                tracing::debug!(operation, "Another transition is running, canceling call");
                return Err(NavigatorError::Canceled {
                    event: pre_event.as_str(),
                });
            }
            tracing::debug!(operation, "Rejected, another transition is running");
            return Err(NavigatorError::AlreadyRunning { operation });
        }

        let on_drop: fn(Arc<AtomicBool>) = release;
        Ok(scopeguard::guard(Arc::clone(&self.running), on_drop))
    }

    pub(crate) fn on(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, kind, listener));
        id
    }

    pub(crate) fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _, _)| *existing != id);
        listeners.len() != before
    }

    /// Dispatch synchronously to the listeners of the event's kind.
    ///
    /// Listeners run on a snapshot, outside the lock, so they may subscribe,
    /// unsubscribe or query the navigator.
    pub(crate) fn emit(&self, event: &NavigatorEvent) {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(event = kind.as_str(), listeners = targets.len(), "Emitting event");
        for listener in targets {
            listener(event);
        }
    }

    /// Dispatch a pre-event and report whether a listener canceled it.
    pub(crate) fn emit_pre(&self, event: NavigatorEvent) -> bool {
        self.emit(&event);
        let canceled = event.pre().map(|pre| pre.is_canceled()).unwrap_or(false);
        if canceled {
            tracing::debug!(event = event.kind().as_str(), "Operation canceled by listener");
        }
        canceled
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}
