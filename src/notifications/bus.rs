// SPDX-License-Identifier: MPL-2.0
//! Publish/subscribe channel between toast producers and the surface.
//!
//! The bus is an explicit object: the host creates one at its composition
//! root and hands clones to every producer and to the surface. Delivery is
//! synchronous and ordered. A publish issued while a delivery pass is already
//! running (from inside a handler, or from another thread) is queued and
//! drained by the pass in progress, so handlers never recurse and events
//! never interleave.

use super::notification::{ToastId, ToastOptions};
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Event carried from producers to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    /// Insert a new toast, or merge into the one holding `id`.
    Create { id: ToastId, options: ToastOptions },
    /// Merge into an existing toast; ignored when `id` is unknown.
    Update { id: ToastId, options: ToastOptions },
    /// Soft-delete request.
    Dismiss { id: ToastId },
    /// Soft-delete every toast the surface currently holds.
    DismissAll,
}

impl ToastEvent {
    /// Target toast; `None` for [`ToastEvent::DismissAll`].
    #[must_use]
    pub fn id(&self) -> Option<&ToastId> {
        match self {
            ToastEvent::Create { id, .. }
            | ToastEvent::Update { id, .. }
            | ToastEvent::Dismiss { id } => Some(id),
            ToastEvent::DismissAll => None,
        }
    }
}

impl fmt::Display for ToastEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastEvent::Create { id, .. } => write!(f, "create {id}"),
            ToastEvent::Update { id, .. } => write!(f, "update {id}"),
            ToastEvent::Dismiss { id } => write!(f, "dismiss {id}"),
            ToastEvent::DismissAll => f.write_str("dismiss all"),
        }
    }
}

type Handler = dyn Fn(&ToastEvent) -> Result<()> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SubscriberId(u64);

#[derive(Default)]
struct Inner {
    subscribers: Vec<(SubscriberId, Arc<Handler>)>,
    next_subscriber: u64,
    queue: VecDeque<ToastEvent>,
    delivering: bool,
    /// First event published before anyone listened.
    seed: Option<ToastEvent>,
    seed_taken: bool,
    diagnostics: Option<DiagnosticsHandle>,
}

/// Cloneable handle to a shared notification bus.
#[derive(Clone, Default)]
pub struct Bus {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Bus")
            .field("subscribers", &inner.subscribers.len())
            .field("queued", &inner.queue.len())
            .field("has_seed", &inner.seed.is_some())
            .finish()
    }
}

impl Bus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes subscriber failures to a diagnostics collector.
    #[must_use]
    pub fn with_diagnostics(self, handle: DiagnosticsHandle) -> Self {
        self.lock().diagnostics = Some(handle);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Handlers never run under the lock, so poisoning cannot leave the
        // inner state half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a handler, called for every event published from now on.
    pub fn subscribe<F>(&self, handler: F) -> BusSubscription
    where
        F: Fn(&ToastEvent) -> Result<()> + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        self.register(&mut inner, Arc::new(handler))
    }

    /// Registers a handler and atomically takes the seed event, if any.
    ///
    /// The seed is the first event published while nobody was listening. It
    /// is handed out once, to whichever subscriber asks first; every event
    /// the handler sees afterwards was published after it.
    pub fn subscribe_seeded<F>(&self, handler: F) -> (BusSubscription, Option<ToastEvent>)
    where
        F: Fn(&ToastEvent) -> Result<()> + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let subscription = self.register(&mut inner, Arc::new(handler));
        inner.seed_taken = true;
        (subscription, inner.seed.take())
    }

    fn register(&self, inner: &mut Inner, handler: Arc<Handler>) -> BusSubscription {
        let id = SubscriberId(inner.next_subscriber);
        inner.next_subscriber += 1;
        inner.subscribers.push((id, handler));
        log::debug!("bus subscriber {} attached", id.0);
        BusSubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Delivers `event` to every subscriber, in registration order.
    pub fn publish(&self, event: ToastEvent) {
        {
            let mut inner = self.lock();
            if inner.subscribers.is_empty() {
                if inner.seed.is_none() && !inner.seed_taken {
                    log::debug!("no surface attached yet, keeping {event} as seed");
                    inner.seed = Some(event);
                } else {
                    log::debug!("no subscriber for {event}, event dropped");
                }
                return;
            }
            inner.queue.push_back(event);
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let (event, handlers, diagnostics) = {
                let mut inner = self.lock();
                let Some(event) = inner.queue.pop_front() else {
                    inner.delivering = false;
                    return;
                };
                (event, inner.subscribers.clone(), inner.diagnostics.clone())
            };

            for (id, handler) in handlers {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&event)));
                let failure = match outcome {
                    Ok(Ok(())) => continue,
                    Ok(Err(err)) => err,
                    Err(payload) => Error::Subscriber(panic_message(payload.as_ref())),
                };
                log::warn!("bus subscriber {} failed on {event}: {failure}", id.0);
                if let Some(diagnostics) = &diagnostics {
                    diagnostics.log_error(format!("subscriber {} failed: {failure}", id.0));
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Unsubscribe capability returned by [`Bus::subscribe`].
///
/// Dropping it detaches the handler. A delivery pass already running keeps
/// its snapshot of subscribers and finishes with the old list.
#[derive(Debug)]
pub struct BusSubscription {
    id: SubscriberId,
    inner: Weak<Mutex<Inner>>,
}

impl BusSubscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for BusSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|(id, _)| *id != self.id);
            log::debug!("bus subscriber {} detached", self.id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use std::sync::Mutex as StdMutex;

    fn dismiss(n: u64) -> ToastEvent {
        ToastEvent::Dismiss {
            id: ToastId::Num(n),
        }
    }

    fn recorder(log: &Arc<StdMutex<Vec<String>>>, name: &'static str) -> impl Fn(&ToastEvent) -> Result<()> {
        let log = Arc::clone(log);
        move |event| {
            let target = event.id().map_or_else(|| "all".to_string(), ToString::to_string);
            log.lock().unwrap().push(format!("{name}:{target}"));
            Ok(())
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let _a = bus.subscribe(recorder(&log, "a"));
        let _b = bus.subscribe(recorder(&log, "b"));

        bus.publish(dismiss(1));
        bus.publish(dismiss(2));

        assert_eq!(*log.lock().unwrap(), vec!["a:1", "b:1", "a:2", "b:2"]);
    }

    #[test]
    fn late_subscriber_misses_earlier_events() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let _a = bus.subscribe(recorder(&log, "a"));
        bus.publish(dismiss(1));

        let _b = bus.subscribe(recorder(&log, "b"));
        bus.publish(dismiss(2));

        assert_eq!(*log.lock().unwrap(), vec!["a:1", "a:2", "b:2"]);
    }

    #[test]
    fn first_event_before_any_subscriber_becomes_seed_once() {
        let bus = Bus::new();
        bus.publish(dismiss(1));
        bus.publish(dismiss(2)); // not buffered

        let (_sub, seed) = bus.subscribe_seeded(|_| Ok(()));
        assert_eq!(seed, Some(dismiss(1)));

        let (_again, second) = bus.subscribe_seeded(|_| Ok(()));
        assert_eq!(second, None);
    }

    #[test]
    fn dropping_subscription_detaches_handler() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let sub = bus.subscribe(recorder(&log, "a"));
        assert_eq!(bus.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(dismiss(1));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn unsubscribing_during_delivery_keeps_current_pass() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let slot: Arc<StdMutex<Option<BusSubscription>>> = Arc::new(StdMutex::new(None));

        let slot_in_handler = Arc::clone(&slot);
        let _first = bus.subscribe(move |_| {
            // Detach the second subscriber mid-delivery.
            slot_in_handler.lock().unwrap().take();
            Ok(())
        });
        *slot.lock().unwrap() = Some(bus.subscribe(recorder(&log, "b")));

        bus.publish(dismiss(1));
        bus.publish(dismiss(2));

        assert_eq!(*log.lock().unwrap(), vec!["b:1"]);
    }

    #[test]
    fn failing_handler_does_not_stop_delivery() {
        let mut collector = DiagnosticsCollector::default();
        let bus = Bus::new().with_diagnostics(collector.handle());
        let log = Arc::new(StdMutex::new(Vec::new()));

        let _bad = bus.subscribe(|_| Err(Error::Subscriber("renderer gone".into())));
        let _panics = bus.subscribe(|_| panic!("boom"));
        let _good = bus.subscribe(recorder(&log, "good"));

        bus.publish(dismiss(1));
        bus.publish(dismiss(2));

        assert_eq!(*log.lock().unwrap(), vec!["good:1", "good:2"]);

        collector.process_pending();
        let errors = collector
            .iter()
            .filter(|e| matches!(e.kind, DiagnosticEventKind::Error { .. }))
            .count();
        assert_eq!(errors, 4);
    }

    #[test]
    fn reentrant_publish_is_queued_after_current_delivery() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));

        let producer = bus.clone();
        let _a = bus.subscribe(move |event| {
            if event.id() == Some(&ToastId::Num(1)) {
                producer.publish(dismiss(2));
            }
            Ok(())
        });
        let _b = bus.subscribe(recorder(&log, "b"));

        bus.publish(dismiss(1));

        // "b" sees event 1 before the event published from inside "a".
        assert_eq!(*log.lock().unwrap(), vec!["b:1", "b:2"]);
    }

    #[test]
    fn publishes_from_many_threads_all_arrive() {
        let bus = Bus::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        let _sub = bus.subscribe(recorder(&log, "s"));

        let threads: Vec<_> = (0..8)
            .map(|t| {
                let bus = bus.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        bus.publish(dismiss(t * 100 + i));
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(log.lock().unwrap().len(), 400);
    }
}
