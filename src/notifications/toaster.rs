// SPDX-License-Identifier: MPL-2.0
//! Producer API: builds toast events and publishes them on the bus.
//!
//! A `Toaster` is cheap to clone; clones share the id counter, so ids stay
//! unique across every producer holding one.

use super::bus::{Bus, ToastEvent};
use super::notification::{ToastButton, ToastId, ToastKind, ToastOptions};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Entry point for application code that wants to show toasts.
#[derive(Debug, Clone)]
pub struct Toaster {
    bus: Bus,
    counter: Arc<AtomicU64>,
}

impl Toaster {
    #[must_use]
    pub fn new(bus: Bus) -> Self {
        Self {
            bus,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Next counter id; starts at 1 and is never reused.
    fn next_id(&self) -> ToastId {
        ToastId::Num(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Publishes a toast of `kind` and returns its id.
    ///
    /// When `options.id` names a toast the surface already holds, the options
    /// are merged into it instead.
    pub fn create(&self, kind: ToastKind, mut options: ToastOptions) -> ToastId {
        let id = options.id.take().unwrap_or_else(|| self.next_id());
        options.kind = Some(kind);

        log::debug!("publishing {kind:?} toast {id}");
        self.bus.publish(ToastEvent::Create {
            id: id.clone(),
            options,
        });
        id
    }

    /// Publishes a toast whose kind comes from `options` (default otherwise).
    pub fn show(&self, options: ToastOptions) -> ToastId {
        let kind = options.kind.unwrap_or_default();
        self.create(kind, options)
    }

    pub fn message(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Normal, ToastOptions::new().title(title))
    }

    pub fn success(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Success, ToastOptions::new().title(title))
    }

    pub fn info(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Info, ToastOptions::new().title(title))
    }

    pub fn warning(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Warning, ToastOptions::new().title(title))
    }

    pub fn error(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Error, ToastOptions::new().title(title))
    }

    pub fn loading(&self, title: impl Into<String>) -> ToastId {
        self.create(ToastKind::Loading, ToastOptions::new().title(title))
    }

    /// Publishes a toast carrying an action button.
    pub fn action(&self, title: impl Into<String>, action: ToastButton) -> ToastId {
        self.create(
            ToastKind::Action,
            ToastOptions::new().title(title).action(action),
        )
    }

    /// Merges `options` into the toast holding `id`.
    ///
    /// Updating a toast the surface no longer holds is silently ignored.
    pub fn update(&self, id: &ToastId, options: ToastOptions) {
        log::debug!("publishing update for toast {id}");
        self.bus.publish(ToastEvent::Update {
            id: id.clone(),
            options,
        });
    }

    /// Requests the dismissal of one toast.
    pub fn dismiss(&self, id: &ToastId) {
        self.bus.publish(ToastEvent::Dismiss { id: id.clone() });
    }

    /// Requests the dismissal of every toast the surface currently holds.
    pub fn dismiss_all(&self) {
        log::debug!("publishing dismiss for all toasts");
        self.bus.publish(ToastEvent::DismissAll);
    }

    /// Tracks an asynchronous operation with a single toast.
    ///
    /// A loading toast is published immediately. The returned future drives
    /// `operation`; when it settles the same toast is rewritten with the
    /// success or error content (or dismissed if there is none for that
    /// outcome), `finally` runs once, and the operation's own result is
    /// handed back to the caller.
    pub fn promise<F, T, E>(
        &self,
        operation: F,
        data: PromiseData<T, E>,
    ) -> (ToastId, impl Future<Output = Result<T, E>> + Send + 'static)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let PromiseData {
            loading,
            success,
            error,
            finally,
            options,
        } = data;

        let id = self.create(ToastKind::Loading, ToastOptions { title: Some(loading), ..options });

        let toaster = self.clone();
        let tracked_id = id.clone();
        let tracked = async move {
            let result = operation.await;

            let settled = match &result {
                Ok(value) => success.map(|content| (ToastKind::Success, content.render(value))),
                Err(err) => error.map(|content| (ToastKind::Error, content.render(err))),
            };
            match settled {
                Some((kind, title)) => {
                    toaster.update(&tracked_id, ToastOptions::new().kind(kind).title(title));
                }
                None => toaster.dismiss(&tracked_id),
            }

            if let Some(finally) = finally {
                finally();
            }
            result
        };

        (id, tracked)
    }
}

/// Title shown once a tracked operation settles.
pub enum PromiseContent<V> {
    Text(String),
    Render(Box<dyn Fn(&V) -> String + Send + Sync>),
}

impl<V> PromiseContent<V> {
    fn render(&self, value: &V) -> String {
        match self {
            PromiseContent::Text(text) => text.clone(),
            PromiseContent::Render(render) => render(value),
        }
    }
}

/// Content and hooks for [`Toaster::promise`].
pub struct PromiseData<T, E> {
    pub loading: String,
    pub success: Option<PromiseContent<T>>,
    pub error: Option<PromiseContent<E>>,
    pub finally: Option<Box<dyn FnOnce() + Send>>,
    /// Applied to the loading toast and kept through the transition.
    pub options: ToastOptions,
}

impl<T, E> PromiseData<T, E> {
    pub fn new(loading: impl Into<String>) -> Self {
        Self {
            loading: loading.into(),
            success: None,
            error: None,
            finally: None,
            options: ToastOptions::default(),
        }
    }

    #[must_use]
    pub fn success(mut self, title: impl Into<String>) -> Self {
        self.success = Some(PromiseContent::Text(title.into()));
        self
    }

    #[must_use]
    pub fn success_with(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.success = Some(PromiseContent::Render(Box::new(render)));
        self
    }

    #[must_use]
    pub fn error(mut self, title: impl Into<String>) -> Self {
        self.error = Some(PromiseContent::Text(title.into()));
        self
    }

    #[must_use]
    pub fn error_with(mut self, render: impl Fn(&E) -> String + Send + Sync + 'static) -> Self {
        self.error = Some(PromiseContent::Render(Box::new(render)));
        self
    }

    #[must_use]
    pub fn finally(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.finally = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }
}
