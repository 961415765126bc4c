use crate::config::{EmitterConfig, UNLIMITED_LISTENERS};
use crate::listener::{Listener, ListenerEntry, ListenerHandle, ListenerId};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, trace, warn};

/// Event name -> listeners in registration order. Empty sequences are never stored.
type Registry<T> = FxHashMap<String, Vec<Arc<ListenerEntry<T>>>>;

struct EmitterInner<T> {
    listeners: RwLock<Registry<T>>,
    next_id: AtomicU64,
    max_listeners: AtomicUsize,
}

/// A thread-safe, synchronous event emitter.
///
/// Maps event names to ordered listener lists and dispatches a payload of type
/// `T` to them on the caller's thread. Cloning an `Emitter` is cheap and yields
/// another handle to the same registry.
///
/// The internal lock is never held while a listener runs, so listeners may
/// register, remove or emit on the same emitter.
pub struct Emitter<T> {
    inner: Arc<EmitterInner<T>>,
}

impl<T> Emitter<T> {
    /// Creates a new, empty `Emitter` with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EmitterConfig::default())
    }

    /// Creates a new, empty `Emitter` tuned by `config`.
    ///
    /// # Examples
    /// ```rust
    /// use herald_emitter::{Emitter, EmitterConfig};
    ///
    /// let config = EmitterConfig { max_listeners: 16, ..EmitterConfig::default() };
    /// let emitter = Emitter::<()>::with_config(&config);
    /// assert_eq!(emitter.max_listeners(), 16);
    /// ```
    #[must_use]
    pub fn with_config(config: &EmitterConfig) -> Self {
        let listeners =
            FxHashMap::with_capacity_and_hasher(config.initial_capacity, Default::default());
        Self {
            inner: Arc::new(EmitterInner {
                listeners: RwLock::new(listeners),
                next_id: AtomicU64::new(1),
                max_listeners: AtomicUsize::new(config.max_listeners),
            }),
        }
    }

    /// Appends `listener` to the listeners of `event`.
    ///
    /// Returns the [`ListenerId`] to pass to [`Emitter::remove_listener`].
    ///
    /// # Examples
    /// ```rust
    /// use herald_emitter::Emitter;
    ///
    /// let emitter = Emitter::<String>::new();
    /// let id = emitter.on("user_created", |name: &String| assert_eq!(name, "alice"));
    /// emitter.emit("user_created", &"alice".to_owned());
    /// assert!(emitter.remove_listener("user_created", id));
    /// ```
    pub fn on(
        &self,
        event: impl Into<String>,
        listener: impl Fn(&T) + Send + Sync + 'static,
    ) -> ListenerId {
        self.push_entry(event.into(), Arc::new(listener), false)
    }

    /// Alias of [`Emitter::on`].
    pub fn add_listener(
        &self,
        event: impl Into<String>,
        listener: impl Fn(&T) + Send + Sync + 'static,
    ) -> ListenerId {
        self.on(event, listener)
    }

    /// Appends every listener of `listeners` to `event`, keeping their order.
    ///
    /// Passing no listeners is a no-op and does not make `event` known.
    ///
    /// # Examples
    /// ```rust
    /// use herald_emitter::{Emitter, listener};
    ///
    /// let emitter = Emitter::<u8>::new();
    /// assert!(emitter.on_all("noop", []).is_empty());
    /// assert_eq!(emitter.len(), 0);
    ///
    /// let ids = emitter.on_all("tick", [listener(|_: &u8| {}), listener(|_: &u8| {})]);
    /// assert_eq!(ids.len(), 2);
    /// assert_eq!(emitter.listener_count("tick"), 2);
    /// ```
    pub fn on_all(
        &self,
        event: impl Into<String>,
        listeners: impl IntoIterator<Item = Listener<T>>,
    ) -> Vec<ListenerId> {
        let pending: Vec<(ListenerId, Listener<T>)> =
            listeners.into_iter().map(|callback| (self.next_id(), callback)).collect();
        let ids = pending.iter().map(|(id, _)| *id).collect();
        self.push_entries(event.into(), pending, false);
        ids
    }

    /// Registers `listener` for a single invocation.
    ///
    /// The registration is removed right after it fires, before any later
    /// listener of the same emission runs. It can also be removed beforehand
    /// with [`Emitter::remove_listener`] like any other registration.
    ///
    /// # Examples
    /// ```rust
    /// use herald_emitter::Emitter;
    ///
    /// let emitter = Emitter::<()>::new();
    /// emitter.once("ping", |_: &()| {});
    /// assert_eq!(emitter.emit("ping", &()), 1);
    /// assert_eq!(emitter.emit("ping", &()), 0);
    /// assert_eq!(emitter.listener_count("ping"), 0);
    /// ```
    pub fn once(
        &self,
        event: impl Into<String>,
        listener: impl Fn(&T) + Send + Sync + 'static,
    ) -> ListenerId {
        self.push_entry(event.into(), Arc::new(listener), true)
    }

    /// Invokes every listener currently registered for `event` with `payload`.
    ///
    /// Listeners run synchronously, in registration order, over a snapshot
    /// taken before the first one is called: listeners added during the
    /// emission are not called, listeners removed during it still are.
    /// Unknown events are a no-op.
    ///
    /// Panics raised by a listener are not caught; they abort the emission and
    /// unwind into the caller.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &str, payload: &T) -> usize {
        let Some(snapshot) = self.snapshot(event) else {
            trace!(event, "Event dropped: no listeners");
            return 0;
        };

        let mut invoked = 0;
        for entry in snapshot {
            if !entry.claim() {
                continue;
            }
            if entry.once {
                let _removal = OnceRemoval { emitter: self, event, id: entry.id };
                (entry.callback)(payload);
            } else {
                (entry.callback)(payload);
            }
            invoked += 1;
        }

        trace!(event, invoked, "Event dispatched");
        invoked
    }

    /// Removes the registration identified by `id` from `event`.
    ///
    /// Returns `false` if `event` is unknown or holds no such registration.
    pub fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let removed = self.detach(event, id);
        if removed {
            debug!(event, listener = id.as_u64(), "Listener removed");
        }
        removed
    }

    /// Removes `event` together with all its listeners.
    ///
    /// Returns `true` if at least one listener was removed.
    pub fn remove_all_listeners(&self, event: &str) -> bool {
        let entries = self.inner.listeners.write().remove(event);
        let removed = entries.map_or(0, |entries| entries.len());
        if removed > 0 {
            debug!(event, removed, "All listeners removed");
        }
        removed > 0
    }

    /// Alias of [`Emitter::remove_all_listeners`].
    pub fn remove(&self, event: &str) -> bool {
        self.remove_all_listeners(event)
    }

    /// Removes every event and every listener.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.listeners.write());
        debug!(events = drained.len(), "Emitter cleared");
    }

    /// Number of event names holding at least one listener.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.listeners.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.listeners.read().is_empty()
    }

    /// Number of listeners registered for `event`, `0` if unknown.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.listeners.read().get(event).map_or(0, Vec::len)
    }

    /// Snapshot of the registrations of `event`, in registration order.
    ///
    /// The returned handles are detached: mutating or dropping the vector
    /// leaves the emitter untouched.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Vec<ListenerHandle<T>> {
        self.inner
            .listeners
            .read()
            .get(event)
            .map(|entries| entries.iter().map(|entry| entry.handle()).collect())
            .unwrap_or_default()
    }

    /// Names of all events holding at least one listener, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.listeners.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Listener count per event above which a possible leak is reported; `0` means unlimited.
    #[must_use]
    pub fn max_listeners(&self) -> usize {
        self.inner.max_listeners.load(Ordering::Relaxed)
    }

    /// Changes the leak-warning threshold. Existing registrations are kept.
    pub fn set_max_listeners(&self, max: usize) {
        self.inner.max_listeners.store(max, Ordering::Relaxed);
    }

    fn next_id(&self) -> ListenerId {
        ListenerId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn push_entry(&self, event: String, callback: Listener<T>, once: bool) -> ListenerId {
        let id = self.next_id();
        self.push_entries(event, [(id, callback)], once);
        id
    }

    fn push_entries(
        &self,
        event: String,
        pending: impl IntoIterator<Item = (ListenerId, Listener<T>)>,
        once: bool,
    ) {
        let mut pending = pending.into_iter().peekable();
        if pending.peek().is_none() {
            return;
        }

        let (before, after) = {
            let mut listeners = self.inner.listeners.write();
            let entries = listeners.entry(event.clone()).or_default();
            let before = entries.len();
            entries.extend(
                pending.map(|(id, callback)| Arc::new(ListenerEntry::new(id, callback, once))),
            );
            (before, entries.len())
        };

        trace!(
            event = event.as_str(),
            added = after - before,
            total = after,
            once,
            "Listeners registered"
        );

        let max = self.max_listeners();
        if max != UNLIMITED_LISTENERS && before <= max && after > max {
            warn!(
                event = event.as_str(),
                count = after,
                max_listeners = max,
                "Possible listener leak: max listeners exceeded"
            );
        }
    }

    fn snapshot(&self, event: &str) -> Option<Vec<Arc<ListenerEntry<T>>>> {
        self.inner.listeners.read().get(event).cloned()
    }

    /// Unlinks one entry. The entry is dropped after the lock is released.
    fn detach(&self, event: &str, id: ListenerId) -> bool {
        let detached = {
            let mut listeners = self.inner.listeners.write();
            let Some(entries) = listeners.get_mut(event) else {
                return false;
            };
            let Some(position) = entries.iter().position(|entry| entry.id == id) else {
                return false;
            };
            let entry = entries.remove(position);
            if entries.is_empty() {
                listeners.remove(event);
            }
            entry
        };
        drop(detached);
        true
    }
}

/// Removes a fired `once` registration, also when its listener panics.
struct OnceRemoval<'a, T> {
    emitter: &'a Emitter<T>,
    event: &'a str,
    id: ListenerId,
}

impl<T> Drop for OnceRemoval<'_, T> {
    fn drop(&mut self) {
        if self.emitter.detach(self.event, self.id) {
            trace!(event = self.event, listener = self.id.as_u64(), "Once listener removed");
        }
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.len())
            .field("max_listeners", &self.max_listeners())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequences_are_not_stored() {
        let emitter = Emitter::<()>::new();
        let id = emitter.on("a", |_: &()| {});
        assert!(emitter.remove_listener("a", id));
        assert!(emitter.inner.listeners.read().get("a").is_none());
        assert!(emitter.is_empty());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let emitter = Emitter::<()>::new();
        let a = emitter.on("a", |_: &()| {});
        let b = emitter.once("b", |_: &()| {});
        let c = emitter.add_listener("a", |_: &()| {});
        assert!(a < b && b < c);
    }

    #[test]
    fn clones_share_the_registry() {
        let emitter = Emitter::<()>::new();
        let other = emitter.clone();
        other.on("shared", |_: &()| {});
        assert_eq!(emitter.listener_count("shared"), 1);
    }

    #[test]
    fn debug_output_does_not_expose_callbacks() {
        let emitter = Emitter::<()>::new();
        emitter.on("a", |_: &()| {});
        let rendered = format!("{emitter:?}");
        assert!(rendered.contains("events: 1"));
        assert!(rendered.contains("max_listeners: 0"));
    }
}
