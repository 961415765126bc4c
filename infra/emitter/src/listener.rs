use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared callback type stored by the [`Emitter`](crate::Emitter).
///
/// Listeners receive a shared reference to the emitted payload and return nothing.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Wraps a closure into a [`Listener`].
///
/// Handy for the variadic registration helpers, which need every listener
/// erased to the same type.
///
/// ```rust
/// use herald_emitter::{Emitter, listener};
///
/// let emitter = Emitter::<u32>::new();
/// let ids = emitter.on_all("tick", [listener(|_: &u32| {}), listener(|_: &u32| {})]);
/// assert_eq!(ids.len(), 2);
/// ```
pub fn listener<T>(callback: impl Fn(&T) + Send + Sync + 'static) -> Listener<T> {
    Arc::new(callback)
}

/// Opaque token identifying a single registration.
///
/// Returned by every registration method and accepted by
/// [`Emitter::remove_listener`](crate::Emitter::remove_listener). Ids are unique
/// per emitter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, mostly useful for logging.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

pub(crate) struct ListenerEntry<T> {
    pub(crate) id: ListenerId,
    pub(crate) callback: Listener<T>,
    pub(crate) once: bool,
    fired: AtomicBool,
}

impl<T> ListenerEntry<T> {
    pub(crate) const fn new(id: ListenerId, callback: Listener<T>, once: bool) -> Self {
        Self { id, callback, once, fired: AtomicBool::new(false) }
    }

    /// Claims the single invocation of a `once` entry.
    ///
    /// Returns `false` if another emission got there first. Regular entries
    /// can always be invoked.
    pub(crate) fn claim(&self) -> bool {
        !self.once || !self.fired.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn handle(&self) -> ListenerHandle<T> {
        ListenerHandle { id: self.id, once: self.once, callback: Arc::clone(&self.callback) }
    }
}

impl<T> fmt::Debug for ListenerEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("id", &self.id)
            .field("once", &self.once)
            .field("fired", &self.fired.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A detached view of one registration, as returned by
/// [`Emitter::listeners`](crate::Emitter::listeners).
///
/// Holding or dropping handles has no effect on the emitter. Calling
/// [`ListenerHandle::call`] invokes the callback directly and does not consume
/// a `once` registration.
pub struct ListenerHandle<T> {
    id: ListenerId,
    once: bool,
    callback: Listener<T>,
}

impl<T> ListenerHandle<T> {
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the registration is removed after its first emission.
    #[must_use]
    pub const fn is_once(&self) -> bool {
        self.once
    }

    pub fn call(&self, payload: &T) {
        (self.callback)(payload);
    }
}

impl<T> Clone for ListenerHandle<T> {
    fn clone(&self) -> Self {
        Self { id: self.id, once: self.once, callback: Arc::clone(&self.callback) }
    }
}

impl<T> fmt::Debug for ListenerHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_entry_is_claimed_a_single_time() {
        let entry = ListenerEntry::new(ListenerId::new(1), listener(|_: &()| {}), true);
        assert!(entry.claim());
        assert!(!entry.claim());
    }

    #[test]
    fn regular_entry_is_always_claimable() {
        let entry = ListenerEntry::new(ListenerId::new(2), listener(|_: &()| {}), false);
        assert!(entry.claim());
        assert!(entry.claim());
    }

    #[test]
    fn listener_id_display() {
        assert_eq!(ListenerId::new(7).to_string(), "listener#7");
        assert_eq!(ListenerId::new(7).as_u64(), 7);
    }
}
