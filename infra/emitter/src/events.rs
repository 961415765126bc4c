use crate::emitter::Emitter;
use crate::listener::{Listener, ListenerId};
use std::fmt;
use std::sync::Arc;

/// An ordered batch of `(event, listeners)` registrations.
///
/// Lets a module declare its listeners up front and attach them to any
/// emitter in one call.
///
/// # Examples
/// ```rust
/// use herald_emitter::{Emitter, Events};
///
/// let events = Events::<String>::new()
///     .with("user_created", |_: &String| {})
///     .with("user_joined", |_: &String| {})
///     .with("user_joined", |_: &String| {});
///
/// let emitter = Emitter::new();
/// let ids = events.register(&emitter);
/// assert_eq!(ids.len(), 3);
/// assert_eq!(emitter.len(), 2);
/// assert_eq!(emitter.listener_count("user_joined"), 2);
/// ```
pub struct Events<T> {
    entries: Vec<(String, Vec<Listener<T>>)>,
}

impl<T> Events<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds `listener` to `event`, builder style.
    #[must_use]
    pub fn with(
        mut self,
        event: impl Into<String>,
        listener: impl Fn(&T) + Send + Sync + 'static,
    ) -> Self {
        self.insert(event, Arc::new(listener));
        self
    }

    /// Adds `listener` to `event`. Events keep the position of their first insertion.
    pub fn insert(&mut self, event: impl Into<String>, listener: Listener<T>) {
        let event = event.into();
        match self.entries.iter_mut().find(|(name, _)| *name == event) {
            Some((_, listeners)) => listeners.push(listener),
            None => self.entries.push((event, vec![listener])),
        }
    }

    /// Number of distinct events in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers every listener on `emitter`, event by event, in insertion order.
    ///
    /// The batch is left intact and can be registered on several emitters.
    pub fn register(&self, emitter: &Emitter<T>) -> Vec<ListenerId> {
        self.entries
            .iter()
            .flat_map(|(event, listeners)| {
                emitter.on_all(event.as_str(), listeners.iter().map(Arc::clone))
            })
            .collect()
    }
}

impl<T> Default for Events<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Events<T>> for Emitter<T> {
    fn from(events: Events<T>) -> Self {
        let emitter = Self::new();
        events.register(&emitter);
        emitter
    }
}

impl<T> fmt::Debug for Events<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(event, listeners)| (event, listeners.len())))
            .finish()
    }
}
