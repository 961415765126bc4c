//! # Emitter
//!
//! A thread-safe, synchronous, in-process event emitter.
//!
//! ## Overview
//!
//! An [`Emitter`] maps event names to ordered listener lists and dispatches a
//! payload to them on the caller's thread. One payload type per emitter: use a
//! tuple, struct or enum when an event carries several values.
//!
//! ## Features
//!
//! * **Ordered**: listeners of one event fire in registration order.
//! * **Once**: single-fire registrations, invoked at most once even under
//!   concurrent emissions.
//! * **Removable**: every registration returns a [`ListenerId`] token.
//! * **Reentrant**: dispatch runs over a snapshot without holding the lock,
//!   so listeners can register, remove and emit freely.
//! * **Fast**: `FxHashMap` + `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use herald_emitter::Emitter;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let emitter = Emitter::<String>::new();
//! let joined = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&joined);
//! let id = emitter.on("user_joined", move |_user: &String| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! emitter.emit("user_joined", &"alice".to_owned());
//! emitter.emit("user_left", &"alice".to_owned());
//! assert_eq!(joined.load(Ordering::Relaxed), 1);
//!
//! assert!(emitter.remove_listener("user_joined", id));
//! assert_eq!(emitter.len(), 0);
//! ```

mod config;
mod emitter;
mod events;
mod listener;

pub use config::{EmitterConfig, UNLIMITED_LISTENERS};
pub use emitter::Emitter;
pub use events::Events;
pub use listener::{Listener, ListenerHandle, ListenerId, listener};
