//! Facade crate for the Herald event emitter.
//! Re-exports the emitter primitives and owns the process-wide default
//! instance, configuration loading and the facade error type.
//! Keep this crate thin: dispatch logic lives in `herald-emitter`.
//!
//! ## Usage
//! - Build your own [`Emitter`] when you want an isolated registry.
//! - Use the free functions ([`on`], [`once`], [`emit`], ...) for a single
//!   process-wide bus; call [`init`] first to configure it.
//!
//! ```rust
//! use herald::{DynPayload, Emitter};
//!
//! let local = Emitter::<u32>::new();
//! local.on("tick", |n: &u32| assert_eq!(*n, 1));
//! assert_eq!(local.emit("tick", &1), 1);
//!
//! herald::once("boot", |payload: &DynPayload| {
//!     assert_eq!(payload.downcast_ref::<u16>(), Some(&8080));
//! });
//! assert_eq!(herald::emit("boot", 8080_u16), 1);
//! assert_eq!(herald::listener_count("boot"), 0);
//! ```

pub mod config;
mod error;
mod global;

pub use error::{HeraldError, HeraldErrorExt, Result};
pub use global::{
    DynPayload, add_listener, clear, default_emitter, emit, emit_payload, event_names, init, len,
    listener_count, listeners, on, once, remove, remove_all_listeners, remove_listener,
};
pub use herald_emitter as emitter;
pub use herald_emitter::{
    Emitter, EmitterConfig, Events, Listener, ListenerHandle, ListenerId, listener,
};
