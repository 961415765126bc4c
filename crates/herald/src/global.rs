//! Process-wide default emitter and the free functions delegating to it.
//!
//! The instance is created once, either explicitly through [`init`] or lazily
//! with [`EmitterConfig::default`] on first use, and lives until process exit.
//! It is never recreated: [`clear`] empties it instead.

use crate::error::{HeraldError, Result};
use herald_emitter::{Emitter, EmitterConfig, ListenerHandle, ListenerId};
use std::any::Any;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Type-erased payload carried by the default emitter.
///
/// Listeners recover the concrete value with `downcast_ref`.
pub type DynPayload = Arc<dyn Any + Send + Sync>;

static DEFAULT: OnceLock<Emitter<DynPayload>> = OnceLock::new();

/// Creates the default emitter with `config`.
///
/// # Errors
/// Returns [`HeraldError::AlreadyInitialized`] if the default emitter already
/// exists, whether from an earlier `init` or from lazy creation.
pub fn init(config: &EmitterConfig) -> Result<&'static Emitter<DynPayload>> {
    let mut created = false;
    let emitter = DEFAULT.get_or_init(|| {
        created = true;
        Emitter::with_config(config)
    });

    if !created {
        return Err(HeraldError::AlreadyInitialized {
            message: "default emitter exists and is never recreated".into(),
            context: None,
        });
    }

    debug!(max_listeners = config.max_listeners, "Default emitter initialized");
    Ok(emitter)
}

/// The shared emitter, created with the default configuration if needed.
pub fn default_emitter() -> &'static Emitter<DynPayload> {
    DEFAULT.get_or_init(|| {
        debug!("Default emitter created lazily");
        Emitter::new()
    })
}

/// See [`Emitter::on`].
pub fn on(
    event: impl Into<String>,
    listener: impl Fn(&DynPayload) + Send + Sync + 'static,
) -> ListenerId {
    default_emitter().on(event, listener)
}

/// See [`Emitter::add_listener`].
pub fn add_listener(
    event: impl Into<String>,
    listener: impl Fn(&DynPayload) + Send + Sync + 'static,
) -> ListenerId {
    default_emitter().add_listener(event, listener)
}

/// See [`Emitter::once`].
pub fn once(
    event: impl Into<String>,
    listener: impl Fn(&DynPayload) + Send + Sync + 'static,
) -> ListenerId {
    default_emitter().once(event, listener)
}

/// Wraps `payload` and emits it; see [`Emitter::emit`].
///
/// ```rust
/// let id = herald::on("greeting", |payload: &herald::DynPayload| {
///     assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("hello"));
/// });
/// assert_eq!(herald::emit("greeting", String::from("hello")), 1);
/// herald::remove_listener("greeting", id);
/// ```
pub fn emit<P: Any + Send + Sync>(event: &str, payload: P) -> usize {
    let payload: DynPayload = Arc::new(payload);
    emit_payload(event, &payload)
}

/// Emits an already shared payload without re-wrapping.
pub fn emit_payload(event: &str, payload: &DynPayload) -> usize {
    default_emitter().emit(event, payload)
}

/// See [`Emitter::remove_listener`].
pub fn remove_listener(event: &str, id: ListenerId) -> bool {
    default_emitter().remove_listener(event, id)
}

/// See [`Emitter::remove_all_listeners`].
pub fn remove_all_listeners(event: &str) -> bool {
    default_emitter().remove_all_listeners(event)
}

/// See [`Emitter::remove`].
pub fn remove(event: &str) -> bool {
    default_emitter().remove(event)
}

/// See [`Emitter::clear`].
pub fn clear() {
    default_emitter().clear();
}

/// See [`Emitter::len`].
#[must_use]
pub fn len() -> usize {
    default_emitter().len()
}

/// See [`Emitter::listener_count`].
#[must_use]
pub fn listener_count(event: &str) -> usize {
    default_emitter().listener_count(event)
}

/// See [`Emitter::listeners`].
#[must_use]
pub fn listeners(event: &str) -> Vec<ListenerHandle<DynPayload>> {
    default_emitter().listeners(event)
}

/// See [`Emitter::event_names`].
#[must_use]
pub fn event_names() -> Vec<String> {
    default_emitter().event_names()
}
