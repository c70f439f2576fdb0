use std::fmt;
use std::sync::{Arc, Mutex};

/// Events emitted by the prototype registry and singleton holders.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use creational_patterns::PatternEvent;
///
/// let event = PatternEvent::Clone { name: "cat".to_string(), found: true };
/// assert_eq!(event.to_string(), "clone { name: cat, found: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEvent {
    /// An exemplar was registered under a name.
    Register {
        /// The name the exemplar was stored under
        name: String,
        /// The concrete type of the exemplar
        type_name: &'static str,
    },

    /// An exemplar removal was requested.
    Unregister {
        name: String,
        /// Whether an exemplar was registered under the name
        found: bool,
    },

    /// A clone was requested from the registry.
    Clone { name: String, found: bool },

    /// The registry was cleared.
    Clear {},

    /// A singleton instance was constructed and published.
    Initialize {
        /// The type name of the singleton (e.g. "alloc::string::String")
        type_name: &'static str,
    },

    /// A singleton constructor returned an error; the holder stays empty.
    InitializeFailed { type_name: &'static str },
}

impl fmt::Display for PatternEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternEvent::Register { name, type_name } => {
                write!(f, "register {{ name: {name}, type_name: {type_name} }}")
            }
            PatternEvent::Unregister { name, found } => {
                write!(f, "unregister {{ name: {name}, found: {found} }}")
            }
            PatternEvent::Clone { name, found } => {
                write!(f, "clone {{ name: {name}, found: {found} }}")
            }
            PatternEvent::Clear {} => write!(f, "Clearing the Registry"),
            PatternEvent::Initialize { type_name } => {
                write!(f, "initialize {{ type_name: {type_name} }}")
            }
            PatternEvent::InitializeFailed { type_name } => {
                write!(f, "initialize failed {{ type_name: {type_name} }}")
            }
        }
    }
}

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `PatternEvent` every time a registry or
/// holder is interacted with. It must be thread-safe because singleton holders are
/// usually shared across threads.
pub type TraceCallback = dyn Fn(&PatternEvent) + Send + Sync + 'static;

/// Slot for an optional tracing callback, embedded in every registry and holder.
pub(crate) struct TraceHook {
    callback: Mutex<Option<Arc<TraceCallback>>>,
}

impl TraceHook {
    pub(crate) const fn new() -> Self {
        Self {
            callback: Mutex::new(None),
        }
    }

    pub(crate) fn set(&self, callback: impl Fn(&PatternEvent) + Send + Sync + 'static) {
        let mut guard = self.callback.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    pub(crate) fn clear(&self) {
        let mut guard = self.callback.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Logs the event and forwards it to the callback, if one is set.
    ///
    /// The callback runs after the hook lock is released, so it may replace or clear
    /// the callback itself.
    pub(crate) fn emit(&self, event: &PatternEvent) {
        tracing::trace!(%event, "pattern event");

        let callback = self
            .callback
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl Default for TraceHook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TraceHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed = self
            .callback
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        f.debug_struct("TraceHook")
            .field("installed", &installed)
            .finish()
    }
}
