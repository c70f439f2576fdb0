//! Prototype registry: named exemplars that hand out shallow copies of themselves.
//!
//! Callers register an exemplar under a name and later ask the registry for a fresh
//! object of the same concrete type, without naming that type at the call site.
//!
//! # Examples
//!
//! ```
//! use creational_patterns::PrototypeRegistry;
//!
//! #[derive(Clone, Default)]
//! struct Cat {
//!     name: String,
//! }
//!
//! let mut registry = PrototypeRegistry::new();
//! registry.register("cat", Cat { name: "Tom".to_string() });
//!
//! let copy: Cat = registry.clone_as("cat").unwrap();
//! assert_eq!(copy.name, "Tom");
//! ```

use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use crate::pattern_event::TraceHook;
use crate::{PatternError, PatternEvent};

/// Object-safe capability required from every exemplar.
///
/// Implemented automatically for every `Clone + Default` type, so user code never
/// implements it by hand.
pub trait Prototype: Any + Send + Sync {
    /// Builds a new, distinct object with the same field values.
    ///
    /// The copy is shallow: shared handles such as `Arc` fields keep pointing at
    /// the same referent as the exemplar's.
    fn duplicate(&self) -> Box<dyn Prototype>;

    /// Access as `Any`, for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Converts a boxed prototype into `Box<dyn Any>`, for owned downcasts.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The concrete type name of the exemplar.
    fn type_name(&self) -> &'static str;
}

impl<T> Prototype for T
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn duplicate(&self) -> Box<dyn Prototype> {
        // Start from the type's empty state and copy every field over it.
        let mut copy = T::default();
        copy.clone_from(self);
        Box::new(copy)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl fmt::Debug for dyn Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

/// A name → exemplar map that clones exemplars on request.
///
/// Last registration under a name wins. Cloning never mutates the registry.
///
/// The registry is not internally synchronized; wrap it in a `Mutex` or `RwLock`
/// when it must be shared between threads.
#[derive(Debug, Default)]
pub struct PrototypeRegistry {
    objects: HashMap<String, Arc<dyn Prototype>>,
    trace: TraceHook,
}

impl PrototypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback invoked for every registry operation.
    ///
    /// Replaces any previously set callback.
    pub fn set_trace_callback(&self, callback: impl Fn(&PatternEvent) + Send + Sync + 'static) {
        self.trace.set(callback);
    }

    /// Clear the tracing callback.
    pub fn clear_trace_callback(&self) {
        self.trace.clear();
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Registers `value` under `name`, replacing any exemplar already stored there.
    pub fn register<T: Prototype>(&mut self, name: impl Into<String>, value: T) {
        self.register_arc(name, Arc::new(value));
    }

    /// Registers an `Arc`-wrapped exemplar under `name`.
    ///
    /// The registry keeps a reference to the same allocation the caller holds,
    /// rather than taking a copy.
    pub fn register_arc<T: Prototype>(&mut self, name: impl Into<String>, value: Arc<T>) {
        let name = name.into();
        let type_name = std::any::type_name::<T>();

        tracing::debug!(name = %name, type_name, "registering prototype");
        self.trace.emit(&PatternEvent::Register {
            name: name.clone(),
            type_name,
        });

        self.objects.insert(name, value);
    }

    /// Removes the exemplar registered under `name` and returns it.
    ///
    /// # Errors
    ///
    /// - [`PatternError::KeyNotFound`] if nothing is registered under `name`
    pub fn unregister(&mut self, name: &str) -> Result<Arc<dyn Prototype>, PatternError> {
        let removed = self.objects.remove(name);

        tracing::debug!(name, found = removed.is_some(), "unregistering prototype");
        self.trace.emit(&PatternEvent::Unregister {
            name: name.to_string(),
            found: removed.is_some(),
        });

        removed.ok_or_else(|| PatternError::key_not_found(name))
    }

    /// Returns a shallow copy of the exemplar registered under `name`.
    ///
    /// Each call returns a new, distinct object.
    ///
    /// # Errors
    ///
    /// - [`PatternError::KeyNotFound`] if nothing is registered under `name`
    pub fn clone(&self, name: &str) -> Result<Box<dyn Prototype>, PatternError> {
        let exemplar = self.objects.get(name);

        self.trace.emit(&PatternEvent::Clone {
            name: name.to_string(),
            found: exemplar.is_some(),
        });

        match exemplar {
            Some(exemplar) => Ok(exemplar.duplicate()),
            None => {
                tracing::debug!(name, "clone requested for unknown prototype");
                Err(PatternError::key_not_found(name))
            }
        }
    }

    /// Clones the exemplar under `name` and downcasts the copy to `T`.
    ///
    /// # Errors
    ///
    /// - [`PatternError::KeyNotFound`] if nothing is registered under `name`
    /// - [`PatternError::TypeMismatch`] if the exemplar is not a `T`
    pub fn clone_as<T: Prototype>(&self, name: &str) -> Result<T, PatternError> {
        let copy = self.clone(name)?;
        let found = copy.type_name();

        copy.into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| PatternError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    /// Returns `true` if an exemplar is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Number of registered exemplars.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Removes every exemplar. The tracing callback is kept.
    pub fn clear(&mut self) {
        self.trace.emit(&PatternEvent::Clear {});
        self.objects.clear();
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
