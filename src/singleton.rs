//! Lazily constructed, thread-safe single instances.
//!
//! A [`SingletonHolder`] owns one slot for one value. The first caller to reach an
//! empty slot constructs the value; every caller after that, on any thread, gets
//! the same `Arc`. Holders are ordinary values: tests build fresh ones, while
//! process-wide singletons put one in a `static` (see [`define_singleton!`]).
//!
//! # Examples
//!
//! ```
//! use creational_patterns::SingletonHolder;
//! use std::sync::Arc;
//!
//! static GREETING: SingletonHolder<String> = SingletonHolder::new();
//!
//! let first = GREETING.get_or_init(|| "hello".to_string());
//! let second = GREETING.get_or_init(|| "ignored".to_string());
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(&*second, "hello");
//! ```
//!
//! [`define_singleton!`]: crate::define_singleton

use std::{
    fmt,
    sync::{Arc, Mutex, OnceLock},
};

use crate::pattern_event::TraceHook;
use crate::PatternEvent;

/// Holds at most one instance of `T`, created on first access.
///
/// Initialization uses double-checked locking: a lock-free read of the slot, then,
/// on a miss, the init lock and a second read before constructing. The slot only
/// goes from empty to full, and the value is published through `OnceLock`, so
/// every reader sees a fully constructed instance.
///
/// Constructing the same holder from inside its own constructor deadlocks.
pub struct SingletonHolder<T> {
    slot: OnceLock<Arc<T>>,
    init_lock: Mutex<()>,
    trace: TraceHook,
}

impl<T> SingletonHolder<T> {
    /// Creates an empty holder. Usable in `static` items.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init_lock: Mutex::new(()),
            trace: TraceHook::new(),
        }
    }

    /// Returns the instance if it has been constructed. Never constructs.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Set a tracing callback for initialization events on this holder.
    pub fn set_trace_callback(&self, callback: impl Fn(&PatternEvent) + Send + Sync + 'static) {
        self.trace.set(callback);
    }

    /// Clear the tracing callback.
    pub fn clear_trace_callback(&self) {
        self.trace.clear();
    }

    /// Returns the instance, constructing it with `T::default()` on first access.
    pub fn get_instance(&self) -> Arc<T>
    where
        T: Default,
    {
        self.get_or_init(T::default)
    }

    /// Returns the instance, constructing it with `init` on first access.
    ///
    /// `init` runs at most once per holder, no matter how many threads race here.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        match self.get_or_try_init(|| Ok::<T, std::convert::Infallible>(init())) {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }

    /// Returns the instance, constructing it with the fallible `init` on first access.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `init` unchanged. The holder stays empty, so a
    /// later call runs its constructor again.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        // Fast path, no lock.
        if let Some(instance) = self.slot.get() {
            return Ok(instance.clone());
        }

        let outcome = {
            // A constructor that panicked poisons the lock but never wrote the slot.
            let _guard = self.init_lock.lock().unwrap_or_else(|p| p.into_inner());

            match self.slot.get() {
                // Another thread finished construction while we waited for the lock.
                Some(instance) => return Ok(instance.clone()),
                None => init().map(|value| {
                    let instance = Arc::new(value);
                    // Only the holder of `init_lock` writes the slot, so this cannot fail.
                    let _ = self.slot.set(instance.clone());
                    instance
                }),
            }
        };

        let type_name = std::any::type_name::<T>();
        match &outcome {
            Ok(_) => {
                tracing::debug!(type_name, "singleton initialized");
                self.trace.emit(&PatternEvent::Initialize { type_name });
            }
            Err(_) => {
                tracing::debug!(type_name, "singleton construction failed");
                self.trace.emit(&PatternEvent::InitializeFailed { type_name });
            }
        }

        outcome
    }
}

impl<T> Default for SingletonHolder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SingletonHolder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonHolder")
            .field("slot", &self.slot.get())
            .finish_non_exhaustive()
    }
}

/// A type that owns a process-wide [`SingletonHolder`] for itself.
///
/// Implementors name their holder and their construction path; [`Singleton::instance`]
/// routes every access through the holder.
///
/// # Examples
///
/// ```
/// use creational_patterns::{Singleton, SingletonHolder};
/// use std::sync::Arc;
///
/// struct Settings {
///     verbose: bool,
/// }
///
/// impl Singleton for Settings {
///     type Error = std::convert::Infallible;
///
///     fn holder() -> &'static SingletonHolder<Self> {
///         static HOLDER: SingletonHolder<Settings> = SingletonHolder::new();
///         &HOLDER
///     }
///
///     fn construct() -> Result<Self, Self::Error> {
///         Ok(Settings { verbose: true })
///     }
/// }
///
/// let a = Settings::instance().unwrap();
/// let b = Settings::instance().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(a.verbose);
/// ```
pub trait Singleton: Sized + Send + Sync + 'static {
    /// Error returned by [`Singleton::construct`].
    type Error;

    /// Access the holder static.
    fn holder() -> &'static SingletonHolder<Self>;

    /// Builds the one instance. Called at most once per successful initialization.
    fn construct() -> Result<Self, Self::Error>;

    /// Returns the shared instance, constructing it on first access.
    ///
    /// # Errors
    ///
    /// Whatever [`Singleton::construct`] returns; the next call retries.
    fn instance() -> Result<Arc<Self>, Self::Error> {
        Self::holder().get_or_try_init(Self::construct)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_sequential_access_returns_same_instance() {
        let holder: SingletonHolder<Vec<u8>> = SingletonHolder::new();
        assert!(!holder.is_initialized());
        assert!(holder.get().is_none());

        let first = holder.get_instance();
        let second = holder.get_instance();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(holder.is_initialized());
        assert!(Arc::ptr_eq(&holder.get().unwrap(), &first));
    }

    #[test]
    fn test_constructor_runs_once() {
        let holder = SingletonHolder::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..10 {
            let value = holder.get_or_init(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                42u32
            });
            assert_eq!(*value, 42);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_construction_leaves_slot_empty() {
        let holder: SingletonHolder<String> = SingletonHolder::new();

        let result = holder.get_or_try_init(|| Err::<String, _>("database offline"));
        assert_eq!(result.unwrap_err(), "database offline");
        assert!(!holder.is_initialized());

        let retried = holder
            .get_or_try_init(|| Ok::<_, &str>("connected".to_string()))
            .unwrap();
        assert_eq!(&*retried, "connected");
        assert!(holder.is_initialized());
    }

    #[test]
    fn test_panicking_constructor_allows_retry() {
        let holder: Arc<SingletonHolder<u64>> = Arc::new(SingletonHolder::new());

        let panicking = holder.clone();
        let joined = thread::spawn(move || {
            panicking.get_or_init(|| panic!("constructor blew up"));
        })
        .join();
        assert!(joined.is_err());
        assert!(!holder.is_initialized());

        assert_eq!(*holder.get_or_init(|| 7), 7);
    }

    #[test]
    fn test_concurrent_first_access() {
        const THREADS: usize = 64;

        let holder: Arc<SingletonHolder<String>> = Arc::new(SingletonHolder::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let holder = holder.clone();
                let calls = calls.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    holder.get_or_init(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        format!("built by {i}")
                    })
                })
            })
            .collect();

        let instances: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
    }

    #[test]
    fn test_trace_events() {
        let holder: SingletonHolder<u8> = SingletonHolder::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        holder.set_trace_callback(move |e| {
            events_clone.lock().unwrap().push(e.to_string());
        });

        let _ = holder.get_or_try_init(|| Err::<u8, ()>(()));
        let _ = holder.get_instance();
        let _ = holder.get_instance();

        holder.clear_trace_callback();

        let captured = events.lock().unwrap();
        assert_eq!(
            *captured,
            vec![
                "initialize failed { type_name: u8 }",
                "initialize { type_name: u8 }",
            ]
        );
    }

    #[test]
    fn test_trait_instance() {
        struct Counter {
            start: u32,
        }

        static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

        impl Singleton for Counter {
            type Error = String;

            fn holder() -> &'static SingletonHolder<Self> {
                static HOLDER: SingletonHolder<Counter> = SingletonHolder::new();
                &HOLDER
            }

            fn construct() -> Result<Self, Self::Error> {
                CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
                Ok(Counter { start: 10 })
            }
        }

        let a = Counter::instance().unwrap();
        let b = Counter::instance().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.start, 10);
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_format() {
        let holder: SingletonHolder<i32> = SingletonHolder::new();
        assert_eq!(format!("{:?}", holder), "SingletonHolder { slot: None, .. }");
        holder.get_or_init(|| 3);
        assert_eq!(format!("{:?}", holder), "SingletonHolder { slot: Some(3), .. }");
    }
}
