//! Macros for declaring process-wide singletons.
//!
//! This module provides a macro-based way to put a [`SingletonHolder`](crate::SingletonHolder)
//! behind a named module of free functions.

/// Declares a process-wide singleton with a single macro invocation.
///
/// The macro generates a module containing:
/// - A holder static (hidden)
/// - `get_instance()`, returning the shared `Arc`
/// - `get()` and `is_initialized()`, which never construct
/// - `set_trace_callback()` / `clear_trace_callback()`
///
/// With two arguments the instance is built with `Default::default()`; a third
/// argument gives the constructor expression instead.
///
/// The generated module glob-imports its parent module, so the type and any
/// function named in the constructor must be items of the enclosing module.
///
/// # Examples
///
/// ```rust
/// use creational_patterns::define_singleton;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// pub struct Logger {
///     lines: std::sync::Mutex<Vec<String>>,
/// }
///
/// define_singleton!(logger, Logger);
///
/// fn main() {
///     logger::get_instance().lines.lock().unwrap().push("started".to_string());
///
///     let a = logger::get_instance();
///     let b = logger::get_instance();
///     assert!(Arc::ptr_eq(&a, &b));
///     assert_eq!(b.lines.lock().unwrap().len(), 1);
/// }
/// ```
///
/// # Custom Constructor
///
/// ```rust
/// use creational_patterns::define_singleton;
///
/// pub struct Config {
///     endpoint: String,
/// }
///
/// define_singleton!(config, Config, Config { endpoint: "localhost:5432".to_string() });
///
/// fn main() {
///     assert!(!config::is_initialized());
///     assert_eq!(config::get_instance().endpoint, "localhost:5432");
///     assert!(config::is_initialized());
/// }
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($name:ident, $ty:ty) => {
        $crate::define_singleton!($name, $ty, <$ty as ::std::default::Default>::default());
    };
    ($name:ident, $ty:ty, $init:expr) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::Arc;

            // Holder for the one instance (module-private)
            static HOLDER: $crate::SingletonHolder<$ty> = $crate::SingletonHolder::new();

            /// Return the shared instance, constructing it on first access.
            pub fn get_instance() -> Arc<$ty> {
                HOLDER.get_or_init(|| $init)
            }

            /// Return the instance if it has already been constructed.
            pub fn get() -> Option<Arc<$ty>> {
                HOLDER.get()
            }

            /// Check whether the instance has been constructed.
            pub fn is_initialized() -> bool {
                HOLDER.is_initialized()
            }

            /// Set a tracing callback for initialization events.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::PatternEvent) + Send + Sync + 'static,
            ) {
                HOLDER.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                HOLDER.clear_trace_callback()
            }
        }
    };
}
