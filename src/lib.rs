//! # Creational Patterns
//!
//! The Prototype and Singleton patterns, expressed with Rust ownership and types.
//!
//! - [`PrototypeRegistry`] stores named exemplars and hands out shallow copies of them.
//! - [`SingletonHolder`] holds at most one lazily constructed instance of a type and
//!   is safe to race on from many threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use creational_patterns::{PrototypeRegistry, SingletonHolder};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Default)]
//! struct Cat;
//!
//! impl Cat {
//!     fn speak(&self) -> &'static str {
//!         "meow meow.."
//!     }
//! }
//!
//! // Prototype: clone by name
//! let mut registry = PrototypeRegistry::new();
//! registry.register("cat", Cat);
//! let kitten: Cat = registry.clone_as("cat").unwrap();
//! assert_eq!(kitten.speak(), "meow meow..");
//!
//! // Singleton: one instance, built on first access
//! let holder: SingletonHolder<Vec<u8>> = SingletonHolder::new();
//! assert!(Arc::ptr_eq(&holder.get_instance(), &holder.get_instance()));
//! ```
//!
//! ## Features
//!
//! - **Thread-safe singletons**: double-checked initialization, exactly one construction
//! - **Retry on failure**: a failed constructor leaves the holder empty
//! - **Type-erased prototypes**: any `Clone + Default` type can be an exemplar
//! - **Tracing support**: optional callback plus `tracing` events for every operation
//!
//! ## Main Items
//!
//! - [`PrototypeRegistry`] - `register`, `unregister`, `clone`, `clone_as`
//! - [`SingletonHolder`] - `get_instance`, `get_or_init`, `get_or_try_init`
//! - [`Singleton`] - trait for types that own their holder
//! - [`define_singleton!`] - declare a process-wide singleton module

mod macros;
mod pattern_error;
mod pattern_event;
mod prototype;
mod singleton;

pub use pattern_error::PatternError;
pub use pattern_event::{PatternEvent, TraceCallback};
pub use prototype::{Prototype, PrototypeRegistry};
pub use singleton::{Singleton, SingletonHolder};
