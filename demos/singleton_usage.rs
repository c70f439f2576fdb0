//! Singleton example for creational-patterns.
//!
//! Demonstrates:
//! - A process-wide singleton declared with `define_singleton!`
//! - A type that owns its holder through the `Singleton` trait
//! - Retry after a failed construction
//! - Many threads racing on first access
//!
//! Run with: `cargo run --example singleton_usage`

use creational_patterns::{define_singleton, Singleton, SingletonHolder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
pub struct AppSettings {
    pub api_endpoint: String,
    pub timeout_ms: u64,
}

define_singleton!(
    settings,
    AppSettings,
    AppSettings {
        api_endpoint: "https://api.example.com".to_string(),
        timeout_ms: 5000,
    }
);

static DIAL_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Database {
    url: String,
}

impl Singleton for Database {
    type Error = String;

    fn holder() -> &'static SingletonHolder<Self> {
        static HOLDER: SingletonHolder<Database> = SingletonHolder::new();
        &HOLDER
    }

    fn construct() -> Result<Self, Self::Error> {
        // The first dial fails, the second succeeds.
        if DIAL_ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err("connection refused".to_string());
        }
        Ok(Database {
            url: "postgres://localhost".to_string(),
        })
    }
}

fn main() {
    println!("=== creational-patterns: Singletons ===\n");

    // -------------------------------------------------------------------------
    // 1. Macro-declared singleton
    // -------------------------------------------------------------------------
    println!("1. define_singleton!...");

    settings::set_trace_callback(|event| println!("   [trace] {event}"));
    println!("   initialized before access: {}", settings::is_initialized());

    let a = settings::get_instance();
    let b = settings::get_instance();
    println!("   {} (timeout: {}ms)", a.api_endpoint, a.timeout_ms);
    println!("   Same Arc? {}", Arc::ptr_eq(&a, &b));

    // -------------------------------------------------------------------------
    // 2. Retry after failure
    // -------------------------------------------------------------------------
    println!("\n2. Singleton trait with a fallible constructor...");

    match Database::instance() {
        Ok(db) => println!("   Connected: {}", db.url),
        Err(e) => println!("   First attempt failed (expected): {e}"),
    }
    println!("   Initialized? {}", Database::holder().is_initialized());

    let db = Database::instance().unwrap();
    println!("   Second attempt connected: {}", db.url);

    // -------------------------------------------------------------------------
    // 3. Racing threads
    // -------------------------------------------------------------------------
    println!("\n3. 64 threads racing on a fresh holder...");

    let holder: Arc<SingletonHolder<String>> = Arc::new(SingletonHolder::new());
    let builds = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let holder = holder.clone();
            let builds = builds.clone();
            thread::spawn(move || {
                holder.get_or_init(|| {
                    builds.fetch_add(1, Ordering::SeqCst);
                    format!("built by thread {i}")
                })
            })
        })
        .collect();

    let winners: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    println!("   Constructions: {}", builds.load(Ordering::SeqCst));
    println!("   Value: {}", winners[0]);
    println!(
        "   All threads share it? {}",
        winners.iter().all(|w| Arc::ptr_eq(w, &winners[0]))
    );

    println!("\n=== Example Complete ===");
}
