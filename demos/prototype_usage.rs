//! Prototype registry example for creational-patterns.
//!
//! Demonstrates:
//! - Registering exemplars under names
//! - Cloning by name with `clone()` (type-erased) and `clone_as()` (typed)
//! - Shallow copies: `Arc` fields are shared between exemplar and clone
//! - Handling unknown names
//!
//! Run with: `cargo run --example prototype_usage`

use creational_patterns::PrototypeRegistry;
use std::sync::{Arc, Mutex};

trait Animal {
    fn speak(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
struct Cat {
    name: String,
}

impl Animal for Cat {
    fn speak(&self) -> &'static str {
        "meow meow.."
    }
}

#[derive(Debug, Clone, Default)]
struct Dog {
    name: String,
    tricks: Arc<Mutex<Vec<String>>>,
}

impl Animal for Dog {
    fn speak(&self) -> &'static str {
        "hau hau.."
    }
}

fn main() {
    println!("=== creational-patterns: Prototype Registry ===\n");

    // -------------------------------------------------------------------------
    // 1. Register exemplars
    // -------------------------------------------------------------------------
    println!("1. Registering exemplars...");

    let mut registry = PrototypeRegistry::new();
    registry.set_trace_callback(|event| println!("   [trace] {event}"));

    registry.register("cat", Cat { name: "Tom".to_string() });

    let rex = Dog {
        name: "Rex".to_string(),
        tricks: Arc::new(Mutex::new(vec!["sit".to_string()])),
    };
    registry.register("dog", rex.clone());

    println!("   Registered: {:?}", registry.names());

    // -------------------------------------------------------------------------
    // 2. Clone by name
    // -------------------------------------------------------------------------
    println!("\n2. Cloning by name...");

    let cat = registry.clone("cat").unwrap();
    println!("   clone(\"cat\") -> {:?}", cat);

    let kitten: Cat = registry.clone_as("cat").unwrap();
    println!("   {} says {}", kitten.name, kitten.speak());

    // -------------------------------------------------------------------------
    // 3. Shallow copies share their Arc fields
    // -------------------------------------------------------------------------
    println!("\n3. Shallow copy...");

    let puppy: Dog = registry.clone_as("dog").unwrap();
    puppy.tricks.lock().unwrap().push("roll over".to_string());

    println!("   {} says {}", puppy.name, puppy.speak());
    println!("   Exemplar tricks now: {:?}", rex.tricks.lock().unwrap());
    println!("   Shared list? {}", Arc::ptr_eq(&rex.tricks, &puppy.tricks));

    // -------------------------------------------------------------------------
    // 4. Unknown names
    // -------------------------------------------------------------------------
    println!("\n4. Handling unknown names...");

    registry.unregister("cat").unwrap();
    match registry.clone("cat") {
        Ok(value) => println!("   Found: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
}
