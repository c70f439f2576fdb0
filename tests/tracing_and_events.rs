//! Integration tests for tracing and event monitoring.
//!
//! This test demonstrates how to use the tracing callback system to monitor
//! registry and holder operations, which is useful for debugging and logging.

use creational_patterns::{PatternEvent, PrototypeRegistry, SingletonHolder};
use std::sync::{Arc, Mutex};

fn collect_into(events: &Arc<Mutex<Vec<String>>>) -> impl Fn(&PatternEvent) + Send + Sync {
    let events = events.clone();
    move |event| events.lock().unwrap().push(event.to_string())
}

#[test]
fn test_registry_tracing() {
    let mut registry = PrototypeRegistry::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    registry.set_trace_callback(collect_into(&events));

    registry.register("answer", 42i32);
    let _ = registry.clone("answer");
    let _ = registry.unregister("answer");
    let _ = registry.unregister("answer");

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 4);
    assert_eq!(captured[0], "register { name: answer, type_name: i32 }");
    assert_eq!(captured[1], "clone { name: answer, found: true }");
    assert_eq!(captured[2], "unregister { name: answer, found: true }");
    assert_eq!(captured[3], "unregister { name: answer, found: false }");
}

#[test]
fn test_clear_trace_callback_stops_events() {
    let mut registry = PrototypeRegistry::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    registry.set_trace_callback(collect_into(&events));

    registry.register("a", 1u8);
    registry.clear_trace_callback();
    registry.register("b", 2u8);
    let _ = registry.clone("b");

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_registries_trace_independently() {
    let mut traced = PrototypeRegistry::new();
    let mut silent = PrototypeRegistry::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    traced.set_trace_callback(collect_into(&events));

    traced.register("x", 1u32);
    silent.register("x", 1u32);
    silent.clear();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].contains("register"));
}

#[test]
fn test_holder_tracing_reports_failure_then_success() {
    let holder: SingletonHolder<String> = SingletonHolder::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    holder.set_trace_callback(collect_into(&events));

    let _ = holder.get_or_try_init(|| Err::<String, &str>("not yet"));
    let _ = holder.get_or_init(|| "ready".to_string());
    let _ = holder.get_or_init(|| "ignored".to_string());

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            "initialize failed { type_name: alloc::string::String }",
            "initialize { type_name: alloc::string::String }",
        ]
    );
}

#[test]
fn test_callback_may_clear_itself() {
    let holder = Arc::new(SingletonHolder::<u8>::new());
    let events = Arc::new(Mutex::new(Vec::new()));

    let holder_clone = holder.clone();
    let events_clone = events.clone();
    holder.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.to_string());
        holder_clone.clear_trace_callback();
    });

    let _ = holder.get_or_try_init(|| Err::<u8, ()>(()));
    let _ = holder.get_or_try_init(|| Err::<u8, ()>(()));
    holder.get_instance();

    assert_eq!(*events.lock().unwrap(), vec!["initialize failed { type_name: u8 }"]);
    assert!(holder.is_initialized());
}
