//! Tests for the named `EventEmitter`.

use std::sync::{Arc, Mutex};

use tapresearch_engine::{EventEmitter, Subscription};

/// Helper: create a shared call-log that listeners append to.
fn make_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn emit_only_reaches_listeners_of_that_name() {
    let emitter: EventEmitter<i32> = EventEmitter::new();
    let log = make_log();

    {
        let log = Arc::clone(&log);
        emitter.add_listener("ready", move |e| log.lock().unwrap().push(format!("ready:{e}")));
    }
    {
        let log = Arc::clone(&log);
        emitter.add_listener("gone", move |e| log.lock().unwrap().push(format!("gone:{e}")));
    }

    assert_eq!(emitter.emit("ready", &1), 1);
    assert_eq!(emitter.emit("unknown", &2), 0);

    assert_eq!(*log.lock().unwrap(), vec!["ready:1"]);
}

#[test]
fn listeners_run_in_registration_order() {
    let emitter: EventEmitter<i32> = EventEmitter::new();
    let log = make_log();

    for name in ["a", "b", "c"] {
        let log = Arc::clone(&log);
        emitter.add_listener("tick", move |e| log.lock().unwrap().push(format!("{name}:{e}")));
    }

    emitter.emit("tick", &7);
    assert_eq!(*log.lock().unwrap(), vec!["a:7", "b:7", "c:7"]);
}

#[test]
fn removed_subscription_is_not_called_and_double_remove_is_safe() {
    let emitter: EventEmitter<i32> = EventEmitter::new();
    let log = make_log();
    let log_clone = Arc::clone(&log);

    let sub = emitter.add_listener("tick", move |e| log_clone.lock().unwrap().push(format!("{e}")));
    emitter.remove_subscription(&sub);
    emitter.remove_subscription(&sub);
    emitter.emit("tick", &1);

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(emitter.size(), 0);
}

#[test]
fn remove_all_listeners_only_clears_one_name() {
    let emitter: EventEmitter<i32> = EventEmitter::new();
    emitter.add_listener("a", |_| {});
    emitter.add_listener("a", |_| {});
    emitter.add_listener("b", |_| {});

    emitter.remove_all_listeners("a");

    assert_eq!(emitter.listener_count("a"), 0);
    assert_eq!(emitter.listener_count("b"), 1);
}

#[test]
fn listener_removed_during_emit_still_runs_that_round() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let log = make_log();

    let victim_log = Arc::clone(&log);
    let victim_slot = Arc::new(Mutex::new(None::<Subscription>));

    let remover_emitter = Arc::clone(&emitter);
    let remover_slot = Arc::clone(&victim_slot);
    emitter.add_listener("tick", move |_| {
        if let Some(sub) = remover_slot.lock().unwrap().take() {
            remover_emitter.remove_subscription(&sub);
        }
    });
    let victim = emitter.add_listener("tick", move |e| {
        victim_log.lock().unwrap().push(format!("victim:{e}"))
    });
    *victim_slot.lock().unwrap() = Some(victim);

    emitter.emit("tick", &1);
    emitter.emit("tick", &2);

    assert_eq!(*log.lock().unwrap(), vec!["victim:1"]);
}
