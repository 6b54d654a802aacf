#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_set_and_get() {
    let env = Environment::new();
    env.set("a", 1.0).set("b", "two");
    assert_eq!(env.get("a"), Some(Value::from(1.0)));
    assert_eq!(env.get("b"), Some(Value::from("two")));
    assert_eq!(env.get("c"), None);
    assert_eq!(env.len(), 2);
}

#[test]
fn test_dotted_set_creates_maps() {
    let env = Environment::new();
    env.set("player.name", "Eve").set("player.pos.x", 3.0);

    let player = env.get("player").unwrap();
    assert_eq!(player.type_name(), "map");
    assert_eq!(env.get("player.name"), Some(Value::from("Eve")));
    assert_eq!(env.get("player.pos.x"), Some(Value::from(3.0)));
    assert_eq!(player.as_map().unwrap().get("pos.x"), Some(Value::from(3.0)));
}

#[test]
fn test_dotted_set_overwrites_non_map() {
    let env = Environment::new();
    env.set("player", 5.0);
    env.set("player.name", "Eve");
    assert_eq!(env.get("player.name"), Some(Value::from("Eve")));
}

#[test]
fn test_get_through_non_map_is_none() {
    let env = Environment::new();
    env.set("player", "Eve");
    assert_eq!(env.get("player.name"), None);
    assert_eq!(env.get("missing.name"), None);
}

#[test]
fn test_get_raw_keeps_dots() {
    let env = Environment::new();
    env.0.write().insert("x.y".into(), Slot::Value(Value::from(1.0)));
    assert_eq!(env.get_raw("x.y"), Some(Value::from(1.0)));
    assert_eq!(env.get("x.y"), None);
}

#[test]
fn test_lazy_evaluates_on_each_read() {
    let env = Environment::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    env.set_lazy("tick", move || {
        Value::from(probe.fetch_add(1, Ordering::SeqCst) as f64)
    });

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(env.get("tick"), Some(Value::from(0.0)));
    assert_eq!(env.get("tick"), Some(Value::from(1.0)));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_lazy_may_read_its_own_environment() {
    let env = Environment::new();
    env.set("base", 10.0);
    let inner = env.clone();
    env.set_lazy("double", move || {
        let base = inner.get("base").and_then(|v| v.as_number()).unwrap_or(0.0);
        Value::from(base * 2.0)
    });
    assert_eq!(env.get("double"), Some(Value::from(20.0)));
}

#[test]
fn test_remove() {
    let env = Environment::new();
    env.set("player.name", "Eve").set("player.age", 30.0);

    assert!(env.remove("player.name").is_some());
    assert_eq!(env.get("player.name"), None);
    assert_eq!(env.get("player.age"), Some(Value::from(30.0)));

    assert!(env.remove("missing.name").is_none());
    assert!(env.remove("nothing").is_none());
}

#[test]
fn test_remove_through_non_map_removes_head() {
    let env = Environment::new();
    env.set("score", 5.0);
    assert!(env.remove("score.best").is_some());
    assert!(!env.contains("score"));
}

#[test]
fn test_keys_and_clear() {
    let env = Environment::new();
    env.set("b", 1.0).set("a", 2.0);
    let mut keys = env.keys();
    keys.sort();
    assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);

    env.clear();
    assert!(env.is_empty());
}

#[test]
fn test_clones_share_table() {
    let env = Environment::new();
    let other = env.clone();
    other.set("x", true);
    assert_eq!(env.get("x"), Some(Value::from(true)));
    assert!(env.ptr_eq(&other));
    assert!(!env.ptr_eq(&Environment::new()));
}

#[test]
fn test_shared_across_threads() {
    let env = Environment::new();
    env.set("n", 1.0);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let env = env.clone();
            std::thread::spawn(move || {
                env.set(&format!("t{i}"), f64::from(i));
                env.get("n")
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(Value::from(1.0)));
    }
    assert_eq!(env.len(), 5);
}

#[test]
fn test_concurrent_dotted_sets_share_one_map() {
    let env = Environment::new();
    let barrier = Arc::new(std::sync::Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let env = env.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for j in 0..50 {
                    env.set(&format!("shared.t{i}_{j}"), 1.0);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let Some(Value::Map(shared)) = env.get("shared") else {
        panic!("expected map");
    };
    assert_eq!(shared.len(), 400);
}

#[test]
fn test_dotted_set_writes_through_lazy_map() {
    let env = Environment::new();
    let backing = Environment::new();
    let supplied = backing.clone();
    env.set_lazy("player", move || Value::Map(supplied.clone()));

    env.set("player.name", "Eve");
    assert_eq!(backing.get("name"), Some(Value::from("Eve")));
    assert_eq!(env.get("player.name"), Some(Value::from("Eve")));

    env.set_lazy("score", || Value::from(3.0));
    env.set("score.best", 9.0);
    assert_eq!(env.get("score.best"), Some(Value::from(9.0)));
}
