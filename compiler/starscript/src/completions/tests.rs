#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn globals() -> Environment {
    let env = Environment::new();
    env.set("player.name", "Eve")
        .set("player.health", 20.0)
        .set("player._secret", true)
        .set("planet", "Earth")
        .set("_hidden", 1.0);
    env.set_function("print", |_, _| Ok(Value::Null));
    env.set_function("player.greet", |_, _| Ok(Value::Null));
    env
}

fn names(source: &str, position: usize) -> Vec<(String, bool)> {
    completions(source, position, &globals())
        .into_iter()
        .map(|c| (c.name, c.is_function))
        .collect()
}

fn entry(name: &str, is_function: bool) -> (String, bool) {
    (name.to_owned(), is_function)
}

#[test]
fn test_variable_prefix() {
    assert_eq!(
        names("{pla", 4),
        vec![entry("planet", false), entry("player", false)]
    );
}

#[test]
fn test_empty_block_offers_all_globals() {
    assert_eq!(
        names("{", 1),
        vec![
            entry("planet", false),
            entry("player", false),
            entry("print", true)
        ]
    );
}

#[test]
fn test_fields_after_dot() {
    assert_eq!(
        names("{player.}", 8),
        vec![
            entry("greet", true),
            entry("health", false),
            entry("name", false)
        ]
    );
    assert_eq!(names("{player.na}", 10), vec![entry("name", false)]);
}

#[test]
fn test_inside_call_arguments() {
    assert_eq!(
        names("Hi {print(pl)}", 12),
        vec![entry("planet", false), entry("player", false)]
    );
}

#[test]
fn test_fields_of_non_map_offer_nothing() {
    assert!(names("{planet.}", 8).is_empty());
    assert!(names("{missing.}", 9).is_empty());
}

#[test]
fn test_cursor_outside_any_name() {
    assert!(names("{player} tail", 0).is_empty());
}
