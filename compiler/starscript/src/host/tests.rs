#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_new_installs_standard_library() {
    let ss = Starscript::new();
    assert!(ss.globals().contains("round"));
    assert!(ss.globals().contains("PI"));

    let bare = Starscript::builder().standard_lib(false).build();
    assert!(bare.globals().is_empty());
}

#[test]
fn test_compile_and_run() {
    let mut ss = Starscript::new();
    ss.set("player.name", "Eve").set("player.health", 17.5);
    let compiled = ss.compile("{player.name}: {floor(player.health)} hp");
    assert!(!compiled.has_errors());
    assert_eq!(ss.run_to_string(&compiled.script).unwrap(), "Eve: 17 hp");
}

#[test]
fn test_shared_globals() {
    let mut first = Starscript::new();
    let mut second = Starscript::with_shared_globals(&first);
    let script = first.compile("{score}").script;

    second.set("score", 10.0);
    assert_eq!(first.run_to_string(&script).unwrap(), "10");

    first.remove("score");
    assert_eq!(second.run_to_string(&script).unwrap(), "null");
}

#[test]
fn test_builder_uses_given_globals_and_options() {
    let env = Environment::new();
    env.set("x", 2.0);
    let options = CompileOptions {
        fuse_instructions: false,
    };
    let mut ss = Starscript::builder()
        .globals(env.clone())
        .options(options)
        .standard_lib(false)
        .build();

    assert_eq!(ss.options(), options);
    assert!(ss.globals().ptr_eq(&env));
    let script = ss.compile("{x}").script;
    assert_eq!(
        script.code()[0],
        star_eval::Opcode::Variable.as_byte(),
    );
    assert_eq!(ss.run_to_string(&script).unwrap(), "2");
}

#[test]
fn test_lazy_and_function_globals() {
    let mut ss = Starscript::new();
    ss.set_lazy("fps", || Value::from(60.0));
    ss.set_function("greet", |vm, _| {
        let name = vm.pop_string("greet() needs a string.")?;
        Ok(Value::from(format!("hello {name}")))
    });
    let script = ss.compile("{greet('you')} @ {fps}").script;
    assert_eq!(ss.run_to_string(&script).unwrap(), "hello you @ 60");

    ss.clear();
    assert_eq!(ss.run_to_string(&script).unwrap_err().to_string(),
        "Tried to call a null, can only call functions.");
}

#[test]
fn test_runtime_error_from_host_function() {
    let mut ss = Starscript::new();
    let script = ss.compile("{toUpper(1)}").script;
    assert_eq!(
        ss.run(&script),
        Err(RuntimeError::TypeMismatch {
            message: "Argument to toUpper() needs to be a string.".into()
        })
    );
}
