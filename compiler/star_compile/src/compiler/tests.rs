#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use star_ir::{Expr, Span};

use super::*;
use crate::compile;

fn disassemble_with(source: &str, options: CompileOptions) -> String {
    let parsed = star_parse::parse(source);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    compile(&parsed, options).unwrap().disassemble()
}

fn disassemble(source: &str) -> String {
    disassemble_with(source, CompileOptions::default())
}

#[test]
fn test_text_and_variable() {
    assert_eq!(
        disassemble("Hi {name}!"),
        "   0 ConstantAppend      0 'Hi '
   2 VariableAppend      1 'name'
   4 ConstantAppend      2 '!'
   6 End
"
    );
}

#[test]
fn test_variable_get_is_fused() {
    assert_eq!(
        disassemble("{player.name}"),
        "   0 VariableGetAppend   0.1   'player.name'
   3 End
"
    );
}

#[test]
fn test_nested_get_appends_last_field() {
    assert_eq!(
        disassemble("{a.b.c}"),
        "   0 VariableGet         0.1   'a.b'
   3 GetAppend           2 'c'
   5 End
"
    );
}

#[test]
fn test_call_append() {
    assert_eq!(
        disassemble("{round(x, 2)}"),
        "   0 Variable            0 'round'
   2 Variable            1 'x'
   4 Constant            2 '2'
   6 CallAppend          2 arguments
   8 End
"
    );
}

#[test]
fn test_add_constant_and_dedup() {
    assert_eq!(
        disassemble(r#"{"x" + "x"}"#),
        "   0 Constant            0 'x'
   2 AddConstant         0 'x'
   4 Append
   5 End
"
    );
}

#[test]
fn test_logical_short_circuit_layout() {
    assert_eq!(
        disassemble("{a and b}"),
        "   0 Variable            0 'a'
   2 JumpIfFalse         3 -> 8
   5 Pop
   6 Variable            1 'b'
   8 Append
   9 End
"
    );
}

#[test]
fn test_conditional_layout() {
    assert_eq!(
        disassemble("{a ? 1 : 2}"),
        "   0 Variable            0 'a'
   2 JumpIfFalse         3 -> 11
   5 Pop
   6 Constant            1 '1'
   8 Jump                9 -> 14
  11 Pop
  12 Constant            2 '2'
  14 Append
  15 End
"
    );
}

#[test]
fn test_sections() {
    assert_eq!(
        disassemble("#0{a} #1{b}"),
        "   0 Section             0
   2 VariableAppend      0 'a'
   4 ConstantAppend      1 ' '
   6 Section             1
   8 VariableAppend      2 'b'
  10 End
"
    );
}

#[test]
fn test_unfused_emits_generic_sequences() {
    let options = CompileOptions {
        fuse_instructions: false,
    };
    assert_eq!(
        disassemble_with("Hi {player.name} {1 + 2}", options),
        "   0 Constant            0 'Hi '
   2 Append
   3 Variable            1 'player'
   5 Get                 2 'name'
   7 Append
   8 Constant            3 ' '
  10 Append
  11 Constant            4 '1'
  13 Constant            5 '2'
  15 Add
  16 Append
  17 End
"
    );
}

#[test]
fn test_bitwise_and_unary() {
    assert_eq!(
        disassemble("{~a | -b}"),
        "   0 Variable            0 'a'
   2 BitNot
   3 Variable            1 'b'
   5 Negate
   6 BitOr
   7 Append
   8 End
"
    );
}

#[test]
fn test_too_many_constants() {
    let source: String = (0..=256).map(|i| format!("{{{i}}}")).collect();
    let parsed = star_parse::parse(&source);
    assert_eq!(
        compile(&parsed, CompileOptions::default()),
        Err(CompileError::TooManyConstants)
    );
}

#[test]
fn test_too_many_arguments() {
    let args = vec!["0"; 256].join(",");
    let parsed = star_parse::parse(&format!("{{f({args})}}"));
    assert!(parsed.errors.is_empty());
    assert_eq!(
        compile(&parsed, CompileOptions::default()),
        Err(CompileError::TooManyArguments { count: 256 })
    );
}

#[test]
fn test_jump_too_large() {
    let body = "+a".repeat(12_000);
    let parsed = star_parse::parse(&format!("{{ok and a{body}}}"));
    assert!(parsed.errors.is_empty());
    assert!(matches!(
        compile(&parsed, CompileOptions::default()),
        Err(CompileError::JumpTooLarge { .. })
    ));
}

#[test]
fn test_section_index_out_of_range() {
    let mut arena = ExprArena::new();
    let text = arena.alloc(Expr::new(ExprKind::String("x".into()), Span::new(0, 1)));
    let section = arena.alloc(Expr::new(
        ExprKind::Section {
            index: 300,
            expr: text,
        },
        Span::new(0, 1),
    ));
    assert_eq!(
        Compiler::new(&arena, CompileOptions::default()).compile_template(&[section]),
        Err(CompileError::SectionIndex { index: 300 })
    );
}
