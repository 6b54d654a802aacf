//! Error reporting and resynchronization tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::parse;
use pretty_assertions::assert_eq;
use star_ir::ExprKind;

fn messages(source: &str) -> Vec<String> {
    parse(source).errors.into_iter().map(|e| e.message).collect()
}

#[test]
fn test_missing_operand_recovers_at_placeholder_end() {
    let output = parse("{a +} ok {b}");

    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.message, "Expected expression.");
    assert_eq!((err.line, err.character, err.ch), (1, 4, '}'));
    assert_eq!(err.to_string(), "[line 1, character 4] at '}': Expected expression.");

    assert_eq!(output.exprs.len(), 2);
    assert_eq!(
        output.arena.kind(output.exprs[0]),
        &ExprKind::String(" ok ".into())
    );
    assert!(matches!(
        output.arena.kind(output.exprs[1]),
        ExprKind::Block(Some(_))
    ));
}

#[test]
fn test_several_broken_placeholders() {
    let output = parse("{+} {+} {ok}");
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.exprs.len(), 3);
    assert!(matches!(
        output.arena.kind(output.exprs[2]),
        ExprKind::Block(Some(_))
    ));
}

#[test]
fn test_empty_block_attaches_empty_block_node() {
    let output = parse("{}");
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.message, "Expected expression.");
    let node = err.expr.expect("partial node");
    assert_eq!(output.arena.kind(node), &ExprKind::Block(None));
    assert!(output.exprs.is_empty());
}

#[test]
fn test_lexer_message_wins() {
    let output = parse("{a = b}");
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.message, "Unexpected character.");
    assert_eq!(err.ch, '=');
    assert_eq!(err.character, 3);

    assert_eq!(messages("{'abc"), vec!["Unterminated string.".to_owned()]);
}

#[test]
fn test_missing_field_name_keeps_partial_get() {
    let output = parse("{player.}");
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.message, "Expected field name after '.'.");

    let get = err.expr.expect("partial get");
    let ExprKind::Get { object, name } = output.arena.kind(get) else {
        panic!("expected get");
    };
    assert!(name.is_empty());
    assert_eq!(output.arena.kind(*object), &ExprKind::Variable("player".into()));
}

#[test]
fn test_unclosed_call() {
    let output = parse("{f(a, b} tail");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].message,
        "Expected ')' after function arguments."
    );
    let call = output.errors[0].expr.expect("partial call");
    assert!(matches!(output.arena.kind(call), ExprKind::Call { .. }));
    assert_eq!(
        output.arena.kind(output.exprs[0]),
        &ExprKind::String(" tail".into())
    );
}

#[test]
fn test_missing_colon() {
    assert_eq!(
        messages("{a ? b}"),
        vec!["Expected ':' after first part of condition.".to_owned()]
    );
}

#[test]
fn test_unclosed_group_and_block() {
    assert_eq!(
        messages("{(a}"),
        vec!["Expected ')' after expression.".to_owned()]
    );
    assert_eq!(
        messages("{a b} x"),
        vec!["Expected '}' after expression.".to_owned()]
    );
}

#[test]
fn test_section_index_out_of_range() {
    let output = parse("#300{a} x");
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.message, "Section index cannot be larger than 255.");

    let section = err.expr.expect("section node");
    assert!(matches!(
        output.arena.kind(section),
        ExprKind::Section { index: 300, .. }
    ));

    // The section itself is not part of the output; the text after it is.
    assert_eq!(output.exprs.len(), 1);
    assert_eq!(
        output.arena.kind(output.exprs[0]),
        &ExprKind::String(" x".into())
    );
}

#[test]
fn test_section_without_index() {
    let output = parse("{#{a}} after");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].message, "Expected section index.");
    assert_eq!(output.exprs.len(), 1);
    assert_eq!(
        output.arena.kind(output.exprs[0]),
        &ExprKind::String(" after".into())
    );
}

#[test]
fn test_error_position_on_later_line() {
    let output = parse("line one\n  {1 +}");
    let err = &output.errors[0];
    assert_eq!((err.line, err.character), (2, 6));
}
