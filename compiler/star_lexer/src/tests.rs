use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.into())
}

#[test]
fn test_plain_text() {
    assert_eq!(
        kinds("Hello, world"),
        vec![TokenKind::Text("Hello, world".into()), TokenKind::Eof]
    );
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_placeholder() {
    assert_eq!(
        kinds("Hi {name}!"),
        vec![
            TokenKind::Text("Hi ".into()),
            TokenKind::LeftBrace,
            ident("name"),
            TokenKind::RightBrace,
            TokenKind::Text("!".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_escapes_collapse_anywhere() {
    assert_eq!(
        kinds("{{x}} ##1"),
        vec![TokenKind::Text("{x}} #1".into()), TokenKind::Eof]
    );
    assert_eq!(
        kinds("a{{b"),
        vec![TokenKind::Text("a{b".into()), TokenKind::Eof]
    );
}

#[test]
fn test_lone_hash_is_text() {
    assert_eq!(kinds("#x"), vec![TokenKind::Text("#x".into()), TokenKind::Eof]);
}

#[test]
fn test_section_marker() {
    assert_eq!(
        kinds("#12{a}"),
        vec![
            TokenKind::Section("12".into()),
            TokenKind::LeftBrace,
            ident("a"),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_section_inside_expression() {
    assert_eq!(
        kinds("{a ? #1{b} : #}"),
        vec![
            TokenKind::LeftBrace,
            ident("a"),
            TokenKind::Question,
            TokenKind::Section("1".into()),
            TokenKind::LeftBrace,
            ident("b"),
            TokenKind::RightBrace,
            TokenKind::Colon,
            TokenKind::Section(String::new()),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numbers_have_no_sign() {
    assert_eq!(
        kinds("{-1.5 + 2}"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Minus,
            TokenKind::Number(1.5),
            TokenKind::Plus,
            TokenKind::Number(2.0),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("{null true false and or nullable}"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Null,
            TokenKind::True,
            TokenKind::False,
            TokenKind::And,
            TokenKind::Or,
            ident("nullable"),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("{== != > >= < <= + - * / % ^ ! & | |^ ~ << >> >>> . , ? : ( )}"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Bang,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::PipeCaret,
            TokenKind::Tilde,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::UnsignedShiftRight,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_single_equals_is_error() {
    assert_eq!(
        kinds("{a = b}"),
        vec![
            TokenKind::LeftBrace,
            ident("a"),
            TokenKind::Error("Unexpected character."),
            ident("b"),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        kinds(r#"{'it\'s' + "say \"hi\"" + 'a\nb'}"#),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Str("it's".into()),
            TokenKind::Plus,
            TokenKind::Str("say \"hi\"".into()),
            TokenKind::Plus,
            TokenKind::Str("anb".into()),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        kinds("{'abc"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Error("Unterminated string."),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("{'abc\\"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Error("Unterminated string."),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_nested_braces_stay_in_expression() {
    let mut lexer = Lexer::new("{a{b}c} d");
    let mut seen = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.is_eof() {
            break;
        }
        seen.push((token.kind, lexer.is_in_expression()));
    }
    assert_eq!(
        seen,
        vec![
            (TokenKind::LeftBrace, true),
            (ident("a"), true),
            (TokenKind::LeftBrace, true),
            (ident("b"), true),
            (TokenKind::RightBrace, true),
            (ident("c"), true),
            (TokenKind::RightBrace, false),
            (TokenKind::Text(" d".into()), false),
        ]
    );
    assert!(!lexer.is_in_expression());
}

#[test]
fn test_closing_brace_in_text_is_literal() {
    assert_eq!(kinds("a}b"), vec![TokenKind::Text("a}b".into()), TokenKind::Eof]);
}

#[test]
fn test_positions() {
    let tokens = lex("ab\n{ x\n + é}");
    let at: Vec<_> = tokens
        .iter()
        .map(|t| (t.line, t.column, t.span.start, t.span.end))
        .collect();
    assert_eq!(
        at,
        vec![
            (1, 0, 0, 3),   // "ab\n"
            (2, 0, 3, 4),   // {
            (2, 2, 5, 6),   // x
            (3, 1, 8, 9),   // +
            (3, 3, 10, 12), // é (not an identifier)
            (3, 4, 12, 13), // }
            (3, 5, 13, 13), // eof
        ]
    );
    assert_eq!(tokens[4].kind, TokenKind::Error("Unexpected character."));
}

#[test]
fn test_column_counts_chars() {
    let tokens = lex("é{x}");
    assert_eq!(tokens[1].kind, TokenKind::LeftBrace);
    assert_eq!(tokens[1].column, 1);
    assert_eq!(tokens[1].span.start, 2);
}

#[test]
fn test_eof_in_expression_after_whitespace() {
    assert_eq!(kinds("{ a  "), vec![TokenKind::LeftBrace, ident("a"), TokenKind::Eof]);
}
