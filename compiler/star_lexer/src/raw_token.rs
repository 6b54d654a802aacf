//! Raw expression-mode token definition.
//!
//! `RawToken` is the logos-derived tokenizer output for one expression-mode
//! token. Quotes only mark where a string starts: string bodies, template
//! text and brace depth are scanned by hand in [`crate::Lexer`].

use logos::Logos;
use star_ir::TokenKind;

/// Raw token from logos (before conversion to [`TokenKind`]).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("and")]
    And,
    #[token("or")]
    Or,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,

    // `#` followed by an optional numeral; the parser validates it.
    #[regex(r"#[0-9]*")]
    Section,

    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,

    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("|^")]
    PipeCaret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token(">>>")]
    UnsignedShiftRight,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
}

/// Convert a raw token to a [`TokenKind`].
///
/// Quotes are not handled here; the caller scans the string body.
pub(crate) fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Null => TokenKind::Null,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Ident => TokenKind::Ident(slice.to_owned()),
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::Section => TokenKind::Section(slice[1..].to_owned()),
        RawToken::DoubleQuote | RawToken::SingleQuote => TokenKind::Error("Unexpected quote."),

        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,

        RawToken::Ampersand => TokenKind::Ampersand,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipeCaret => TokenKind::PipeCaret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::ShiftLeft => TokenKind::ShiftLeft,
        RawToken::ShiftRight => TokenKind::ShiftRight,
        RawToken::UnsignedShiftRight => TokenKind::UnsignedShiftRight,

        RawToken::Dot => TokenKind::Dot,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
    }
}
