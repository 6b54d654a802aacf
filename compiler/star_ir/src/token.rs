//! Token types produced by the Starscript lexer.

use std::fmt;
use std::mem;

use crate::Span;

/// Token kinds.
///
/// Literal payloads are already decoded: `Text` has `{{`/`##` collapsed,
/// `Str` has its backslash escapes resolved, `Number` is parsed.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    /// Raw template text outside any placeholder.
    Text(String),
    /// Quoted string literal inside an expression.
    Str(String),
    Number(f64),
    Ident(String),

    Null,
    True,
    False,
    And,
    Or,

    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,

    Ampersand,
    Pipe,
    PipeCaret,
    Tilde,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,

    Dot,
    Comma,
    Question,
    Colon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,

    /// `#N` section marker; carries the raw digits (possibly empty).
    Section(String),

    /// Malformed input; carries the diagnostic message.
    Error(&'static str),
    Eof,
}

impl TokenKind {
    /// Compare variants, ignoring payloads.
    #[inline]
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Text(_) => "text",
            TokenKind::Str(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Null => "`null`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::EqualEqual => "`==`",
            TokenKind::BangEqual => "`!=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Caret => "`^`",
            TokenKind::Bang => "`!`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::PipeCaret => "`|^`",
            TokenKind::Tilde => "`~`",
            TokenKind::ShiftLeft => "`<<`",
            TokenKind::ShiftRight => "`>>`",
            TokenKind::UnsignedShiftRight => "`>>>`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::Section(_) => "section marker",
            TokenKind::Error(_) => "invalid input",
            TokenKind::Eof => "end of template",
        }
    }
}

/// A token with its location in the source.
///
/// `line` is 1-based; `column` is the 0-based character (not byte) offset
/// of the token's first character within that line.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            span,
            line,
            column,
        }
    }

    /// Placeholder used before the first token has been read.
    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, Span::DUMMY, 1, 0)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}
