//! Parse errors.

use star_ir::ExprId;
use thiserror::Error;

/// A recoverable syntax error.
///
/// `line` is 1-based, `character` is the 0-based column of the offending
/// token and `ch` is the last character the lexer had consumed when the
/// error was detected. `expr` is the partially built node, if any; editor
/// tooling uses it to complete `player.` or an empty `{`.
#[derive(Clone, PartialEq, Debug, Error)]
#[error("[line {line}, character {character}] at '{ch}': {message}")]
pub struct ParseError {
    pub line: u32,
    pub character: u32,
    pub ch: char,
    pub message: String,
    pub expr: Option<ExprId>,
}

impl ParseError {
    pub fn new(line: u32, character: u32, ch: char, message: impl Into<String>) -> Self {
        ParseError {
            line,
            character,
            ch,
            message: message.into(),
            expr: None,
        }
    }

    /// Attach the partial node built before the error.
    #[must_use]
    pub fn with_expr(mut self, expr: Option<ExprId>) -> Self {
        self.expr = expr;
        self
    }
}
