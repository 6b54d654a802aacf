//! Recursive descent parser for Starscript templates.
//!
//! Produces a flat AST in an [`ExprArena`]. Parsing never stops at the first
//! error: each failure is recorded as a [`ParseError`] and the parser
//! resynchronizes at the end of the broken placeholder, so the remaining
//! text and placeholders still parse.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;

use star_ir::{Expr, ExprArena, ExprId, Span, Token, TokenKind};
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    arena: ExprArena,
    /// Number of `{` opened by primary blocks and not yet closed.
    block_depth: u32,
}

impl<'a> Parser<'a> {
    /// `tokens` must come from lexing `source` and end with `Eof`.
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
            arena: ExprArena::with_capacity(source.len()),
            block_depth: 0,
        }
    }

    /// Parse the whole template.
    pub fn parse_template(mut self) -> ParseOutput {
        let mut exprs = Vec::new();
        let mut errors = Vec::new();

        while !self.cursor.is_at_end() {
            let before = self.cursor.position();
            match self.parse_statement() {
                Ok(expr) => exprs.push(expr),
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                    if self.cursor.position() == before {
                        self.cursor.advance();
                    }
                }
            }
        }

        ParseOutput {
            arena: self.arena,
            exprs,
            errors,
        }
    }

    #[inline]
    fn alloc(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc(expr)
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get(id).span
    }

    /// Build an error at the current token.
    ///
    /// When the lexer already rejected the current token, its message wins
    /// over the grammar's expectation.
    fn error(&self, message: &str, expr: Option<ExprId>) -> ParseError {
        let token = self.cursor.current();
        let message = match token.kind {
            TokenKind::Error(lexer_message) => lexer_message,
            _ => message,
        };
        let end = (token.span.end as usize).min(self.source.len());
        let ch = self
            .source
            .get(..end)
            .and_then(|s| s.chars().next_back())
            .unwrap_or('\0');
        ParseError::new(token.line, token.column, ch, message).with_expr(expr)
    }

    /// Consume `kind` or fail with `message`, attaching `expr`.
    fn expect(
        &mut self,
        kind: &TokenKind,
        message: &str,
        expr: Option<ExprId>,
    ) -> Result<(), ParseError> {
        if self.cursor.eat(kind) {
            Ok(())
        } else {
            Err(self.error(message, expr))
        }
    }
}

/// Parsed template: the arena, its template-level expressions in source
/// order, and every recovered error.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub exprs: Vec<ExprId>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse a template.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> ParseOutput {
    let tokens = star_lexer::lex(source);
    let output = Parser::new(&tokens, source).parse_template();
    debug!(
        exprs = output.exprs.len(),
        errors = output.errors.len(),
        "parsed template"
    );
    output
}

#[cfg(test)]
mod tests;
