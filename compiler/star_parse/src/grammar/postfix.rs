//! Postfix chains: `a.b`, `f(x, y)`, `a.b(c).d`.

use star_ir::{Expr, ExprId, ExprKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a primary followed by any number of field accesses and calls.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.cursor.eat(&TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.cursor.eat(&TokenKind::Dot) {
                expr = self.finish_field(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// After `.`: expect a field name.
    ///
    /// On a missing name the error carries a `Get` with an empty name, so
    /// completion can offer the receiver's fields for `player.`.
    fn finish_field(&mut self, object: ExprId) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();

        if let TokenKind::Ident(name) = &token.kind {
            self.cursor.advance();
            let span = self.span_of(object).merge(token.span);
            return Ok(self.alloc(Expr::new(
                ExprKind::Get {
                    object,
                    name: name.clone(),
                },
                span,
            )));
        }

        let span = self.span_of(object).merge(self.cursor.previous_span());
        let partial = self.alloc(Expr::new(
            ExprKind::Get {
                object,
                name: String::new(),
            },
            span,
        ));
        Err(self.error("Expected field name after '.'.", Some(partial)))
    }

    /// After `(`: parse comma-separated arguments and the closing paren.
    fn finish_call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let mut args = Vec::new();

        if !self.cursor.check(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let closed = self.cursor.eat(&TokenKind::RightParen);
        let args = self.arena.alloc_list(&args);
        let span = self.span_of(callee).merge(self.cursor.previous_span());
        let call = self.alloc(Expr::new(ExprKind::Call { callee, args }, span));

        if closed {
            Ok(call)
        } else {
            Err(self.error("Expected ')' after function arguments.", Some(call)))
        }
    }
}
