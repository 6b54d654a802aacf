//! Primary expressions: literals, variables, `( ... )` and `{ ... }`.

use star_ir::{Expr, ExprId, ExprKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();

        let kind = match &token.kind {
            TokenKind::Null => ExprKind::Null,
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Number(n) => ExprKind::Number(*n),
            // Template text is just a string literal in output position.
            TokenKind::Str(s) | TokenKind::Text(s) => ExprKind::String(s.clone()),
            TokenKind::Ident(name) => ExprKind::Variable(name.clone()),
            TokenKind::LeftParen => return self.parse_group(),
            TokenKind::LeftBrace => return self.parse_block(),
            _ => return Err(self.error("Expected expression.", None)),
        };

        self.cursor.advance();
        Ok(self.alloc(Expr::new(kind, token.span)))
    }

    fn parse_group(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.current_span();
        self.cursor.advance();

        let inner = self.parse_statement()?;
        let closed = self.cursor.eat(&TokenKind::RightParen);
        let span = open.merge(self.cursor.previous_span());
        let group = self.alloc(Expr::new(ExprKind::Group(inner), span));

        if closed {
            Ok(group)
        } else {
            Err(self.error("Expected ')' after expression.", Some(group)))
        }
    }

    /// `{ statement }`.
    ///
    /// Only the outermost brace pair becomes a `Block`; braces nested inside
    /// an expression just yield their content. On failure the brace depth is
    /// left raised so `synchronize` can skip to the matching `}`.
    fn parse_block(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.current_span();
        self.cursor.advance();

        let outermost = self.block_depth == 0;
        self.block_depth += 1;

        let inner = match self.parse_statement() {
            Ok(inner) => inner,
            Err(mut err) => {
                if err.expr.is_none() {
                    let span = open.merge(self.cursor.previous_span());
                    err.expr = Some(self.alloc(Expr::new(ExprKind::Block(None), span)));
                }
                return Err(err);
            }
        };

        let closed = self.cursor.eat(&TokenKind::RightBrace);
        let expr = if outermost {
            let span = open.merge(self.cursor.previous_span());
            self.alloc(Expr::new(ExprKind::Block(Some(inner)), span))
        } else {
            inner
        };

        if !closed {
            return Err(self.error("Expected '}' after expression.", Some(expr)));
        }
        self.block_depth -= 1;
        Ok(expr)
    }
}
