//! Template grammar.
//!
//! # Module Structure
//!
//! - `mod.rs`: statements (`#N{...}` sections) and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `postfix.rs`: field access and calls
//! - `primary.rs`: literals, variables, groups and `{...}` blocks
//!
//! Precedence, loosest first: `?:`, `or`, `and`, `== !=`, `> >= < <=`,
//! `+ -`, `* / % ^`, `& | |^ << >> >>>`, unary `! - ~`, postfix, primary.

mod operators;
mod postfix;
mod primary;

use star_ir::{BinaryOp, Expr, ExprId, ExprKind, LogicalOp, TokenKind};
use star_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

const MAX_SECTION_INDEX: u32 = 255;

impl Parser<'_> {
    /// Parse a statement: a section or a plain expression.
    pub(crate) fn parse_statement(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<ExprId, ParseError> {
        let TokenKind::Section(numeral) = self.cursor.current_kind() else {
            return self.parse_expr();
        };
        let marker = self.cursor.current_span();
        self.cursor.advance();

        if numeral.is_empty() {
            return Err(self.error("Expected section index.", None));
        }
        // Digits only; anything that overflows is out of range anyway.
        let index = numeral.parse::<u32>().unwrap_or(u32::MAX);

        let expr = self.parse_expr()?;
        let span = marker.merge(self.span_of(expr));
        let section = self.alloc(Expr::new(ExprKind::Section { index, expr }, span));

        if index > MAX_SECTION_INDEX {
            return Err(self.error("Section index cannot be larger than 255.", Some(section)));
        }
        Ok(section)
    }

    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested groups and blocks
    /// cannot overflow the native stack.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_conditional())
    }

    /// Parse `cond ? then : else`. Both branches are statements.
    fn parse_conditional(&mut self) -> Result<ExprId, ParseError> {
        let cond = self.parse_and()?;

        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(cond);
        }

        let then_branch = self.parse_statement()?;
        self.expect(
            &TokenKind::Colon,
            "Expected ':' after first part of condition.",
            Some(cond),
        )?;
        let else_branch = self.parse_statement()?;

        let span = self.span_of(cond).merge(self.span_of(else_branch));
        Ok(self.alloc(Expr::new(
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            },
            span,
        )))
    }

    /// Parse `and` (loosest binary operator).
    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_or()?;

        while self.cursor.eat(&TokenKind::And) {
            let right = self.parse_or()?;
            left = self.logical(LogicalOp::And, left, right);
        }

        Ok(left)
    }

    /// Parse `or`.
    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_equality()?;

        while self.cursor.eat(&TokenKind::Or) {
            let right = self.parse_equality()?;
            left = self.logical(LogicalOp::Or, left, right);
        }

        Ok(left)
    }

    /// Parse `==` and `!=`.
    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_comparison()?;

        while let Some(op) = self.match_equality_op() {
            self.cursor.advance();
            let right = self.parse_comparison()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `>`, `>=`, `<`, `<=`.
    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.match_comparison_op() {
            self.cursor.advance();
            let right = self.parse_term()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `+` and `-`.
    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.match_additive_op() {
            self.cursor.advance();
            let right = self.parse_factor()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `*`, `/`, `%` and `^` (power shares this level).
    fn parse_factor(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_bitwise()?;

        while let Some(op) = self.match_multiplicative_op() {
            self.cursor.advance();
            let right = self.parse_bitwise()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `&`, `|`, `|^`, `<<`, `>>`, `>>>` (all one level).
    fn parse_bitwise(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_bitwise_op() {
            self.cursor.advance();
            let right = self.parse_unary()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse prefix `!`, `-`, `~`.
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_postfix();
        };
        let start = self.cursor.current_span();
        self.cursor.advance();

        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(Expr::new(ExprKind::Unary { op, operand }, span)))
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    fn logical(&mut self, op: LogicalOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        self.alloc(Expr::new(ExprKind::Logical { op, left, right }, span))
    }
}
