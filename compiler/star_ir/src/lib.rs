//! Starscript intermediate representation.
//!
//! Shared data types for the front end:
//!
//! - [`Span`]: byte ranges into the template source
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`ExprArena`] / [`ExprId`] / [`ExprKind`]: the flat expression tree
//!
//! Nothing here depends on the lexer, parser or VM.

mod arena;
mod ast;
mod span;
mod token;

pub use arena::{ExprArena, ExprId, ExprRange};
pub use ast::{BinaryOp, Expr, ExprKind, LogicalOp, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind};
