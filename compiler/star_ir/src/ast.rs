//! Expression nodes.
//!
//! Children are [`ExprId`] indices into an [`ExprArena`](crate::ExprArena),
//! never boxes, so a subtree can be swapped by overwriting one slot.

use std::fmt;

use crate::{ExprId, ExprRange, Span};

/// Arithmetic, comparison and bitwise binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,

    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl BinaryOp {
    /// Source-level symbol, used in disassembly-adjacent output and errors.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "|^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `!`, truthiness negation.
    Not,
    /// `-`
    Neg,
    /// `~`, bitwise complement.
    BitNot,
}

/// Short-circuiting operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Owning node, `None` for template-level expressions and detached nodes.
    pub parent: Option<ExprId>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            parent: None,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Null,
    /// String literal or a run of literal template text.
    String(String),
    Number(f64),
    Bool(bool),

    /// One `{...}` placeholder in literal-text position. `None` when the
    /// placeholder failed to parse before any inner expression existed.
    Block(Option<ExprId>),
    /// Parenthesized expression.
    Group(ExprId),

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    Variable(String),
    /// Field access `object.name`.
    Get {
        object: ExprId,
        name: String,
    },
    Call {
        callee: ExprId,
        args: ExprRange,
    },

    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },
    Conditional {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// `#N{...}`. The index is kept as parsed; values above 255 are
    /// reported by the parser and never reach the compiler.
    Section {
        index: u32,
        expr: ExprId,
    },
}

impl ExprKind {
    /// Literals that the compiler can emit straight from the constant pool.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Null | ExprKind::String(_) | ExprKind::Number(_) | ExprKind::Bool(_)
        )
    }
}
