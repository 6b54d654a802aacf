//! Expression arena.
//!
//! All nodes of one parse live in a single `Vec`, addressed by [`ExprId`].
//! Parent links are indices too, so rewriting a subtree never leaves a
//! dangling back-reference.

use std::fmt;
use std::mem;

use crate::{Expr, ExprKind};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Range of expression ids in the arena's flat list buffer (call arguments).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Owner of every [`Expr`] produced by one parse.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for a source of `source_len` bytes (~1 node per 8 bytes of template).
    pub fn with_capacity(source_len: usize) -> Self {
        ExprArena {
            exprs: Vec::with_capacity(source_len / 8),
            expr_lists: Vec::new(),
        }
    }

    /// Allocate a node and link its children back to it.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        self.adopt_children(id);
        id
    }

    /// Store a list of ids (call arguments) and return its range.
    ///
    /// Lists longer than `u16::MAX` are truncated; the compiler rejects calls
    /// with more than 255 arguments long before that matters.
    pub fn alloc_list(&mut self, ids: &[ExprId]) -> ExprRange {
        let start = u32::try_from(self.expr_lists.len()).unwrap_or(u32::MAX);
        let len = u16::try_from(ids.len()).unwrap_or(u16::MAX);
        self.expr_lists.extend_from_slice(&ids[..len as usize]);
        ExprRange { start, len }
    }

    #[inline]
    pub fn list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    #[inline]
    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.exprs[id.index()].parent
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Direct children of `id`, in source order.
    pub fn children(&self, id: ExprId) -> Vec<ExprId> {
        match &self.kind(id) {
            ExprKind::Null
            | ExprKind::String(_)
            | ExprKind::Number(_)
            | ExprKind::Bool(_)
            | ExprKind::Variable(_)
            | ExprKind::Block(None) => Vec::new(),
            ExprKind::Block(Some(inner)) | ExprKind::Group(inner) => vec![*inner],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Get { object, .. } => vec![*object],
            ExprKind::Section { expr, .. } => vec![*expr],
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                vec![*left, *right]
            }
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => vec![*cond, *then_branch, *else_branch],
            ExprKind::Call { callee, args } => {
                let mut out = Vec::with_capacity(args.len() + 1);
                out.push(*callee);
                out.extend_from_slice(self.list(*args));
                out
            }
        }
    }

    /// Replace the subtree at `target` with the one rooted at `replacement`.
    ///
    /// The replacement's node moves into `target`'s slot, so the parent (or
    /// the template-level expression list) keeps pointing at `target` and
    /// nothing above it needs patching. `target` keeps its source span. The
    /// old `replacement` slot is left detached as `Null`.
    pub fn replace(&mut self, target: ExprId, replacement: ExprId) {
        if target == replacement {
            return;
        }
        let kind = mem::replace(&mut self.exprs[replacement.index()].kind, ExprKind::Null);
        self.exprs[replacement.index()].parent = None;
        self.exprs[target.index()].kind = kind;
        self.adopt_children(target);
    }

    /// `a.b.c` for a `Variable`/`Get` chain, `None` for anything else.
    pub fn dotted_name(&self, id: ExprId) -> Option<String> {
        match self.kind(id) {
            ExprKind::Variable(name) => Some(name.clone()),
            ExprKind::Get { object, name } => {
                let mut base = self.dotted_name(*object)?;
                base.push('.');
                base.push_str(name);
                Some(base)
            }
            _ => None,
        }
    }

    fn adopt_children(&mut self, id: ExprId) {
        for child in self.children(id) {
            self.exprs[child.index()].parent = Some(id);
        }
    }
}
