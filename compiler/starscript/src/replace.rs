//! Renaming variables in a parsed template.
//!
//! [`VariableReplacer`] rewrites `Variable` and `Get` chains by their
//! dotted name, e.g. `player` → `user` or `player.name` → `user.nick`,
//! before the template is compiled. The longest matching chain wins:
//! with rules for both `player` and `player.name`, `player.name` uses the
//! second and `player.health` the first. Function callees are left alone;
//! their arguments are rewritten.

use rustc_hash::FxHashMap;
use star_ir::{Expr, ExprArena, ExprId, ExprKind};
use star_parse::ParseOutput;
use star_stack::ensure_sufficient_stack;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplaceError {
    #[error("Cannot replace '{name}' with an empty name.")]
    EmptyReplacement { name: String },
}

type Supplier = Box<dyn Fn() -> String + Send + Sync>;

/// Set of rename rules.
#[derive(Default)]
pub struct VariableReplacer {
    rules: FxHashMap<String, Supplier>,
}

impl VariableReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `name` with a fixed dotted name.
    pub fn add(&mut self, name: impl Into<String>, replacement: impl Into<String>) -> &mut Self {
        let replacement = replacement.into();
        self.add_with(name, move || replacement.clone())
    }

    /// Replace `name` with a dotted name computed at rewrite time.
    pub fn add_with(
        &mut self,
        name: impl Into<String>,
        supplier: impl Fn() -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.rules.insert(name.into(), Box::new(supplier));
        self
    }

    /// Rewrite every template-level expression of `parsed`; returns the
    /// number of replaced chains.
    pub fn apply(&self, parsed: &mut ParseOutput) -> Result<usize, ReplaceError> {
        let mut count = 0;
        for expr in parsed.exprs.clone() {
            count += self.visit(&mut parsed.arena, expr)?;
        }
        Ok(count)
    }

    fn visit(&self, arena: &mut ExprArena, id: ExprId) -> Result<usize, ReplaceError> {
        ensure_sufficient_stack(|| self.visit_inner(arena, id))
    }

    fn visit_inner(&self, arena: &mut ExprArena, id: ExprId) -> Result<usize, ReplaceError> {
        if is_callee(arena, id) {
            return Ok(0);
        }
        if matches!(arena.kind(id), ExprKind::Variable(_) | ExprKind::Get { .. }) {
            if let Some((name, supplier)) = arena
                .dotted_name(id)
                .and_then(|name| self.rules.get_key_value(&name))
            {
                let replacement = build_chain(arena, id, name, &supplier())?;
                arena.replace(id, replacement);
                return Ok(1);
            }
        }

        let mut count = 0;
        for child in arena.children(id) {
            count += self.visit(arena, child)?;
        }
        Ok(count)
    }
}

/// Whether `id` is the function position of a call.
fn is_callee(arena: &ExprArena, id: ExprId) -> bool {
    arena.parent(id).is_some_and(
        |parent| matches!(arena.kind(parent), ExprKind::Call { callee, .. } if *callee == id),
    )
}

/// Allocate `a.b.c` as a `Variable`/`Get` chain spanning `target`'s source.
fn build_chain(
    arena: &mut ExprArena,
    target: ExprId,
    name: &str,
    dotted: &str,
) -> Result<ExprId, ReplaceError> {
    let empty = || ReplaceError::EmptyReplacement {
        name: name.to_owned(),
    };
    let span = arena.get(target).span;
    let mut parts = dotted.split('.');

    let first = parts.next().filter(|part| !part.is_empty()).ok_or_else(empty)?;
    let mut chain = arena.alloc(Expr::new(ExprKind::Variable(first.to_owned()), span));
    for part in parts {
        if part.is_empty() {
            return Err(empty());
        }
        chain = arena.alloc(Expr::new(
            ExprKind::Get {
                object: chain,
                name: part.to_owned(),
            },
            span,
        ));
    }
    Ok(chain)
}
