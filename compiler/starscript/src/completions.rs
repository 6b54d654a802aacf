//! Name completion for template editors.
//!
//! Completion works on the parser's output, including the partial nodes
//! attached to errors, so `{pla`, `{player.` and a bare `{` all produce
//! candidates while the user is still typing.

use star_eval::{Environment, Value};
use star_ir::{ExprArena, ExprId, ExprKind};
use star_parse::parse;
use star_stack::ensure_sufficient_stack;

/// One candidate name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completion {
    pub name: String,
    /// The name is bound to a function, so an editor can append `(`.
    pub is_function: bool,
}

/// Candidates for the identifier at byte offset `position` of `source`.
///
/// Names starting with `_` are hidden. Results are sorted by name and
/// free of duplicates.
pub fn completions(source: &str, position: usize, globals: &Environment) -> Vec<Completion> {
    let parsed = parse(source);
    let mut finder = Finder {
        source,
        position,
        arena: &parsed.arena,
        globals,
        found: Vec::new(),
    };

    for &expr in &parsed.exprs {
        finder.visit(expr);
    }
    for expr in parsed.errors.iter().filter_map(|err| err.expr) {
        finder.visit(expr);
    }

    let mut found = finder.found;
    found.sort();
    found.dedup_by(|a, b| a.name == b.name);
    found
}

struct Finder<'a> {
    source: &'a str,
    position: usize,
    arena: &'a ExprArena,
    globals: &'a Environment,
    found: Vec<Completion>,
}

impl Finder<'_> {
    fn visit(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.visit_inner(id));
    }

    fn visit_inner(&mut self, id: ExprId) {
        let (arena, source, globals) = (self.arena, self.source, self.globals);
        let span = arena.get(id).span;
        let (start, end) = (span.start as usize, span.end as usize);
        // A cursor at the very end of the source also reaches nodes whose
        // span stops early, e.g. the partial `Get` of `{player.`.
        let at_end = self.position == source.len();
        let offset = u32::try_from(self.position).unwrap_or(u32::MAX);
        if self.position < start || !(span.touches(offset) || at_end) {
            return;
        }

        match arena.kind(id) {
            ExprKind::Variable(_) => {
                let prefix = source.get(start..self.position).unwrap_or_default();
                self.offer(globals, prefix);
            }
            ExprKind::Get { object, name } if self.position >= end.saturating_sub(name.len()) => {
                if let Some(Value::Map(map)) = self.resolve(*object) {
                    let from = arena.get(*object).span.end as usize + 1;
                    let prefix = source.get(from..self.position).unwrap_or_default();
                    self.offer(&map, prefix);
                }
            }
            ExprKind::Block(None) => self.offer(globals, ""),
            _ => {
                for child in arena.children(id) {
                    self.visit(child);
                }
            }
        }
    }

    /// Value of a `Variable`/`Get` chain against the globals.
    fn resolve(&self, id: ExprId) -> Option<Value> {
        match self.arena.kind(id) {
            ExprKind::Variable(name) => self.globals.get_raw(name),
            ExprKind::Get { object, name } => match self.resolve(*object)? {
                Value::Map(map) => map.get_raw(name),
                _ => None,
            },
            _ => None,
        }
    }

    fn offer(&mut self, map: &Environment, prefix: &str) {
        for key in map.keys() {
            if key.starts_with('_') || !key.starts_with(prefix) {
                continue;
            }
            let is_function = map.get_raw(&key).is_some_and(|value| value.is_function());
            self.found.push(Completion {
                name: key,
                is_function,
            });
        }
    }
}

#[cfg(test)]
mod tests;
