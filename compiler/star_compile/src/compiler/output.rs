//! Output position: append fusion.
//!
//! A placeholder's direct child is rendered straight into the output
//! buffer by a fused opcode when it is a literal, a variable, a field read
//! or a call. Anything else is computed on the stack and then `Append`ed.
//! Fusion never reaches into ternary or logical branches.

use star_eval::{Opcode, Value};
use star_ir::{ExprId, ExprKind};
use star_stack::ensure_sufficient_stack;

use super::Compiler;
use crate::CompileError;

impl Compiler<'_> {
    /// Emit `id` so that its string form is appended to the output.
    pub fn emit_output(&mut self, id: ExprId) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| self.emit_output_inner(id))
    }

    fn emit_output_inner(&mut self, id: ExprId) -> Result<(), CompileError> {
        let arena = self.arena;
        match arena.kind(id) {
            ExprKind::Block(None) => Ok(()),
            ExprKind::Block(Some(inner)) => self.emit_output(*inner),
            ExprKind::Section { index, expr } => {
                self.emit_section(*index)?;
                self.emit_output(*expr)
            }
            _ if !self.options.fuse_instructions => self.emit_appended(id),

            ExprKind::Null => self.emit_constant(Opcode::ConstantAppend, Value::Null),
            ExprKind::Bool(b) => self.emit_constant(Opcode::ConstantAppend, Value::Bool(*b)),
            ExprKind::Number(n) => self.emit_constant(Opcode::ConstantAppend, Value::Number(*n)),
            ExprKind::String(s) => {
                self.emit_constant(Opcode::ConstantAppend, Value::from(s.as_str()))
            }
            ExprKind::Variable(name) => self.emit_name(Opcode::VariableAppend, name),
            ExprKind::Get { object, name } => match self.variable_receiver(*object) {
                Some(variable) => self.emit_name_pair(Opcode::VariableGetAppend, variable, name),
                None => {
                    self.emit_value(*object)?;
                    self.emit_name(Opcode::GetAppend, name)
                }
            },
            ExprKind::Call { callee, args } => self.emit_call(Opcode::CallAppend, *callee, *args),

            _ => self.emit_appended(id),
        }
    }

    /// Generic sequence: push the value, then `Append`.
    fn emit_appended(&mut self, id: ExprId) -> Result<(), CompileError> {
        self.emit_value(id)?;
        self.script.write(Opcode::Append);
        Ok(())
    }
}
