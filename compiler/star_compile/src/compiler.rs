//! Expression emitter.
//!
//! Two entry points per node: [`Compiler::emit_value`] leaves exactly one
//! value on the stack, `emit_output` (in `output.rs`) appends the node's
//! string form to the output buffer and leaves the stack unchanged.

mod output;

use star_eval::{Opcode, Script, Value};
use star_ir::{BinaryOp, ExprArena, ExprId, ExprKind, ExprRange, LogicalOp, UnaryOp};
use star_stack::ensure_sufficient_stack;

use crate::{CompileError, CompileOptions};

/// Single-use bytecode emitter over one arena.
pub struct Compiler<'a> {
    arena: &'a ExprArena,
    script: Script,
    options: CompileOptions,
}

impl<'a> Compiler<'a> {
    pub fn new(arena: &'a ExprArena, options: CompileOptions) -> Self {
        Compiler {
            arena,
            script: Script::new(),
            options,
        }
    }

    /// Emit `exprs` in output position, then `End`.
    pub fn compile_template(mut self, exprs: &[ExprId]) -> Result<Script, CompileError> {
        for &expr in exprs {
            self.emit_output(expr)?;
        }
        self.script.write(Opcode::End);
        Ok(self.script)
    }

    /// Emit `id` so that it pushes its value.
    pub fn emit_value(&mut self, id: ExprId) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| self.emit_value_inner(id))
    }

    fn emit_value_inner(&mut self, id: ExprId) -> Result<(), CompileError> {
        let arena = self.arena;
        match arena.kind(id) {
            ExprKind::Null => self.script.write(Opcode::Null),
            ExprKind::Bool(true) => self.script.write(Opcode::True),
            ExprKind::Bool(false) => self.script.write(Opcode::False),
            ExprKind::Number(n) => self.emit_constant(Opcode::Constant, Value::Number(*n))?,
            ExprKind::String(s) => self.emit_constant(Opcode::Constant, Value::from(s.as_str()))?,

            // An empty placeholder only exists in error output.
            ExprKind::Block(None) => self.script.write(Opcode::Null),
            ExprKind::Block(Some(inner)) | ExprKind::Group(inner) => self.emit_value(*inner)?,

            ExprKind::Binary { op, left, right } => self.emit_binary(*op, *left, *right)?,
            ExprKind::Unary { op, operand } => {
                self.emit_value(*operand)?;
                self.script.write(match op {
                    UnaryOp::Not => Opcode::Not,
                    UnaryOp::Neg => Opcode::Negate,
                    UnaryOp::BitNot => Opcode::BitNot,
                });
            }

            ExprKind::Variable(name) => self.emit_name(Opcode::Variable, name)?,
            ExprKind::Get { object, name } => {
                match self.variable_receiver(*object) {
                    Some(variable) => self.emit_name_pair(Opcode::VariableGet, variable, name)?,
                    None => {
                        self.emit_value(*object)?;
                        self.emit_name(Opcode::Get, name)?;
                    }
                }
            }
            ExprKind::Call { callee, args } => self.emit_call(Opcode::Call, *callee, *args)?,

            ExprKind::Logical { op, left, right } => {
                self.emit_value(*left)?;
                let jump = self.script.write_jump(match op {
                    LogicalOp::And => Opcode::JumpIfFalse,
                    LogicalOp::Or => Opcode::JumpIfTrue,
                });
                self.script.write(Opcode::Pop);
                self.emit_value(*right)?;
                self.patch_jump(jump)?;
            }
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                self.emit_value(*cond)?;
                let else_jump = self.script.write_jump(Opcode::JumpIfFalse);
                self.script.write(Opcode::Pop);
                self.emit_value(*then_branch)?;
                let end_jump = self.script.write_jump(Opcode::Jump);

                self.patch_jump(else_jump)?;
                self.script.write(Opcode::Pop);
                self.emit_value(*else_branch)?;
                self.patch_jump(end_jump)?;
            }

            ExprKind::Section { index, expr } => {
                self.emit_section(*index)?;
                self.emit_value(*expr)?;
            }
        }
        Ok(())
    }

    fn emit_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> Result<(), CompileError> {
        self.emit_value(left)?;

        if op == BinaryOp::Add && self.options.fuse_instructions {
            let constant = match self.arena.kind(right) {
                ExprKind::String(s) => Some(Value::from(s.as_str())),
                ExprKind::Number(n) => Some(Value::Number(*n)),
                _ => None,
            };
            if let Some(constant) = constant {
                return self.emit_constant(Opcode::AddConstant, constant);
            }
        }

        self.emit_value(right)?;
        self.script.write(match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Subtract,
            BinaryOp::Mul => Opcode::Multiply,
            BinaryOp::Div => Opcode::Divide,
            BinaryOp::Mod => Opcode::Modulo,
            BinaryOp::Pow => Opcode::Power,
            BinaryOp::Eq => Opcode::Equals,
            BinaryOp::NotEq => Opcode::NotEquals,
            BinaryOp::Gt => Opcode::Greater,
            BinaryOp::GtEq => Opcode::GreaterEqual,
            BinaryOp::Lt => Opcode::Less,
            BinaryOp::LtEq => Opcode::LessEqual,
            BinaryOp::BitAnd => Opcode::BitAnd,
            BinaryOp::BitOr => Opcode::BitOr,
            BinaryOp::BitXor => Opcode::BitXor,
            BinaryOp::Shl => Opcode::ShiftLeft,
            BinaryOp::Shr => Opcode::ShiftRight,
            BinaryOp::UShr => Opcode::UnsignedShiftRight,
        });
        Ok(())
    }

    /// Callee, then arguments left to right, then `op` with the count.
    fn emit_call(&mut self, op: Opcode, callee: ExprId, args: ExprRange) -> Result<(), CompileError> {
        let count = u8::try_from(args.len())
            .map_err(|_| CompileError::TooManyArguments { count: args.len() })?;

        let arena = self.arena;
        self.emit_value(callee)?;
        for &arg in arena.list(args) {
            self.emit_value(arg)?;
        }
        self.script.write_with(op, count);
        Ok(())
    }

    fn emit_section(&mut self, index: u32) -> Result<(), CompileError> {
        let index = u8::try_from(index).map_err(|_| CompileError::SectionIndex { index })?;
        self.script.write_with(Opcode::Section, index);
        Ok(())
    }

    /// Name of `object` when it is a bare variable and fusion is on.
    fn variable_receiver(&self, object: ExprId) -> Option<&'a str> {
        if !self.options.fuse_instructions {
            return None;
        }
        let arena = self.arena;
        match arena.kind(object) {
            ExprKind::Variable(name) => Some(name),
            _ => None,
        }
    }

    fn constant(&mut self, value: Value) -> Result<u8, CompileError> {
        self.script
            .add_constant(value)
            .ok_or(CompileError::TooManyConstants)
    }

    fn emit_constant(&mut self, op: Opcode, value: Value) -> Result<(), CompileError> {
        let index = self.constant(value)?;
        self.script.write_with(op, index);
        Ok(())
    }

    fn emit_name(&mut self, op: Opcode, name: &str) -> Result<(), CompileError> {
        self.emit_constant(op, Value::from(name))
    }

    fn emit_name_pair(&mut self, op: Opcode, variable: &str, field: &str) -> Result<(), CompileError> {
        let variable = self.constant(Value::from(variable))?;
        let field = self.constant(Value::from(field))?;
        self.script.write(op);
        self.script.write_byte(variable);
        self.script.write_byte(field);
        Ok(())
    }

    fn patch_jump(&mut self, offset: usize) -> Result<(), CompileError> {
        self.script
            .patch_jump(offset)
            .map_err(|err| CompileError::JumpTooLarge {
                distance: err.distance,
            })
    }
}

#[cfg(test)]
mod tests;
