//! Bytecode container.
//!
//! A [`Script`] is a byte buffer of [`Opcode`]s and operands plus a
//! constant pool. Constants are deduplicated on insert with a linear scan;
//! pools hold at most 256 entries so the scan stays cheap.

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::{Opcode, Operands, Value};

/// A jump body longer than a signed 16-bit displacement can express.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("jump distance {distance} does not fit in 16 bits")]
pub struct JumpOutOfRange {
    pub distance: usize,
}

/// Compiled template.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    code: Vec<u8>,
    constants: Vec<Value>,
}

impl Default for Script {
    fn default() -> Self {
        Self::empty()
    }
}

impl Script {
    /// Script with no instructions; the caller must finish it with `End`.
    pub fn new() -> Self {
        Script {
            code: Vec::with_capacity(8),
            constants: Vec::new(),
        }
    }

    /// Script that renders the empty string.
    pub fn empty() -> Self {
        let mut script = Self::new();
        script.write(Opcode::End);
        script
    }

    #[inline]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[inline]
    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    #[inline]
    pub fn write(&mut self, op: Opcode) {
        self.code.push(op.as_byte());
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.code.push(byte);
    }

    /// Opcode followed by a one-byte operand.
    pub fn write_with(&mut self, op: Opcode, operand: u8) {
        self.code.push(op.as_byte());
        self.code.push(operand);
    }

    /// Index of `value` in the pool, inserting it if no equal value exists.
    /// `None` once the pool is full.
    pub fn add_constant(&mut self, value: Value) -> Option<u8> {
        if let Some(index) = self.constants.iter().position(|c| *c == value) {
            return u8::try_from(index).ok();
        }
        let index = u8::try_from(self.constants.len()).ok()?;
        self.constants.push(value);
        Some(index)
    }

    /// Emit a jump with a placeholder displacement. Returns the operand
    /// offset to hand to [`Script::patch_jump`].
    pub fn write_jump(&mut self, op: Opcode) -> usize {
        self.write(op);
        self.code.extend_from_slice(&[0, 0]);
        self.code.len() - 2
    }

    /// Point the jump whose operand sits at `offset` at the current end of
    /// the code.
    pub fn patch_jump(&mut self, offset: usize) -> Result<(), JumpOutOfRange> {
        let distance = self.code.len() - offset - 2;
        let jump = i16::try_from(distance).map_err(|_| JumpOutOfRange { distance })?;
        self.code[offset..offset + 2].copy_from_slice(&jump.to_be_bytes());
        Ok(())
    }

    /// Human-readable listing, one instruction per line.
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        let mut offset = 0;
        while offset < self.code.len() {
            offset = self.disassemble_instruction(offset, &mut out);
            out.push('\n');
        }
        out
    }

    /// Render the instruction at `offset`; returns the next offset.
    fn disassemble_instruction(&self, offset: usize, out: &mut String) -> usize {
        let byte = self.code[offset];
        let Some(op) = Opcode::from_byte(byte) else {
            let _ = write!(out, "{offset:>4} <unknown {byte:#04x}>");
            return offset + 1;
        };

        let operands = &self.code[offset + 1..];
        let width = op.operands().width();
        if operands.len() < width {
            let _ = write!(out, "{offset:>4} {op} <truncated>");
            return self.code.len();
        }

        let line_start = out.len();
        let _ = write!(out, "{offset:>4} {op:<18}");
        let _ = match op.operands() {
            Operands::None => Ok(()),
            Operands::Constant => {
                let index = operands[0];
                write!(out, "{index:>3} '{}'", self.constant_text(index))
            }
            Operands::ConstantPair => {
                let (a, b) = (operands[0], operands[1]);
                write!(
                    out,
                    "{a:>3}.{b:<3} '{}.{}'",
                    self.constant_text(a),
                    self.constant_text(b)
                )
            }
            Operands::ArgCount => {
                let count = operands[0];
                let noun = if count == 1 { "argument" } else { "arguments" };
                write!(out, "{count:>3} {noun}")
            }
            Operands::SectionIndex => write!(out, "{:>3}", operands[0]),
            Operands::Jump => {
                let jump = i16::from_be_bytes([operands[0], operands[1]]);
                let target = (offset + 3) as isize + isize::from(jump);
                write!(out, "{:>3} -> {target}", offset + 1)
            }
        };
        let trimmed = out[line_start..].trim_end().len();
        out.truncate(line_start + trimmed);
        offset + 1 + width
    }

    fn constant_text(&self, index: u8) -> String {
        match self.constants.get(index as usize) {
            Some(value) => value.to_string(),
            None => "<invalid>".to_owned(),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disassemble())
    }
}

#[cfg(test)]
mod tests;
