//! Instruction set.
//!
//! Every instruction is one opcode byte followed by its operands:
//!
//! | operands | opcodes |
//! |---|---|
//! | none | arithmetic, bitwise, comparisons, `Null`/`True`/`False`, `Pop`, `Not`, `Negate`, `Append`, `End` |
//! | constant index (`u8`) | `Constant`, `AddConstant`, `ConstantAppend`, `Variable`, `VariableAppend`, `Get`, `GetAppend` |
//! | two constant indices | `VariableGet`, `VariableGetAppend` |
//! | argument count (`u8`) | `Call`, `CallAppend` |
//! | section index (`u8`) | `Section` |
//! | big-endian `i16` displacement | `Jump`, `JumpIfTrue`, `JumpIfFalse` |
//!
//! The encoding is internal to one process; nothing persists bytecode.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    Constant,
    Null,
    True,
    False,

    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,

    AddConstant,

    Pop,
    Not,
    Negate,

    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,

    Equals,
    NotEquals,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Variable,
    Get,
    Call,

    Jump,
    JumpIfTrue,
    JumpIfFalse,

    Section,

    Append,
    ConstantAppend,
    VariableAppend,
    GetAppend,
    CallAppend,

    VariableGet,
    VariableGetAppend,

    End,
}

/// Operand layout of an opcode.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Operands {
    None,
    Constant,
    ConstantPair,
    ArgCount,
    SectionIndex,
    Jump,
}

impl Operands {
    /// Operand bytes following the opcode.
    pub const fn width(self) -> usize {
        match self {
            Operands::None => 0,
            Operands::Constant | Operands::ArgCount | Operands::SectionIndex => 1,
            Operands::ConstantPair | Operands::Jump => 2,
        }
    }
}

impl Opcode {
    /// Every opcode, indexed by its byte value.
    pub const ALL: [Opcode; 42] = [
        Opcode::Constant,
        Opcode::Null,
        Opcode::True,
        Opcode::False,
        Opcode::Add,
        Opcode::Subtract,
        Opcode::Multiply,
        Opcode::Divide,
        Opcode::Modulo,
        Opcode::Power,
        Opcode::AddConstant,
        Opcode::Pop,
        Opcode::Not,
        Opcode::Negate,
        Opcode::BitAnd,
        Opcode::BitOr,
        Opcode::BitXor,
        Opcode::BitNot,
        Opcode::ShiftLeft,
        Opcode::ShiftRight,
        Opcode::UnsignedShiftRight,
        Opcode::Equals,
        Opcode::NotEquals,
        Opcode::Greater,
        Opcode::GreaterEqual,
        Opcode::Less,
        Opcode::LessEqual,
        Opcode::Variable,
        Opcode::Get,
        Opcode::Call,
        Opcode::Jump,
        Opcode::JumpIfTrue,
        Opcode::JumpIfFalse,
        Opcode::Section,
        Opcode::Append,
        Opcode::ConstantAppend,
        Opcode::VariableAppend,
        Opcode::GetAppend,
        Opcode::CallAppend,
        Opcode::VariableGet,
        Opcode::VariableGetAppend,
        Opcode::End,
    ];

    #[inline]
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Self::ALL.get(byte as usize).copied()
    }

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub const fn operands(self) -> Operands {
        match self {
            Opcode::Constant
            | Opcode::AddConstant
            | Opcode::ConstantAppend
            | Opcode::Variable
            | Opcode::VariableAppend
            | Opcode::Get
            | Opcode::GetAppend => Operands::Constant,
            Opcode::VariableGet | Opcode::VariableGetAppend => Operands::ConstantPair,
            Opcode::Call | Opcode::CallAppend => Operands::ArgCount,
            Opcode::Section => Operands::SectionIndex,
            Opcode::Jump | Opcode::JumpIfTrue | Opcode::JumpIfFalse => Operands::Jump,
            _ => Operands::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Constant => "Constant",
            Opcode::Null => "Null",
            Opcode::True => "True",
            Opcode::False => "False",
            Opcode::Add => "Add",
            Opcode::Subtract => "Subtract",
            Opcode::Multiply => "Multiply",
            Opcode::Divide => "Divide",
            Opcode::Modulo => "Modulo",
            Opcode::Power => "Power",
            Opcode::AddConstant => "AddConstant",
            Opcode::Pop => "Pop",
            Opcode::Not => "Not",
            Opcode::Negate => "Negate",
            Opcode::BitAnd => "BitAnd",
            Opcode::BitOr => "BitOr",
            Opcode::BitXor => "BitXor",
            Opcode::BitNot => "BitNot",
            Opcode::ShiftLeft => "ShiftLeft",
            Opcode::ShiftRight => "ShiftRight",
            Opcode::UnsignedShiftRight => "UnsignedShiftRight",
            Opcode::Equals => "Equals",
            Opcode::NotEquals => "NotEquals",
            Opcode::Greater => "Greater",
            Opcode::GreaterEqual => "GreaterEqual",
            Opcode::Less => "Less",
            Opcode::LessEqual => "LessEqual",
            Opcode::Variable => "Variable",
            Opcode::Get => "Get",
            Opcode::Call => "Call",
            Opcode::Jump => "Jump",
            Opcode::JumpIfTrue => "JumpIfTrue",
            Opcode::JumpIfFalse => "JumpIfFalse",
            Opcode::Section => "Section",
            Opcode::Append => "Append",
            Opcode::ConstantAppend => "ConstantAppend",
            Opcode::VariableAppend => "VariableAppend",
            Opcode::GetAppend => "GetAppend",
            Opcode::CallAppend => "CallAppend",
            Opcode::VariableGet => "VariableGet",
            Opcode::VariableGetAppend => "VariableGetAppend",
            Opcode::End => "End",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
