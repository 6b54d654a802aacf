//! Compile-time limit violations.
//!
//! Syntax problems are reported by the parser; these are the encoding
//! limits of the bytecode format.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Too many constants in one template (the limit is 256).")]
    TooManyConstants,

    #[error("Jump of {distance} bytes does not fit in 16 bits.")]
    JumpTooLarge { distance: usize },

    #[error("Cannot call a function with {count} arguments (the limit is 255).")]
    TooManyArguments { count: usize },

    #[error("Section index {index} is larger than 255.")]
    SectionIndex { index: u32 },
}
