//! Runtime errors.
//!
//! Every failure aborts the current run; there is no partial output.
//! Host callbacks report their own failures through [`RuntimeError::Host`]
//! (usually via [`Vm::error`](crate::Vm::error)).

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An operand had the wrong type for the instruction.
    #[error("{message}")]
    TypeMismatch { message: String },

    #[error("Tried to call a {type_name}, can only call functions.")]
    NotCallable { type_name: &'static str },

    #[error("Tried to pop from an empty stack.")]
    StackUnderflow,

    #[error("Unknown instruction {byte:#04x} at offset {offset}.")]
    UnknownOpcode { byte: u8, offset: usize },

    /// Truncated operand, bad constant index or jump outside the code.
    #[error("Malformed script at offset {offset}.")]
    MalformedScript { offset: usize },

    /// A function popped more than its own arguments.
    #[error("Function called with {expected} argument(s) consumed its own slot ({remaining} value(s) left on the stack).")]
    ArgumentFrame { expected: u8, remaining: usize },

    #[error("This VM is already running a script.")]
    Reentrant,

    /// Raised by a host function.
    #[error("{message}")]
    Host { message: String },
}

impl RuntimeError {
    pub(crate) fn type_mismatch(message: &str) -> Self {
        RuntimeError::TypeMismatch {
            message: message.to_owned(),
        }
    }
}
