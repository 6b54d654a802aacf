//! Starscript runtime: values, environments, bytecode and the VM.
//!
//! The compiler writes [`Script`]s through the [`Opcode`] and constant pool
//! API here; hosts run them with a [`Vm`] against an [`Environment`].

mod environment;
mod errors;
mod opcode;
mod script;
mod value;
mod vm;

pub use environment::{Environment, LazyFn, Slot};
pub use errors::RuntimeError;
pub use opcode::{Opcode, Operands};
pub use script::{JumpOutOfRange, Script};
pub use value::{Function, HostObject, NativeFn, Value};
pub use vm::{Output, Section, Vm};
