//! Stack-based bytecode interpreter.
//!
//! [`Vm::run`] executes a [`Script`] against an [`Environment`] and returns
//! either the rendered text or, when the script contains `#N{...}` markers,
//! the ordered list of [`Section`]s. Any type error aborts the run; no
//! partial output is returned.
//!
//! Host functions share the operand stack: a function called with `n`
//! arguments finds them on top of the stack (last argument on top) and pops
//! them through the helpers below.

use std::fmt;
use std::mem;
use std::sync::Arc;

use crate::errors::RuntimeError;
use crate::{Environment, HostObject, Opcode, Script, Value};

/// One numbered slice of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub index: u8,
    pub text: String,
}

/// Result of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// No section marker executed.
    Text(String),
    /// One entry per flushed section, in execution order.
    Sections(Vec<Section>),
}

impl Output {
    /// Full text; sections are concatenated in order.
    pub fn into_text(self) -> String {
        match self {
            Output::Text(text) => text,
            Output::Sections(sections) => sections.into_iter().map(|s| s.text).collect(),
        }
    }

    pub fn sections(&self) -> Option<&[Section]> {
        match self {
            Output::Text(_) => None,
            Output::Sections(sections) => Some(sections),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Sections(sections) => sections.iter().try_for_each(|s| f.write_str(&s.text)),
        }
    }
}

/// Output buffer plus the section chain built so far.
#[derive(Default)]
struct Sink {
    text: String,
    sections: Vec<Section>,
    index: u8,
    sectioned: bool,
}

impl Sink {
    /// Close the current section and start section `next`. The implicit
    /// leading section is dropped when nothing was written to it.
    fn section(&mut self, next: u8) {
        let text = mem::take(&mut self.text);
        if self.sectioned || !text.is_empty() {
            self.flush(text);
        }
        self.sectioned = true;
        self.index = next;
    }

    fn flush(&mut self, text: String) {
        tracing::trace!(index = self.index, len = text.len(), "section flushed");
        self.sections.push(Section {
            index: self.index,
            text,
        });
    }

    fn finish(mut self) -> Output {
        if !self.sectioned {
            return Output::Text(self.text);
        }
        let text = mem::take(&mut self.text);
        self.flush(text);
        Output::Sections(self.sections)
    }
}

/// Instruction pointer over one script.
struct Reader<'s> {
    code: &'s [u8],
    constants: &'s [Value],
    ip: usize,
}

impl<'s> Reader<'s> {
    #[inline]
    fn byte(&mut self) -> Result<u8, RuntimeError> {
        let byte = *self
            .code
            .get(self.ip)
            .ok_or(RuntimeError::MalformedScript { offset: self.ip })?;
        self.ip += 1;
        Ok(byte)
    }

    #[inline]
    fn constant(&mut self) -> Result<&'s Value, RuntimeError> {
        let offset = self.ip;
        let index = self.byte()?;
        self.constants
            .get(index as usize)
            .ok_or(RuntimeError::MalformedScript { offset })
    }

    #[inline]
    fn name(&mut self) -> Result<&'s str, RuntimeError> {
        let offset = self.ip;
        match self.constant()? {
            Value::String(name) => Ok(&**name),
            _ => Err(RuntimeError::MalformedScript { offset }),
        }
    }

    /// Read a jump operand and resolve it to an absolute offset.
    fn jump_target(&mut self) -> Result<usize, RuntimeError> {
        let offset = self.ip;
        let bytes = [self.byte()?, self.byte()?];
        let jump = isize::from(i16::from_be_bytes(bytes));
        self.ip
            .checked_add_signed(jump)
            .filter(|&target| target <= self.code.len())
            .ok_or(RuntimeError::MalformedScript { offset })
    }
}

fn lookup(map: &Environment, name: &str) -> Value {
    map.get_raw(name).unwrap_or_default()
}

/// Field `name` of `receiver`; `null` for non-maps and missing fields.
fn field(receiver: &Value, name: &str) -> Value {
    match receiver {
        Value::Map(map) => lookup(map, name),
        _ => Value::Null,
    }
}

fn add(left: Value, right: &Value) -> Result<Value, RuntimeError> {
    match (&left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), _) => {
            let mut out = String::with_capacity(a.len() + 16);
            out.push_str(a);
            right.write_to(&mut out);
            Ok(Value::from(out))
        }
        _ => Err(RuntimeError::type_mismatch(
            "Can only add 2 numbers or 1 string and other value.",
        )),
    }
}

/// Truncating conversion used by the bitwise opcodes.
#[inline]
fn to_bits(n: f64) -> i64 {
    n as i64
}

#[inline]
fn shift_count(n: i64) -> u32 {
    (n & 63) as u32
}

/// Bytecode interpreter.
///
/// A `Vm` owns only its operand stack, so one instance can run any number
/// of scripts against any environment, one run at a time.
#[derive(Default)]
pub struct Vm {
    stack: Vec<Value>,
    running: bool,
}

impl Vm {
    pub fn new() -> Self {
        Vm {
            stack: Vec::with_capacity(16),
            running: false,
        }
    }

    /// Execute `script` with `globals` as the variable namespace.
    pub fn run(&mut self, script: &Script, globals: &Environment) -> Result<Output, RuntimeError> {
        if self.running {
            return Err(RuntimeError::Reentrant);
        }
        self.running = true;
        self.stack.clear();
        let result = self.execute(script, globals);
        self.stack.clear();
        self.running = false;

        if let Err(err) = &result {
            tracing::trace!(%err, "run aborted");
        }
        result
    }

    fn execute(&mut self, script: &Script, globals: &Environment) -> Result<Output, RuntimeError> {
        let mut reader = Reader {
            code: script.code(),
            constants: script.constants(),
            ip: 0,
        };
        let mut sink = Sink::default();

        loop {
            let offset = reader.ip;
            let byte = reader.byte()?;
            let op = Opcode::from_byte(byte).ok_or(RuntimeError::UnknownOpcode { byte, offset })?;

            match op {
                Opcode::Constant => {
                    let value = reader.constant()?.clone();
                    self.stack.push(value);
                }
                Opcode::Null => self.stack.push(Value::Null),
                Opcode::True => self.stack.push(Value::Bool(true)),
                Opcode::False => self.stack.push(Value::Bool(false)),

                Opcode::Add => {
                    let right = self.pop()?;
                    let left = self.pop()?;
                    self.stack.push(add(left, &right)?);
                }
                Opcode::AddConstant => {
                    let right = reader.constant()?;
                    let left = self.pop()?;
                    self.stack.push(add(left, right)?);
                }
                Opcode::Subtract => self.arithmetic("Can only subtract 2 numbers.", |a, b| a - b)?,
                Opcode::Multiply => self.arithmetic("Can only multiply 2 numbers.", |a, b| a * b)?,
                Opcode::Divide => self.arithmetic("Can only divide 2 numbers.", |a, b| a / b)?,
                Opcode::Modulo => self.arithmetic("Can only modulo 2 numbers.", |a, b| a % b)?,
                Opcode::Power => self.arithmetic("Can only power 2 numbers.", f64::powf)?,

                Opcode::Pop => {
                    self.pop()?;
                }
                Opcode::Not => {
                    let value = self.pop()?;
                    self.stack.push(Value::Bool(!value.is_truthy()));
                }
                Opcode::Negate => {
                    let n = self.pop_number("This operation requires a number.")?;
                    self.stack.push(Value::Number(-n));
                }

                Opcode::BitAnd => self.bitwise(|a, b| (a & b) as f64)?,
                Opcode::BitOr => self.bitwise(|a, b| (a | b) as f64)?,
                Opcode::BitXor => self.bitwise(|a, b| (a ^ b) as f64)?,
                Opcode::ShiftLeft => self.bitwise(|a, b| a.wrapping_shl(shift_count(b)) as f64)?,
                Opcode::ShiftRight => self.bitwise(|a, b| (a >> shift_count(b)) as f64)?,
                Opcode::UnsignedShiftRight => {
                    self.bitwise(|a, b| ((a as u64) >> shift_count(b)) as f64)?;
                }
                Opcode::BitNot => {
                    let n = self.pop_number("This operation requires a number.")?;
                    self.stack.push(Value::Number(!to_bits(n) as f64));
                }

                Opcode::Equals => {
                    let right = self.pop()?;
                    let left = self.pop()?;
                    self.stack.push(Value::Bool(left == right));
                }
                Opcode::NotEquals => {
                    let right = self.pop()?;
                    let left = self.pop()?;
                    self.stack.push(Value::Bool(left != right));
                }
                Opcode::Greater => self.comparison(|a, b| a > b)?,
                Opcode::GreaterEqual => self.comparison(|a, b| a >= b)?,
                Opcode::Less => self.comparison(|a, b| a < b)?,
                Opcode::LessEqual => self.comparison(|a, b| a <= b)?,

                Opcode::Variable => {
                    let name = reader.name()?;
                    self.stack.push(lookup(globals, name));
                }
                Opcode::VariableAppend => {
                    let name = reader.name()?;
                    lookup(globals, name).write_to(&mut sink.text);
                }
                Opcode::Get => {
                    let name = reader.name()?;
                    let receiver = self.pop()?;
                    self.stack.push(field(&receiver, name));
                }
                Opcode::GetAppend => {
                    let name = reader.name()?;
                    let receiver = self.pop()?;
                    field(&receiver, name).write_to(&mut sink.text);
                }
                Opcode::VariableGet => {
                    let (variable, name) = (reader.name()?, reader.name()?);
                    let value = field(&lookup(globals, variable), name);
                    self.stack.push(value);
                }
                Opcode::VariableGetAppend => {
                    let (variable, name) = (reader.name()?, reader.name()?);
                    field(&lookup(globals, variable), name).write_to(&mut sink.text);
                }

                Opcode::Call => {
                    let arg_count = reader.byte()?;
                    let result = self.call(arg_count)?;
                    self.stack.push(result);
                }
                Opcode::CallAppend => {
                    let arg_count = reader.byte()?;
                    self.call(arg_count)?.write_to(&mut sink.text);
                }

                Opcode::Jump => {
                    reader.ip = reader.jump_target()?;
                }
                Opcode::JumpIfTrue => {
                    let target = reader.jump_target()?;
                    if self.peek()?.is_truthy() {
                        reader.ip = target;
                    }
                }
                Opcode::JumpIfFalse => {
                    let target = reader.jump_target()?;
                    if !self.peek()?.is_truthy() {
                        reader.ip = target;
                    }
                }

                Opcode::Section => {
                    let index = reader.byte()?;
                    sink.section(index);
                }

                Opcode::Append => self.pop()?.write_to(&mut sink.text),
                Opcode::ConstantAppend => reader.constant()?.write_to(&mut sink.text),

                Opcode::End => break,
            }
        }

        Ok(sink.finish())
    }

    /// Invoke the function sitting below `arg_count` arguments and collapse
    /// the frame.
    fn call(&mut self, arg_count: u8) -> Result<Value, RuntimeError> {
        let slot = self
            .stack
            .len()
            .checked_sub(arg_count as usize + 1)
            .ok_or(RuntimeError::StackUnderflow)?;
        let function = match &self.stack[slot] {
            Value::Function(function) => function.clone(),
            other => {
                return Err(RuntimeError::NotCallable {
                    type_name: other.type_name(),
                })
            }
        };

        let result = function.call(self, arg_count)?;
        if self.stack.len() <= slot {
            return Err(RuntimeError::ArgumentFrame {
                expected: arg_count,
                remaining: self.stack.len(),
            });
        }
        self.stack.truncate(slot);
        Ok(result)
    }

    fn arithmetic(&mut self, message: &str, op: impl FnOnce(f64, f64) -> f64) -> Result<(), RuntimeError> {
        let right = self.pop()?;
        let left = self.pop()?;
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                self.stack.push(Value::Number(op(a, b)));
                Ok(())
            }
            _ => Err(RuntimeError::type_mismatch(message)),
        }
    }

    fn comparison(&mut self, op: impl FnOnce(f64, f64) -> bool) -> Result<(), RuntimeError> {
        let right = self.pop()?;
        let left = self.pop()?;
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                self.stack.push(Value::Bool(op(a, b)));
                Ok(())
            }
            _ => Err(RuntimeError::type_mismatch("This operation requires 2 numbers.")),
        }
    }

    fn bitwise(&mut self, op: impl FnOnce(i64, i64) -> f64) -> Result<(), RuntimeError> {
        let right = self.pop()?;
        let left = self.pop()?;
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                self.stack.push(Value::Number(op(to_bits(a), to_bits(b))));
                Ok(())
            }
            _ => Err(RuntimeError::type_mismatch(
                "Bitwise operations require 2 numbers.",
            )),
        }
    }

    // Stack access for host functions.

    #[inline]
    pub fn push(&mut self, value: impl Into<Value>) {
        self.stack.push(value.into());
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Top of the stack.
    #[inline]
    pub fn peek(&self) -> Result<&Value, RuntimeError> {
        self.stack.last().ok_or(RuntimeError::StackUnderflow)
    }

    /// Value `depth` slots below the top (`0` is the top).
    pub fn peek_at(&self, depth: usize) -> Result<&Value, RuntimeError> {
        self.stack
            .len()
            .checked_sub(depth + 1)
            .map(|index| &self.stack[index])
            .ok_or(RuntimeError::StackUnderflow)
    }

    /// Current operand stack depth.
    #[inline]
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Pop a boolean, failing with `message` for any other type.
    pub fn pop_bool(&mut self, message: &str) -> Result<bool, RuntimeError> {
        match self.pop()? {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::type_mismatch(message)),
        }
    }

    /// Pop a number, failing with `message` for any other type.
    pub fn pop_number(&mut self, message: &str) -> Result<f64, RuntimeError> {
        match self.pop()? {
            Value::Number(n) => Ok(n),
            _ => Err(RuntimeError::type_mismatch(message)),
        }
    }

    /// Pop a string, failing with `message` for any other type.
    pub fn pop_string(&mut self, message: &str) -> Result<Arc<str>, RuntimeError> {
        match self.pop()? {
            Value::String(s) => Ok(s),
            _ => Err(RuntimeError::type_mismatch(message)),
        }
    }

    /// Pop a host object, failing with `message` for any other type.
    pub fn pop_object(&mut self, message: &str) -> Result<Arc<dyn HostObject>, RuntimeError> {
        match self.pop()? {
            Value::Object(object) => Ok(object),
            _ => Err(RuntimeError::type_mismatch(message)),
        }
    }

    /// Error for a host function to return.
    pub fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::Host {
            message: message.into(),
        }
    }
}

impl fmt::Debug for Vm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vm")
            .field("stack", &self.stack)
            .field("running", &self.running)
            .finish()
    }
}
