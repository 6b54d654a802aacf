//! Runtime values.
//!
//! Values are immutable and cheap to clone: strings, functions, maps and
//! host objects are reference counted. Equality compares by type, then by
//! payload; functions, maps and host objects compare by identity.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Environment, RuntimeError, Vm};

/// Signature of a host function.
///
/// The function receives the VM and its argument count and must pop exactly
/// that many arguments (last argument on top) before returning its result.
pub type NativeFn = dyn Fn(&mut Vm, u8) -> Result<Value, RuntimeError> + Send + Sync;

/// Host function handle.
#[derive(Clone)]
pub struct Function(Arc<NativeFn>);

impl Function {
    pub fn new(
        f: impl Fn(&mut Vm, u8) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    ) -> Self {
        Function(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
        (self.0)(vm, arg_count)
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<function>")
    }
}

/// Opaque host data carried through scripts.
///
/// Scripts can only print it; host functions get it back with
/// [`Vm::pop_object`] and downcast through [`HostObject::as_any`].
pub trait HostObject: fmt::Display + Send + Sync + Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Display + Send + Sync + Any> HostObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Function(Function),
    Map(Environment),
    Object(Arc<dyn HostObject>),
}

impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn function(
        f: impl Fn(&mut Vm, u8) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    ) -> Self {
        Value::Function(Function::new(f))
    }

    #[inline]
    pub fn map(map: Environment) -> Self {
        Value::Map(map)
    }

    pub fn object(object: impl HostObject) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    /// `null` and `false` are falsy; everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Environment> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Append the display form to `out` without an intermediate allocation
    /// for strings.
    pub fn write_to(&self, out: &mut String) {
        use std::fmt::Write;

        match self {
            Value::String(s) => out.push_str(s),
            other => {
                // Writing into a `String` cannot fail.
                let _ = write!(out, "{other}");
            }
        }
    }
}

/// Integral numbers print without a fraction; everything else uses the
/// shortest representation that round-trips.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Function(_) => f.write_str("<function>"),
            Value::Map(map) => match map.get_raw("_toString") {
                Some(custom) => write!(f, "{custom}"),
                None => f.write_str("<map>"),
            },
            Value::Object(object) => write!(f, "{object}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Map(map) => write!(f, "{map:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            // `0.0 == -0.0`, so both must hash alike.
            Value::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                n.to_bits().hash(state);
            }
            Value::String(s) => s.hash(state),
            Value::Function(function) => function.addr().hash(state),
            Value::Map(map) => map.addr().hash(state),
            Value::Object(object) => (Arc::as_ptr(object).cast::<()>() as usize).hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Environment> for Value {
    fn from(map: Environment) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
