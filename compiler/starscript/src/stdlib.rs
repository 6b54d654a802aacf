//! Standard library.
//!
//! [`init`] registers a small set of numeric and string helpers. Every
//! function checks its argument count and types and reports misuse as a
//! [`RuntimeError`], which aborts the run like any other type error.
//! Clock, date and random helpers are left to the host.

use std::f64::consts::PI;

use star_eval::{Environment, RuntimeError, Value, Vm};

/// Largest `pad` width and `roundToString` precision accepted.
const MAX_COLUMNS: u64 = u16::MAX as u64;

/// Install the standard library into `globals`, replacing existing
/// entries with the same names.
pub fn init(globals: &Environment) {
    globals
        .set("PI", PI)
        .set_function("round", round)
        .set_function("roundToString", round_to_string)
        .set_function("floor", floor)
        .set_function("ceil", ceil)
        .set_function("abs", abs)
        .set_function("string", string)
        .set_function("toUpper", to_upper)
        .set_function("toLower", to_lower)
        .set_function("contains", contains)
        .set_function("replace", replace)
        .set_function("pad", pad);
}

fn arity(vm: &Vm, name: &str, expected: u8, got: u8) -> Result<(), RuntimeError> {
    if got == expected {
        return Ok(());
    }
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Err(vm.error(format!("{name}() requires {expected} {noun}, got {got}.")))
}

/// Round half up, to `digits` decimal places.
fn round_to(n: f64, digits: f64) -> f64 {
    let scale = 10f64.powi(digits as i32);
    if !scale.is_finite() || scale == 0.0 {
        return n;
    }
    (n * scale + 0.5).floor() / scale
}

/// Shared argument handling of `round` and `roundToString`; returns the
/// rounded number and the requested digit count.
fn round_args(vm: &mut Vm, arg_count: u8) -> Result<(f64, i32), RuntimeError> {
    match arg_count {
        1 => {
            let n = vm.pop_number("Argument to round() needs to be a number.")?;
            Ok((round_to(n, 0.0), 0))
        }
        2 => {
            let digits = vm.pop_number("Second argument to round() needs to be a number.")?;
            let n = vm.pop_number("First argument to round() needs to be a number.")?;
            Ok((round_to(n, digits), digits as i32))
        }
        _ => Err(vm.error(format!(
            "round() requires 1 or 2 arguments, got {arg_count}."
        ))),
    }
}

fn round(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    round_args(vm, arg_count).map(|(n, _)| Value::Number(n))
}

/// Like `round`, but always prints exactly the requested decimals.
fn round_to_string(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    let (n, digits) = round_args(vm, arg_count)?;
    let digits = u64::from(digits.max(0).unsigned_abs());
    if digits > MAX_COLUMNS {
        return Err(vm.error("roundToString() precision out of range."));
    }
    let digits = digits as usize;
    Ok(Value::from(format!("{n:.digits$}")))
}

fn floor(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "floor", 1, arg_count)?;
    let n = vm.pop_number("Argument to floor() needs to be a number.")?;
    Ok(Value::Number(n.floor()))
}

fn ceil(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "ceil", 1, arg_count)?;
    let n = vm.pop_number("Argument to ceil() needs to be a number.")?;
    Ok(Value::Number(n.ceil()))
}

fn abs(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "abs", 1, arg_count)?;
    let n = vm.pop_number("Argument to abs() needs to be a number.")?;
    Ok(Value::Number(n.abs()))
}

fn string(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "string", 1, arg_count)?;
    let value = vm.pop()?;
    Ok(match value {
        Value::String(_) => value,
        other => Value::from(other.to_string()),
    })
}

fn to_upper(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "toUpper", 1, arg_count)?;
    let s = vm.pop_string("Argument to toUpper() needs to be a string.")?;
    Ok(Value::from(s.to_uppercase()))
}

fn to_lower(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "toLower", 1, arg_count)?;
    let s = vm.pop_string("Argument to toLower() needs to be a string.")?;
    Ok(Value::from(s.to_lowercase()))
}

fn contains(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "contains", 2, arg_count)?;
    let needle = vm.pop_string("Second argument to contains() needs to be a string.")?;
    let haystack = vm.pop_string("First argument to contains() needs to be a string.")?;
    Ok(Value::Bool(haystack.contains(&*needle)))
}

fn replace(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "replace", 3, arg_count)?;
    let to = vm.pop_string("Third argument to replace() needs to be a string.")?;
    let from = vm.pop_string("Second argument to replace() needs to be a string.")?;
    let s = vm.pop_string("First argument to replace() needs to be a string.")?;
    Ok(Value::from(s.replace(&*from, &to)))
}

/// `pad(x, width)`: right-align in `width` columns, or left-align for a
/// negative width. Longer text is returned unchanged.
fn pad(vm: &mut Vm, arg_count: u8) -> Result<Value, RuntimeError> {
    arity(vm, "pad", 2, arg_count)?;
    let width = vm.pop_number("Second argument to pad() needs to be a number.")? as i64;
    let text = vm.pop()?.to_string();

    let columns = width.unsigned_abs();
    if columns > MAX_COLUMNS {
        return Err(vm.error("pad() width out of range."));
    }
    let fill = (columns as usize).saturating_sub(text.chars().count());
    let mut padded = String::with_capacity(text.len() + fill);
    if width >= 0 {
        padded.push_str(&" ".repeat(fill));
        padded.push_str(&text);
    } else {
        padded.push_str(&text);
        padded.push_str(&" ".repeat(fill));
    }
    Ok(Value::from(padded))
}
