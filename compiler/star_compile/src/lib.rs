//! Starscript bytecode compiler.
//!
//! Walks the template-level expressions of a [`ParseOutput`] once and emits
//! a [`Script`]. Expressions in output position (placeholder contents and
//! literal text) use fused `*Append` opcodes where possible, so the common
//! `{name}` case never touches the operand stack.

mod compiler;
mod error;

pub use compiler::Compiler;
pub use error::CompileError;

use star_eval::Script;
use star_parse::ParseOutput;
use tracing::debug;

/// Code generation switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit fused opcodes (`*Append`, `VariableGet`, `AddConstant`).
    /// Turning this off produces the generic sequences; output is the same.
    pub fuse_instructions: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            fuse_instructions: true,
        }
    }
}

/// Compile every template-level expression of `parsed`.
///
/// Expressions that failed to parse are not part of `parsed.exprs` and are
/// skipped; the caller decides whether to run a script whose template had
/// syntax errors.
#[tracing::instrument(level = "debug", skip_all, fields(exprs = parsed.exprs.len()))]
pub fn compile(parsed: &ParseOutput, options: CompileOptions) -> Result<Script, CompileError> {
    let script = Compiler::new(&parsed.arena, options).compile_template(&parsed.exprs)?;
    debug!(
        bytes = script.len(),
        constants = script.constants().len(),
        "compiled template"
    );
    Ok(script)
}
