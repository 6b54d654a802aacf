//! Starscript: a small templating language for host-driven text.
//!
//! Templates mix literal text with `{expr}` placeholders and `#N{expr}`
//! numbered sections:
//!
//! ```
//! use starscript::Starscript;
//!
//! let mut ss = Starscript::new();
//! ss.set("player.name", "Eve");
//! let compiled = ss.compile("Hi {player.name}, pi is about {round(PI, 2)}!");
//! assert!(compiled.errors.is_empty());
//! assert_eq!(ss.run_to_string(&compiled.script).unwrap(), "Hi Eve, pi is about 3.14!");
//! ```
//!
//! The pipeline is `star_lexer` → `star_parse` → `star_compile` → `star_eval`;
//! this crate wires it together and adds the standard library, editor
//! completions and variable renaming.

pub mod completions;
mod host;
pub mod replace;
pub mod stdlib;

use std::sync::Once;

use thiserror::Error;

pub use completions::{completions, Completion};
pub use host::{Starscript, StarscriptBuilder};
pub use replace::{ReplaceError, VariableReplacer};
pub use star_compile::{CompileError, CompileOptions};
pub use star_eval::{
    Environment, Function, HostObject, Opcode, Output, RuntimeError, Script, Section, Slot, Value,
    Vm,
};
pub use star_parse::{parse, ParseError, ParseOutput};

/// Anything that stops a template from compiling cleanly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result of [`compile`].
///
/// Syntax errors do not prevent compilation: the placeholders that parsed
/// are compiled and the rest are reported in `errors`. A bytecode limit
/// violation leaves `script` empty.
#[derive(Clone, Debug, Default)]
pub struct Compilation {
    pub script: Script,
    pub errors: Vec<Error>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The script if there were no errors at all.
    pub fn into_result(self) -> Result<Script, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(self.script)
        } else {
            Err(self.errors)
        }
    }
}

/// Compile `source` with default options.
pub fn compile(source: &str) -> Compilation {
    compile_with(source, CompileOptions::default())
}

/// Compile `source`.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn compile_with(source: &str, options: CompileOptions) -> Compilation {
    compile_parsed(&parse(source), options)
}

/// Compile an already parsed (and possibly rewritten) template.
pub fn compile_parsed(parsed: &ParseOutput, options: CompileOptions) -> Compilation {
    let mut errors: Vec<Error> = parsed.errors.iter().cloned().map(Error::from).collect();
    let script = star_compile::compile(parsed, options).unwrap_or_else(|err| {
        tracing::debug!(%err, "compilation failed");
        errors.push(err.into());
        Script::empty()
    });
    Compilation { script, errors }
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
/// `RUST_LOG=star_parse=debug,star_eval=trace` shows parse summaries and
/// section flushes.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
