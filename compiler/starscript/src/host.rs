//! Host-facing entry point.

use star_compile::CompileOptions;
use star_eval::{Environment, Output, RuntimeError, Script, Slot, Value, Vm};

use crate::completions::{completions, Completion};
use crate::{compile_with, stdlib, Compilation};

/// A VM, its globals and the compile options used for new templates.
///
/// Globals are shared by handle: [`Starscript::with_shared_globals`] gives
/// a second instance (with its own VM) that sees the same variables.
pub struct Starscript {
    vm: Vm,
    globals: Environment,
    options: CompileOptions,
}

impl Default for Starscript {
    fn default() -> Self {
        Self::new()
    }
}

impl Starscript {
    /// Fresh globals with the standard library installed.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StarscriptBuilder {
        StarscriptBuilder::default()
    }

    /// New instance over the same globals as `other`.
    pub fn with_shared_globals(other: &Starscript) -> Self {
        Starscript {
            vm: Vm::new(),
            globals: other.globals.clone(),
            options: other.options,
        }
    }

    #[inline]
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    #[inline]
    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn compile(&self, source: &str) -> Compilation {
        compile_with(source, self.options)
    }

    pub fn run(&mut self, script: &Script) -> Result<Output, RuntimeError> {
        self.vm.run(script, &self.globals)
    }

    /// Run and concatenate any sections.
    pub fn run_to_string(&mut self, script: &Script) -> Result<String, RuntimeError> {
        self.run(script).map(Output::into_text)
    }

    /// See [`Environment::set`].
    pub fn set(&self, name: &str, value: impl Into<Value>) -> &Environment {
        self.globals.set(name, value)
    }

    /// See [`Environment::set_lazy`].
    pub fn set_lazy(
        &self,
        name: &str,
        supplier: impl Fn() -> Value + Send + Sync + 'static,
    ) -> &Environment {
        self.globals.set_lazy(name, supplier)
    }

    /// See [`Environment::set_function`].
    pub fn set_function(
        &self,
        name: &str,
        function: impl Fn(&mut Vm, u8) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    ) -> &Environment {
        self.globals.set_function(name, function)
    }

    pub fn remove(&self, name: &str) -> Option<Slot> {
        self.globals.remove(name)
    }

    pub fn clear(&self) {
        self.globals.clear();
    }

    /// Completion candidates at byte `position` of `source`.
    pub fn completions(&self, source: &str, position: usize) -> Vec<Completion> {
        completions(source, position, &self.globals)
    }
}

/// Configuration for a [`Starscript`].
#[derive(Clone, Debug)]
pub struct StarscriptBuilder {
    globals: Option<Environment>,
    options: CompileOptions,
    standard_lib: bool,
}

impl Default for StarscriptBuilder {
    fn default() -> Self {
        StarscriptBuilder {
            globals: None,
            options: CompileOptions::default(),
            standard_lib: true,
        }
    }
}

impl StarscriptBuilder {
    /// Use an existing environment instead of a fresh one.
    #[must_use]
    pub fn globals(mut self, globals: Environment) -> Self {
        self.globals = Some(globals);
        self
    }

    #[must_use]
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Install the standard library into the globals (default `true`).
    #[must_use]
    pub fn standard_lib(mut self, enabled: bool) -> Self {
        self.standard_lib = enabled;
        self
    }

    pub fn build(self) -> Starscript {
        let globals = self.globals.unwrap_or_default();
        if self.standard_lib {
            stdlib::init(&globals);
        }
        Starscript {
            vm: Vm::new(),
            globals,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests;
