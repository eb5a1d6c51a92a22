//! Function catalogue and variant dispatch.
//!
//! The catalogue is owned by the host evaluator: it decides which
//! functions exist and may change them between a colour's definition and
//! its use. That is why both `add_colours` and `apply_variant` check for
//! the function independently.

mod builtin;

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::error::{ChromaError, Result, Stage};
use crate::types::Value;

/// The host's table of callable functions.
pub trait FunctionCatalogue {
    /// Check if a function is registered.
    fn has_function(&self, name: &str) -> bool;

    /// Invoke a function with already-typed arguments.
    fn call(&self, name: &str, args: &[Value]) -> Result<Value>;
}

/// A native function: receives typed arguments, returns a typed value.
pub type NativeFunction = Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A mutable function catalogue backed by native closures.
#[derive(Default)]
pub struct FunctionTable {
    functions: HashMap<String, NativeFunction>,
}

impl FunctionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the builtin colour functions registered.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        builtin::register_all(&mut table);
        table
    }

    /// Register (or replace) a function.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(function));
        self
    }

    /// Remove a function. Returns whether it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    /// All function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
            .field("functions", &self.names())
            .finish()
    }
}

impl FunctionCatalogue for FunctionTable {
    fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let function = self.functions.get(name).ok_or_else(|| {
            ChromaError::argument(
                format!("Unknown colour function: {}", name),
                Some(format!("Available functions: {}", self.names().join(", "))),
            )
        })?;
        function(args)
    }
}

/// Apply a function to a resolved base colour.
///
/// The base is prepended to `bound_args`. `colour` names the colour being
/// resolved, for the error message.
pub fn apply_variant(
    catalogue: &dyn FunctionCatalogue,
    base: Value,
    function: &str,
    bound_args: &[Value],
    colour: &str,
) -> Result<Value> {
    if !catalogue.has_function(function) {
        return Err(ChromaError::FunctionNotFound {
            function: function.to_string(),
            colour: colour.to_string(),
            stage: Stage::Resolving,
        });
    }

    let mut args = Vec::with_capacity(bound_args.len() + 1);
    args.push(base);
    args.extend_from_slice(bound_args);

    trace!(function, colour, "applying colour function");
    catalogue.call(function, &args)
}
