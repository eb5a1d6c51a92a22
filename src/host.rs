//! The operations a stylesheet evaluator calls.
//!
//! `Chroma` bundles the registry, the function catalogue and the output
//! style the host writes with. Arguments arrive already typed as
//! [`Value`]s; everything else (parsing, stylesheet output) belongs to the
//! host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChromaError, Result};
use crate::functions::{FunctionCatalogue, FunctionTable};
use crate::keyword::{self, CheckStage};
use crate::registry::{ColourEntry, ColourId, ColourRegistry};
use crate::resolve::Resolver;
use crate::types::Value;

/// How the host writes stylesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    /// Colour keywords may be swapped for their shortest hex form.
    Compressed,
}

impl OutputStyle {
    pub fn is_compressed(self) -> bool {
        self == OutputStyle::Compressed
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Expanded => write!(f, "expanded"),
            OutputStyle::Compressed => write!(f, "compressed"),
        }
    }
}

/// A colour scheme engine bound to one host.
#[derive(Debug)]
pub struct Chroma {
    registry: ColourRegistry,
    functions: FunctionTable,
    output_style: OutputStyle,
}

impl Default for Chroma {
    fn default() -> Self {
        Self::new()
    }
}

impl Chroma {
    /// Create an engine with the builtin colour functions.
    pub fn new() -> Self {
        Self::with_functions(FunctionTable::with_builtins())
    }

    /// Create an engine with a custom function table.
    pub fn with_functions(functions: FunctionTable) -> Self {
        Self {
            registry: ColourRegistry::new(),
            functions,
            output_style: OutputStyle::default(),
        }
    }

    pub fn registry(&self) -> &ColourRegistry {
        &self.registry
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// The catalogue may change at any time; variants recheck on use.
    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    pub fn output_style(&self) -> OutputStyle {
        self.output_style
    }

    pub fn set_output_style(&mut self, style: OutputStyle) {
        self.output_style = style;
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry, &self.functions)
    }

    /// Look up a colour: `colour(name, [scheme], [function], [args...])`.
    ///
    /// The argument after the name is a scheme when one of that name is
    /// registered, otherwise a variant of the colour or a catalogue
    /// function. Remaining arguments follow the function's bound ones.
    pub fn colour(&self, args: &[Value]) -> Result<Value> {
        let (name, rest) = args.split_first().ok_or_else(|| {
            ChromaError::argument(
                "colour() requires a colour name",
                Some("Usage: colour(name, [scheme], [function], [args...])".to_string()),
            )
        })?;
        let name = Self::name_of(name)?;

        let resolver = self.resolver();
        let mut scheme = self.registry.default_scheme().name().to_string();
        let mut rest = rest;
        let mut scheme_given = false;

        if let Some((first, tail)) = rest.split_first() {
            if let Some(candidate) = Self::text_of(first) {
                if self.registry.has_scheme(candidate) {
                    scheme = candidate.to_string();
                    rest = tail;
                    scheme_given = true;
                }
            }
        }

        let mut function = None;
        if let Some((first, tail)) = rest.split_first() {
            let candidate = Self::text_of(first).ok_or_else(|| {
                ChromaError::argument(
                    format!("Expected a scheme or function name, got \"{}\"", first),
                    None,
                )
            })?;
            let known = resolver.has_variant(&scheme, name, candidate)
                || self.functions.has_function(candidate);
            if !known && !scheme_given {
                return Err(ChromaError::SchemeNotFound {
                    scheme: candidate.to_string(),
                });
            }
            function = Some(candidate);
            rest = tail;
        }

        let value = resolver.resolve_variant(&scheme, name, function, rest)?;
        self.check_output(&value)?;
        Ok(value)
    }

    /// Register a scheme. `parent` must already exist.
    pub fn define_colour_scheme(
        &mut self,
        name: &str,
        description: &str,
        parent: Option<&str>,
    ) -> Result<()> {
        self.registry.define_scheme(name, description, parent)?;
        Ok(())
    }

    /// Rename and/or redescribe the default scheme.
    pub fn define_default_colour_scheme(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        self.registry.redefine_default_scheme(name, description)
    }

    /// Add colours to a scheme, the default scheme when `scheme` is `None`.
    pub fn add_colours(
        &mut self,
        scheme: Option<&str>,
        entries: impl IntoIterator<Item = ColourEntry>,
    ) -> Result<()> {
        let scheme = match scheme {
            Some(scheme) => scheme.to_string(),
            None => self.registry.default_scheme().name().to_string(),
        };
        self.registry.add_colours(&scheme, entries, &self.functions)
    }

    pub fn is_colour_keyword(&self, value: &Value) -> bool {
        keyword::is_keyword(value)
    }

    /// Check a value against the current output style.
    pub fn is_dangerous_colour_keyword_value(&self, value: &Value) -> bool {
        keyword::is_dangerous(value, self.output_style.is_compressed())
    }

    /// The keyword a compressed colour stood for, if it can be told apart.
    pub fn keyword_for_value(&self, value: &Value) -> Option<String> {
        keyword::keyword_for_value(value, self.output_style.is_compressed())
    }

    /// Colours that reference `scheme.colour`.
    pub fn referenced_by(&self, scheme: &str, colour: &str) -> Vec<&ColourId> {
        self.registry.referenced_by(scheme, colour)
    }

    fn check_output(&self, value: &Value) -> Result<()> {
        if let Value::Keyword(name) = value {
            debug!(keyword = %name, style = %self.output_style, "checking keyword output");
            keyword::check(
                name,
                false,
                CheckStage::Output,
                self.output_style.is_compressed(),
            )?;
        }
        Ok(())
    }

    fn name_of(value: &Value) -> Result<&str> {
        Self::text_of(value).ok_or_else(|| {
            ChromaError::argument(format!("Expected a colour name, got \"{}\"", value), None)
        })
    }

    /// Names arrive as strings, or as keyword tokens when a colour shares
    /// its name with a CSS keyword.
    fn text_of(value: &Value) -> Option<&str> {
        match value {
            Value::String { text, .. } => Some(text),
            Value::Keyword(name) => Some(name),
            _ => None,
        }
    }
}
