//! Reference resolution.
//!
//! Every lookup walks the live registry: nothing is cached, so a scheme
//! that overrides a colour changes the result for every colour that
//! references it, function variants included, without an invalidation
//! step.
//!
//! Resolution carries an *active scheme*, the scheme the current walk
//! started from. Unqualified references restart the walk from the active
//! scheme, so a colour inherited from a parent picks up the child's
//! overrides and otherwise falls through to the parent's own colours.
//! Qualified references (`dark.link`) make the named scheme active.

use tracing::trace;

use crate::error::{ChromaError, Result};
use crate::functions::{apply_variant, FunctionCatalogue};
use crate::registry::{ColourId, ColourRegistry, ColourValue, SchemeId};
use crate::types::Value;

/// Resolves colour names against a registry.
pub struct Resolver<'a> {
    registry: &'a ColourRegistry,
    functions: &'a dyn FunctionCatalogue,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ColourRegistry, functions: &'a dyn FunctionCatalogue) -> Self {
        Self {
            registry,
            functions,
        }
    }

    /// Resolve a colour to a concrete value, starting from `scheme`.
    pub fn resolve(&self, scheme: &str, colour: &str) -> Result<Value> {
        let active = self.scheme_id(scheme)?;
        self.resolve_from(active, colour, None, &mut Vec::new())
    }

    /// Resolve a colour and optionally derive a variant from it.
    ///
    /// `function` is first looked up as a variant declared on the colour
    /// (closest definition declaring it wins); otherwise it is called
    /// straight from the catalogue. `extra_args` follow any bound
    /// arguments.
    pub fn resolve_variant(
        &self,
        scheme: &str,
        colour: &str,
        function: Option<&str>,
        extra_args: &[Value],
    ) -> Result<Value> {
        let active = self.scheme_id(scheme)?;
        let base = self.resolve_from(active, colour, None, &mut Vec::new())?;

        let Some(function) = function else {
            return Ok(base);
        };

        match self.find_variant(active, colour, function)? {
            Some((name, mut args)) => {
                trace!(colour, variant = function, function = %name, "resolving variant");
                args.extend_from_slice(extra_args);
                apply_variant(self.functions, base, &name, &args, colour)
            }
            None => apply_variant(self.functions, base, function, extra_args, colour),
        }
    }

    /// Check if `name` is a variant declared on the colour in this
    /// scheme's ancestry.
    pub fn has_variant(&self, scheme: &str, colour: &str, name: &str) -> bool {
        self.registry
            .id_of(scheme)
            .and_then(|id| self.find_variant(id, colour, name).ok().flatten())
            .is_some()
    }

    fn find_variant(
        &self,
        active: SchemeId,
        colour: &str,
        variant: &str,
    ) -> Result<Option<(String, Vec<Value>)>> {
        for scheme in self.registry.ancestry(active) {
            let spec = scheme?
                .colour(colour)
                .and_then(|definition| definition.variant(variant));
            if let Some(spec) = spec {
                return Ok(Some((spec.function.clone(), spec.args.clone())));
            }
        }
        Ok(None)
    }

    fn scheme_id(&self, scheme: &str) -> Result<SchemeId> {
        self.registry
            .id_of(scheme)
            .ok_or_else(|| ChromaError::SchemeNotFound {
                scheme: scheme.to_string(),
            })
    }

    fn resolve_from(
        &self,
        active: SchemeId,
        colour: &str,
        referrer: Option<&ColourId>,
        visited: &mut Vec<(SchemeId, String)>,
    ) -> Result<Value> {
        if visited.iter().any(|(s, c)| *s == active && c == colour) {
            let mut chain: Vec<String> = visited
                .iter()
                .map(|(s, c)| self.qualified(*s, c))
                .collect();
            chain.push(self.qualified(active, colour));
            return Err(ChromaError::CyclicReference {
                chain: chain.join(" -> "),
            });
        }
        visited.push((active, colour.to_string()));

        let (owner, definition) = self
            .registry
            .find_definition(active, colour)?
            .ok_or_else(|| match referrer {
                Some(referrer) => ChromaError::DanglingReference {
                    colour: colour.to_string(),
                    referenced_by: referrer.to_string(),
                },
                None => ChromaError::ColourNotFound {
                    colour: colour.to_string(),
                },
            })?;

        let reference = match definition.value() {
            ColourValue::Reference(reference) => reference,
            ColourValue::Literal(colour) => return Ok(Value::Colour(*colour)),
            ColourValue::Keyword { name, quoted: true } => return Ok(Value::quoted(name.clone())),
            ColourValue::Keyword { name, quoted: false } => {
                return Ok(Value::Keyword(name.clone()))
            }
        };

        let next = match &reference.scheme {
            Some(qualifier) => self.scheme_id(qualifier)?,
            None => active,
        };
        let referrer = ColourId::new(owner.name(), colour);
        trace!(from = %referrer, to = %reference, "following colour reference");

        self.resolve_from(next, &reference.colour, Some(&referrer), visited)
    }

    fn qualified(&self, scheme: SchemeId, colour: &str) -> String {
        ColourId::new(self.registry.scheme(scheme).name(), colour).to_string()
    }
}
