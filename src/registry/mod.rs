//! Scheme registry and colour definition store.
//!
//! The registry owns every scheme, the colours defined in each, and the
//! inverse reference index. It never resolves references itself; that is
//! the resolver's job, and it always walks the live registry.
//!
//! # Example
//!
//! ```ignore
//! use chroma::registry::{ColourEntry, ColourRegistry};
//! use chroma::{FunctionTable, Value};
//!
//! let mut registry = ColourRegistry::new();
//! registry.define_scheme("dark", "Dark", Some("default"))?;
//! registry.add_colours(
//!     "dark",
//!     [ColourEntry::new("text", Value::parse("#eee"))],
//!     &FunctionTable::with_builtins(),
//! )?;
//! ```

mod graph;
mod scheme;
pub mod types;

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::{ChromaError, Result, Stage};
use crate::functions::FunctionCatalogue;
use crate::keyword::{self, CheckStage};
use crate::types::Value;

pub use graph::DependencyGraph;
pub use scheme::{ColourDefinition, ColourEntry, ColourScheme, ColourValue, FunctionSpec};
pub use types::{ColourId, ColourRef, SchemeId};

/// Name given to the default scheme until it is redefined.
pub const DEFAULT_SCHEME_NAME: &str = "default";

/// Description given to the default scheme until it is redefined.
pub const DEFAULT_SCHEME_DESCRIPTION: &str = "Default";

/// All registered schemes and their colours.
///
/// The default scheme is created with the registry and can never be
/// removed. Nothing is ever deleted: schemes accumulate and redefinition
/// mutates in place.
#[derive(Debug, Clone)]
pub struct ColourRegistry {
    schemes: Vec<ColourScheme>,
    by_name: HashMap<String, SchemeId>,
}

impl Default for ColourRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ColourRegistry {
    /// Create a registry holding only the default scheme.
    pub fn new() -> Self {
        let default = ColourScheme::new(
            SchemeId::DEFAULT,
            DEFAULT_SCHEME_NAME,
            DEFAULT_SCHEME_DESCRIPTION,
            None,
        );
        let mut by_name = HashMap::new();
        by_name.insert(DEFAULT_SCHEME_NAME.to_string(), SchemeId::DEFAULT);

        Self {
            schemes: vec![default],
            by_name,
        }
    }

    /// Register a new scheme.
    pub fn define_scheme(
        &mut self,
        name: &str,
        description: &str,
        parent: Option<&str>,
    ) -> Result<SchemeId> {
        let parent_id = match parent {
            Some(parent) => Some(self.id_of(parent).ok_or_else(|| ChromaError::ParentNotFound {
                scheme: name.to_string(),
                parent: parent.to_string(),
            })?),
            None => None,
        };

        if self.by_name.contains_key(name) {
            return Err(self.duplicate(name));
        }

        let id = SchemeId(self.schemes.len());
        self.schemes
            .push(ColourScheme::new(id, name, description, parent_id));
        self.by_name.insert(name.to_string(), id);

        debug!(scheme = name, parent = ?parent, "defined colour scheme");
        Ok(id)
    }

    /// Update the default scheme's name and/or description in place.
    ///
    /// Children keep their link to the default scheme across a rename.
    pub fn redefine_default_scheme(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        if let Some(name) = name {
            let current = self.default_scheme().name.clone();
            if name != current {
                if self.by_name.contains_key(name) {
                    return Err(self.duplicate(name));
                }
                self.by_name.remove(&current);
                self.by_name.insert(name.to_string(), SchemeId::DEFAULT);
                self.schemes[SchemeId::DEFAULT.0].name = name.to_string();
                self.rename_referrers(&current, name);
            }
        }

        if let Some(description) = description {
            self.schemes[SchemeId::DEFAULT.0].description = description.to_string();
        }

        let default = self.default_scheme();
        debug!(
            name = %default.name,
            description = %default.description,
            "redefined default colour scheme"
        );
        Ok(())
    }

    /// Get a scheme by name.
    pub fn get_scheme(&self, name: &str) -> Result<&ColourScheme> {
        self.id_of(name)
            .map(|id| self.scheme(id))
            .ok_or_else(|| ChromaError::SchemeNotFound {
                scheme: name.to_string(),
            })
    }

    /// Look up a scheme handle by name.
    pub fn id_of(&self, name: &str) -> Option<SchemeId> {
        self.by_name.get(name).copied()
    }

    /// Check if a scheme is registered.
    pub fn has_scheme(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get a scheme by handle.
    pub fn scheme(&self, id: SchemeId) -> &ColourScheme {
        &self.schemes[id.0]
    }

    pub fn default_scheme(&self) -> &ColourScheme {
        self.scheme(SchemeId::DEFAULT)
    }

    /// All schemes in registration order.
    pub fn schemes(&self) -> impl Iterator<Item = &ColourScheme> {
        self.schemes.iter()
    }

    /// Walk a scheme and its ancestors, closest first.
    pub fn ancestry_of(&self, name: &str) -> Result<Ancestry<'_>> {
        let id = self.id_of(name).ok_or_else(|| ChromaError::SchemeNotFound {
            scheme: name.to_string(),
        })?;
        Ok(self.ancestry(id))
    }

    /// Walk a scheme and its ancestors by handle.
    pub fn ancestry(&self, id: SchemeId) -> Ancestry<'_> {
        Ancestry {
            registry: self,
            next: Some(id),
            seen: Vec::new(),
        }
    }

    /// Get a colour defined directly in a scheme (no inheritance).
    pub fn get_definition(&self, scheme: &str, colour: &str) -> Option<&ColourDefinition> {
        self.id_of(scheme)
            .and_then(|id| self.scheme(id).colour(colour))
    }

    /// Find the closest definition of `colour` in the ancestry of `start`,
    /// along with the scheme that holds it.
    pub fn find_definition(
        &self,
        start: SchemeId,
        colour: &str,
    ) -> Result<Option<(&ColourScheme, &ColourDefinition)>> {
        for scheme in self.ancestry(start) {
            let scheme = scheme?;
            if let Some(definition) = scheme.colour(colour) {
                return Ok(Some((scheme, definition)));
            }
        }
        Ok(None)
    }

    /// Bulk-register colours into a scheme.
    ///
    /// Entries are processed in order, so a later entry may reference an
    /// earlier one. The batch is not transactional: entries before a
    /// failing one stay registered.
    pub fn add_colours(
        &mut self,
        scheme: &str,
        entries: impl IntoIterator<Item = ColourEntry>,
        functions: &dyn FunctionCatalogue,
    ) -> Result<()> {
        let scheme_id = self.id_of(scheme).ok_or_else(|| ChromaError::SchemeNotFound {
            scheme: scheme.to_string(),
        })?;

        let mut added = 0usize;
        for entry in entries {
            self.add_colour(scheme_id, entry, functions)?;
            added += 1;
        }

        debug!(scheme, count = added, "added colours");
        Ok(())
    }

    fn add_colour(
        &mut self,
        scheme_id: SchemeId,
        entry: ColourEntry,
        catalogue: &dyn FunctionCatalogue,
    ) -> Result<()> {
        let ColourEntry {
            name,
            value,
            functions,
        } = entry;

        let value = Self::classify(&name, value)?;

        let mut specs = BTreeMap::new();
        for (variant, function, args) in functions {
            if !catalogue.has_function(&function) {
                return Err(ChromaError::FunctionNotFound {
                    function,
                    colour: name,
                    stage: Stage::Adding,
                });
            }
            specs.insert(variant, FunctionSpec { function, args });
        }

        let target = match &value {
            ColourValue::Reference(reference) => {
                Some(self.reference_target(scheme_id, &name, reference)?)
            }
            _ => None,
        };

        let referrer = ColourId::new(self.scheme(scheme_id).name.clone(), name.clone());
        let was_reference = matches!(
            self.schemes[scheme_id.0].colours.get(&name).map(|old| &old.value),
            Some(ColourValue::Reference(_))
        );
        if was_reference {
            self.forget_referrer(&referrer);
        }

        if let (Some(target), ColourValue::Reference(reference)) = (target, &value) {
            if let Some(definition) = self.schemes[target.0].colours.get_mut(&reference.colour) {
                definition.referenced_by.insert(referrer);
            }
        }

        let colours = &mut self.schemes[scheme_id.0].colours;
        let referenced_by = colours
            .remove(&name)
            .map(|old| old.referenced_by)
            .unwrap_or_default();
        colours.insert(
            name.clone(),
            ColourDefinition {
                name,
                value,
                functions: specs,
                referenced_by,
            },
        );

        Ok(())
    }

    /// Turn a host value into a colour definition value.
    fn classify(name: &str, value: Value) -> Result<ColourValue> {
        match value {
            Value::Colour(colour) => Ok(ColourValue::Literal(colour)),
            Value::Keyword(keyword) => {
                keyword::check(&keyword, false, CheckStage::Definition, false)?;
                Ok(ColourValue::Keyword {
                    name: keyword,
                    quoted: false,
                })
            }
            Value::String { text, quoted } => {
                if quoted && keyword::is_keyword_name(&text) {
                    Ok(ColourValue::Keyword { name: text, quoted })
                } else if !quoted && keyword::is_keyword_name(&text) {
                    keyword::check(&text, false, CheckStage::Definition, false)?;
                    Ok(ColourValue::Keyword {
                        name: text.to_ascii_lowercase(),
                        quoted: false,
                    })
                } else {
                    Ok(ColourValue::Reference(ColourRef::parse(&text)))
                }
            }
            other => Err(ChromaError::InvalidColourValue {
                value: other.to_string(),
                colour: name.to_string(),
            }),
        }
    }

    /// Check a reference's target exists now and return the scheme that
    /// holds it.
    fn reference_target(
        &self,
        scheme_id: SchemeId,
        adding: &str,
        reference: &ColourRef,
    ) -> Result<SchemeId> {
        let start = match &reference.scheme {
            Some(qualifier) => self.id_of(qualifier).ok_or_else(|| ChromaError::SchemeNotFound {
                scheme: qualifier.clone(),
            })?,
            None => scheme_id,
        };

        match self.find_definition(start, &reference.colour)? {
            Some((scheme, _)) => Ok(scheme.id),
            None => Err(ChromaError::UndefinedReference {
                colour: reference.colour.clone(),
                adding: adding.to_string(),
            }),
        }
    }

    /// Colours that reference the given colour.
    ///
    /// A referrer is recorded on the definition its reference found when
    /// it was added. A later override in a child scheme starts with no
    /// referrers of its own, even though inherited references resolve
    /// through it when looked up from that child.
    pub fn referenced_by(&self, scheme: &str, colour: &str) -> Vec<&ColourId> {
        self.get_definition(scheme, colour)
            .map(|d| d.referenced_by.iter().collect())
            .unwrap_or_default()
    }

    /// Remove a definition outright, leaving references to it dangling.
    #[cfg(test)]
    pub(crate) fn remove_colour(&mut self, scheme: &str, colour: &str) -> Option<ColourDefinition> {
        let id = self.id_of(scheme)?;
        self.schemes[id.0].colours.remove(colour)
    }

    /// Drop a colour from the index entry of whatever it used to reference.
    fn forget_referrer(&mut self, referrer: &ColourId) {
        for scheme in &mut self.schemes {
            for definition in scheme.colours.values_mut() {
                definition.referenced_by.remove(referrer);
            }
        }
    }

    /// Keep qualified names in the reference index in step with a rename.
    fn rename_referrers(&mut self, old: &str, new: &str) {
        for scheme in &mut self.schemes {
            for definition in scheme.colours.values_mut() {
                let stale: Vec<ColourId> = definition
                    .referenced_by
                    .iter()
                    .filter(|id| id.scheme == old)
                    .cloned()
                    .collect();
                for id in stale {
                    definition.referenced_by.remove(&id);
                    definition
                        .referenced_by
                        .insert(ColourId::new(new, id.colour));
                }
                if let ColourValue::Reference(reference) = &mut definition.value {
                    if reference.scheme.as_deref() == Some(old) {
                        reference.scheme = Some(new.to_string());
                    }
                }
            }
        }
    }

    fn duplicate(&self, name: &str) -> ChromaError {
        let help = (self.default_scheme().name == name).then(|| {
            "Use define_default_colour_scheme to change the default scheme".to_string()
        });
        ChromaError::DuplicateScheme {
            scheme: name.to_string(),
            help,
        }
    }
}

/// Lazy walk from a scheme up through its parents.
///
/// Yields an error and stops if a scheme is visited twice.
pub struct Ancestry<'a> {
    registry: &'a ColourRegistry,
    next: Option<SchemeId>,
    seen: Vec<SchemeId>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = Result<&'a ColourScheme>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;

        if self.seen.contains(&id) {
            let mut chain: Vec<&str> = self
                .seen
                .iter()
                .map(|id| self.registry.scheme(*id).name())
                .collect();
            chain.push(self.registry.scheme(id).name());
            return Some(Err(ChromaError::CyclicInheritance {
                chain: chain.join(" -> "),
            }));
        }

        self.seen.push(id);
        let scheme = self.registry.scheme(id);
        self.next = scheme.parent;
        Some(Ok(scheme))
    }
}

/// Collect the names of a scheme's ancestry, failing on a cycle.
pub fn ancestry_names(registry: &ColourRegistry, name: &str) -> Result<Vec<String>> {
    registry
        .ancestry_of(name)?
        .map(|scheme| scheme.map(|s| s.name().to_string()))
        .collect()
}

/// Detect cycles in a set of parent links before they reach the registry.
pub fn check_parent_links<'a>(
    links: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> Result<()> {
    let parents: HashMap<&str, Option<&str>> = links.into_iter().collect();

    for start in parents.keys() {
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(*start);
        while let Some(name) = current {
            chain.push(name);
            if !seen.insert(name) {
                return Err(ChromaError::CyclicInheritance {
                    chain: chain.join(" -> "),
                });
            }
            current = parents.get(name).copied().flatten();
        }
    }
    Ok(())
}
