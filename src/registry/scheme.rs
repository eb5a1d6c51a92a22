//! Scheme records and colour definitions.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::types::{Colour, Value};

use super::types::{ColourId, ColourRef, SchemeId};

/// A named, inheritable collection of colour definitions.
#[derive(Debug, Clone)]
pub struct ColourScheme {
    pub(crate) id: SchemeId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) parent: Option<SchemeId>,
    pub(crate) colours: HashMap<String, ColourDefinition>,
}

impl ColourScheme {
    pub(crate) fn new(
        id: SchemeId,
        name: impl Into<String>,
        description: impl Into<String>,
        parent: Option<SchemeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            parent,
            colours: HashMap::new(),
        }
    }

    pub fn id(&self) -> SchemeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<SchemeId> {
        self.parent
    }

    /// Get a colour defined directly in this scheme.
    pub fn colour(&self, name: &str) -> Option<&ColourDefinition> {
        self.colours.get(name)
    }

    /// Names of the colours defined directly in this scheme, sorted.
    pub fn colour_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colours.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// What a colour definition holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ColourValue {
    /// A colour literal: `#00f`
    Literal(Colour),
    /// A colour keyword; quoted keywords keep their spelling under compression.
    Keyword { name: String, quoted: bool },
    /// The name of another colour, resolved on every lookup.
    Reference(ColourRef),
}

impl ColourValue {
    /// The host value of a literal or keyword. References have none.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            ColourValue::Literal(colour) => Some(Value::Colour(*colour)),
            ColourValue::Keyword { name, quoted: false } => Some(Value::Keyword(name.clone())),
            ColourValue::Keyword { name, quoted: true } => Some(Value::quoted(name.clone())),
            ColourValue::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ColourRef> {
        match self {
            ColourValue::Reference(r) => Some(r),
            _ => None,
        }
    }
}

/// A function bound to a colour under a variant name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    /// The function's name in the catalogue.
    pub function: String,
    /// Arguments passed after the resolved base colour.
    pub args: Vec<Value>,
}

/// A colour definition owned by one scheme.
#[derive(Debug, Clone)]
pub struct ColourDefinition {
    pub(crate) name: String,
    pub(crate) value: ColourValue,
    pub(crate) functions: BTreeMap<String, FunctionSpec>,
    pub(crate) referenced_by: BTreeSet<ColourId>,
}

impl ColourDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ColourValue {
        &self.value
    }

    /// Get a variant's function spec.
    pub fn variant(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// All variants, sorted by name.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &FunctionSpec)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Colours whose definitions reference this one.
    pub fn referenced_by(&self) -> impl Iterator<Item = &ColourId> {
        self.referenced_by.iter()
    }
}

/// One `(name, value, functions)` entry of an `add_colours` batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourEntry {
    pub name: String,
    pub value: Value,
    /// `(variant, function, bound args)` triples.
    pub functions: Vec<(String, String, Vec<Value>)>,
}

impl ColourEntry {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            functions: Vec::new(),
        }
    }

    /// Attach a function variant.
    pub fn with_variant(
        mut self,
        variant: impl Into<String>,
        function: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        self.functions.push((variant.into(), function.into(), args));
        self
    }
}
