//! Rendering module for chroma.
//!
//! Flattens a scheme into [`Swatch`]es (every visible colour, resolved)
//! which the style-guide markup and the JSON listing are built from.

pub mod kss;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::host::Chroma;
use crate::registry::ColourValue;

/// One resolved colour as seen from a scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub name: String,
    /// The scheme holding the definition in effect.
    pub defined_in: String,
    /// The resolved value, as CSS.
    pub value: String,
    /// The reference as written, when the colour is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantSwatch>,
}

impl Swatch {
    /// Whether the colour comes from an ancestor of the rendered scheme.
    pub fn is_inherited(&self, scheme: &str) -> bool {
        self.defined_in != scheme
    }
}

/// A function variant of a swatch, resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSwatch {
    pub name: String,
    pub function: String,
    pub value: String,
}

/// Resolve every colour visible in a scheme, sorted by name.
pub fn swatches(chroma: &Chroma, scheme: &str) -> Result<Vec<Swatch>> {
    let registry = chroma.registry();
    let resolver = chroma.resolver();

    let mut names = BTreeSet::new();
    for ancestor in registry.ancestry_of(scheme)? {
        names.extend(ancestor?.colour_names().into_iter().map(str::to_string));
    }

    let start = registry.get_scheme(scheme)?.id();
    let mut swatches = Vec::with_capacity(names.len());

    for name in names {
        let Some((owner, definition)) = registry.find_definition(start, &name)? else {
            continue;
        };
        let reference = match definition.value() {
            ColourValue::Reference(reference) => Some(reference.to_string()),
            _ => None,
        };

        // Closest declaration of each variant wins.
        let mut variants: Vec<VariantSwatch> = Vec::new();
        for ancestor in registry.ancestry(start) {
            let Some(definition) = ancestor?.colour(&name) else {
                continue;
            };
            for (variant, spec) in definition.variants() {
                if variants.iter().any(|v| v.name == variant) {
                    continue;
                }
                let value = resolver.resolve_variant(scheme, &name, Some(variant), &[])?;
                variants.push(VariantSwatch {
                    name: variant.to_string(),
                    function: spec.function.clone(),
                    value: value.to_string(),
                });
            }
        }
        variants.sort_by(|a, b| a.name.cmp(&b.name));

        swatches.push(Swatch {
            value: resolver.resolve(scheme, &name)?.to_string(),
            defined_in: owner.name().to_string(),
            name,
            reference,
            variants,
        });
    }

    Ok(swatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ColourEntry;
    use crate::types::Value;
    use pretty_assertions::assert_eq;

    fn chroma() -> Chroma {
        let mut chroma = Chroma::new();
        chroma
            .add_colours(
                None,
                [
                    ColourEntry::new("blue", Value::parse("#00f")),
                    ColourEntry::new("link", Value::ident("blue")).with_variant(
                        "hover",
                        "invert",
                        vec![],
                    ),
                ],
            )
            .unwrap();
        chroma.define_colour_scheme("dark", "Dark", Some("default")).unwrap();
        chroma
            .add_colours(Some("dark"), [ColourEntry::new("blue", Value::parse("#fff"))])
            .unwrap();
        chroma
    }

    #[test]
    fn test_swatches_include_inherited() {
        let swatches = swatches(&chroma(), "dark").unwrap();
        assert_eq!(
            swatches,
            vec![
                Swatch {
                    name: "blue".to_string(),
                    defined_in: "dark".to_string(),
                    value: "#ffffff".to_string(),
                    reference: None,
                    variants: vec![],
                },
                Swatch {
                    name: "link".to_string(),
                    defined_in: "default".to_string(),
                    value: "#ffffff".to_string(),
                    reference: Some("blue".to_string()),
                    variants: vec![VariantSwatch {
                        name: "hover".to_string(),
                        function: "invert".to_string(),
                        value: "#000000".to_string(),
                    }],
                },
            ]
        );
        assert!(swatches[1].is_inherited("dark"));
    }

    #[test]
    fn test_swatches_unknown_scheme() {
        assert!(swatches(&chroma(), "404").is_err());
    }

    #[test]
    fn test_swatch_json_skips_empty_fields() {
        let swatches = swatches(&chroma(), "default").unwrap();
        let json = serde_json::to_value(&swatches[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "blue", "defined_in": "default", "value": "#0000ff"})
        );
    }
}
