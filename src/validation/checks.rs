//! Validation checks for a loaded engine.
//!
//! Each check takes a `&Chroma` and returns a `ValidationResult`.

use crate::functions::FunctionCatalogue;
use crate::host::Chroma;
use crate::keyword;
use crate::registry::{ColourId, ColourValue};

use super::warning::{Diagnostic, ValidationResult};

/// Check that every colour resolves in the scheme that defines it.
pub fn check_unresolved(chroma: &Chroma) -> ValidationResult {
    let mut result = ValidationResult::new();
    let resolver = chroma.resolver();

    for scheme in chroma.registry().schemes() {
        for name in scheme.colour_names() {
            if let Err(e) = resolver.resolve(scheme.name(), name) {
                result.push(
                    Diagnostic::error("chroma::validate::unresolved", e.to_string())
                        .with_subject(ColourId::new(scheme.name(), name))
                        .with_help("Point the colour at a defined colour, or break the cycle"),
                );
            }
        }
    }

    result
}

/// Check that every variant's function is still in the catalogue.
pub fn check_missing_functions(chroma: &Chroma) -> ValidationResult {
    let mut result = ValidationResult::new();
    let functions = chroma.functions();

    for scheme in chroma.registry().schemes() {
        for name in scheme.colour_names() {
            let Some(definition) = scheme.colour(name) else {
                continue;
            };
            for (variant, spec) in definition.variants() {
                if !functions.has_function(&spec.function) {
                    result.push(
                        Diagnostic::error(
                            "chroma::validate::missing-function",
                            format!(
                                "Variant '{}' calls function '{}' which is not registered",
                                variant, spec.function
                            ),
                        )
                        .with_subject(ColourId::new(scheme.name(), name))
                        .with_help(format!(
                            "Available functions: {}",
                            functions.names().join(", ")
                        )),
                    );
                }
            }
        }
    }

    result
}

/// Warn about literals a compressed stylesheet cannot tell apart from an
/// ambiguous keyword pair.
pub fn check_ambiguous_hex(chroma: &Chroma) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !chroma.output_style().is_compressed() {
        return result;
    }

    for scheme in chroma.registry().schemes() {
        for name in scheme.colour_names() {
            let Some(ColourValue::Literal(colour)) = scheme.colour(name).map(|d| d.value()) else {
                continue;
            };
            if let Some((first, second)) = keyword::ambiguous_pair_for(*colour) {
                result.push(
                    Diagnostic::warning(
                        "chroma::validate::ambiguous-hex",
                        format!(
                            "{} is the compressed form of both {} and {}",
                            colour.to_short_hex(),
                            first,
                            second
                        ),
                    )
                    .with_subject(ColourId::new(scheme.name(), name))
                    .with_help(format!("Use a quoted keyword if you mean one of them: '{}'", first)),
                );
            }
        }
    }

    result
}

/// Warn when a child redefines an inherited colour with the same literal.
pub fn check_shadowed(chroma: &Chroma) -> ValidationResult {
    let mut result = ValidationResult::new();
    let registry = chroma.registry();

    for scheme in registry.schemes() {
        let Some(parent) = scheme.parent() else {
            continue;
        };
        for name in scheme.colour_names() {
            let Some(definition) = scheme.colour(name) else {
                continue;
            };
            if !matches!(definition.value(), ColourValue::Literal(_)) {
                continue;
            }
            let Ok(Some((owner, inherited))) = registry.find_definition(parent, name) else {
                continue;
            };
            if inherited.value() == definition.value() {
                result.push(
                    Diagnostic::warning(
                        "chroma::validate::shadowed",
                        format!(
                            "Overrides '{}.{}' with the same value",
                            owner.name(),
                            name
                        ),
                    )
                    .with_subject(ColourId::new(scheme.name(), name))
                    .with_help("Remove the override and inherit the colour"),
                );
            }
        }
    }

    result
}
