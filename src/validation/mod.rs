//! Validation system for loaded colour schemes.
//!
//! Runs a suite of checks against an engine and reports errors and
//! warnings. Used by `chroma check`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::host::Chroma;
use crate::output::Printer;

/// Run all validation checks.
pub fn validate_registry(chroma: &Chroma) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_unresolved(chroma));
    result.merge(checks::check_missing_functions(chroma));
    result.merge(checks::check_ambiguous_hex(chroma));
    result.merge(checks::check_shadowed(chroma));

    result.sort();
    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        match &d.subject {
            Some(subject) => eprintln!("{}[{}]: {}: {}", label, d.code, printer.bold(subject), d.message),
            None => eprintln!("{}[{}]: {}", label, d.code, d.message),
        }
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ColourEntry;
    use crate::types::{Colour, Value};

    #[test]
    fn test_validate_empty_engine() {
        let result = validate_registry(&Chroma::new());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_clean_schemes() {
        let mut chroma = Chroma::new();
        chroma
            .add_colours(
                None,
                [
                    ColourEntry::new("blue", Value::Colour(Colour::rgb(0, 0, 255))),
                    ColourEntry::new("link", Value::ident("blue")),
                ],
            )
            .unwrap();
        assert!(validate_registry(&chroma).is_ok());
    }

    #[test]
    fn test_validate_orders_errors_first() {
        let mut chroma = Chroma::new();
        chroma
            .add_colours(
                None,
                [
                    ColourEntry::new("blue", Value::Colour(Colour::rgb(0, 0, 255))),
                    ColourEntry::new("link", Value::ident("blue"))
                        .with_variant("hover", "darken", vec![Value::Percent(10.0)]),
                ],
            )
            .unwrap();
        chroma.define_colour_scheme("dark", "", Some("default")).unwrap();
        chroma
            .add_colours(
                Some("dark"),
                [ColourEntry::new("blue", Value::Colour(Colour::rgb(0, 0, 255)))],
            )
            .unwrap();
        chroma.functions_mut().remove("darken");

        let result = validate_registry(&chroma);
        let severities: Vec<Severity> = result.iter().map(|d| d.severity).collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
    }
}
