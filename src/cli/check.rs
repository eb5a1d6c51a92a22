//! Check command implementation.
//!
//! Loads the project and runs every validation check.

use clap::Args;

use crate::error::{ChromaError, Result};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, validate_registry};

use super::ProjectArgs;

/// Check scheme files for problems
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print diagnostics as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let chroma = args.project.load(printer)?;
    let result = validate_registry(&chroma);

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| ChromaError::Parse {
            message: format!("Failed to serialize diagnostics: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print_diagnostics(&result, printer);
    }

    let errors = result.error_count();
    let warnings = result.warning_count();
    if errors > 0 || (args.strict && warnings > 0) {
        return Err(ChromaError::Validation { errors, warnings });
    }

    let schemes = chroma.registry().schemes().count();
    if warnings > 0 {
        printer.warning(
            "Checked",
            &format!("{} ({})", plural(schemes, "scheme", "schemes"), plural(warnings, "warning", "warnings")),
        );
    } else {
        printer.success("Checked", &plural(schemes, "scheme", "schemes"));
    }
    Ok(())
}
