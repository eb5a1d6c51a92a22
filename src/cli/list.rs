//! List command implementation.
//!
//! Loads the project and prints every scheme with its colours.

use clap::Args;
use serde::Serialize;

use crate::error::{ChromaError, Result};
use crate::host::Chroma;
use crate::output::Printer;
use crate::render::{swatches, Swatch};

use super::ProjectArgs;

/// List schemes and their colours
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list this scheme
    #[arg(long, short)]
    pub scheme: Option<String>,

    /// Show which colours reference each colour
    #[arg(long)]
    pub refs: bool,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// One scheme as listed.
#[derive(Debug, Serialize)]
pub struct SchemeListing {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub colours: Vec<Swatch>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let chroma = args.project.load(printer)?;
    let listings = listings(&chroma, args.scheme.as_deref())?;

    if args.json {
        let json = serde_json::to_string_pretty(&listings).map_err(|e| ChromaError::Parse {
            message: format!("Failed to serialize schemes: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    for listing in &listings {
        print_listing(&chroma, listing, args.refs, printer);
    }
    Ok(())
}

/// Collect listings for every scheme, or just one.
pub fn listings(chroma: &Chroma, only: Option<&str>) -> Result<Vec<SchemeListing>> {
    let registry = chroma.registry();
    if let Some(name) = only {
        registry.get_scheme(name)?;
    }

    registry
        .schemes()
        .filter(|scheme| only.map_or(true, |name| scheme.name() == name))
        .map(|scheme| {
            Ok(SchemeListing {
                name: scheme.name().to_string(),
                description: scheme.description().to_string(),
                parent: scheme
                    .parent()
                    .map(|id| registry.scheme(id).name().to_string()),
                colours: swatches(chroma, scheme.name())?,
            })
        })
        .collect()
}

fn print_listing(chroma: &Chroma, listing: &SchemeListing, refs: bool, printer: &Printer) {
    let title = match &listing.parent {
        Some(parent) => format!(
            "{} {} {}",
            printer.bold(&listing.name),
            printer.dim("<-"),
            parent
        ),
        None => printer.bold(&listing.name),
    };
    printer.info("Scheme", &format!("{} {}", title, printer.dim(&listing.description)));

    for swatch in &listing.colours {
        let mut line = format!("{}: {}", swatch.name, swatch.value);
        if let Some(reference) = &swatch.reference {
            line.push_str(&format!(" {}", printer.dim(&format!("({})", reference))));
        }
        if swatch.is_inherited(&listing.name) {
            line.push_str(&format!(" {}", printer.dim(&format!("[{}]", swatch.defined_in))));
        }
        for variant in &swatch.variants {
            line.push_str(&format!(" {}={}", variant.name, variant.value));
        }
        if refs && !swatch.is_inherited(&listing.name) {
            let referrers: Vec<String> = chroma
                .referenced_by(&listing.name, &swatch.name)
                .into_iter()
                .map(|id| id.to_string())
                .collect();
            if !referrers.is_empty() {
                line.push_str(&format!(" {} {}", printer.dim("<-"), referrers.join(", ")));
            }
        }
        eprintln!("{:>14}{}", "", line);
    }
}
