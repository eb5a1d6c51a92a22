//! Styleguide command implementation.
//!
//! Prints KSS markup (or its CSS) to stdout.

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::render::kss;

use super::ProjectArgs;

/// Print KSS style-guide markup for a scheme
#[derive(Args, Debug)]
pub struct StyleguideArgs {
    /// Scheme to render (default: the default scheme)
    #[arg(long, short)]
    pub scheme: Option<String>,

    /// Print the style guide CSS instead of the markup
    #[arg(long)]
    pub styles: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: StyleguideArgs, printer: &Printer) -> Result<()> {
    if args.styles {
        print!("{}", kss::styles());
        return Ok(());
    }

    let chroma = args.project.load(printer)?;
    let scheme = match &args.scheme {
        Some(scheme) => scheme.clone(),
        None => chroma.registry().default_scheme().name().to_string(),
    };

    print!("{}", kss::markup(&chroma, &scheme)?);
    printer.success("Rendered", &format!("style guide for {}", printer.cyan(&scheme)));
    Ok(())
}
