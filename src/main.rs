use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use chroma::cli::{Cli, Commands};
use chroma::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let printer = Printer::new();
    match cli.command {
        Commands::Resolve(args) => chroma::cli::resolve::run(args, &printer)?,
        Commands::List(args) => chroma::cli::list::run(args, &printer)?,
        Commands::Check(args) => chroma::cli::check::run(args, &printer)?,
        Commands::Styleguide(args) => chroma::cli::styleguide::run(args, &printer)?,
        Commands::Completions(args) => chroma::cli::completions::run(args)?,
    }

    Ok(())
}

/// Logs go to stderr. `CHROMA_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CHROMA_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
