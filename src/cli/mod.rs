pub mod check;
pub mod completions;
pub mod list;
pub mod resolve;
pub mod styleguide;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::discovery::{discover, LoadOptions};
use crate::error::Result;
use crate::host::{Chroma, OutputStyle};
use crate::output::{display_path, plural, Printer};

/// chroma - Colour schemes with inheritance and function variants
#[derive(Parser, Debug)]
#[command(name = "chroma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more (-v debug, -vv trace); CHROMA_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a colour and print its value
    Resolve(resolve::ResolveArgs),

    /// List schemes and their colours
    List(list::ListArgs),

    /// Check scheme files for problems
    Check(check::CheckArgs),

    /// Print KSS style-guide markup for a scheme
    Styleguide(styleguide::StyleguideArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Options shared by every command that loads a project.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project directory (where chroma.yaml lives)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Treat output as compressed (overrides chroma.yaml)
    #[arg(long)]
    pub compressed: bool,
}

impl ProjectArgs {
    /// Discover and load every scheme file in the project.
    pub fn load(&self, printer: &Printer) -> Result<Chroma> {
        let discovery = discover(&self.path)?;
        let files = discovery.scan.total();

        let options = LoadOptions {
            output_style: self.compressed.then_some(OutputStyle::Compressed),
            ..LoadOptions::with_builtins()
        };
        let chroma = discovery.into_chroma_with_options(options)?;

        printer.status(
            "Loaded",
            &format!(
                "{} from {}",
                plural(files, "scheme file", "scheme files"),
                display_path(&self.path)
            ),
        );
        Ok(chroma)
    }
}
