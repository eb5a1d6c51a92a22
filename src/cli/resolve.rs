//! Resolve command implementation.
//!
//! Prints a colour's resolved value to stdout.

use clap::Args;

use crate::error::{ChromaError, Result};
use crate::output::Printer;
use crate::types::Value;

use super::ProjectArgs;

/// Resolve a colour and print its value
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Colour name
    pub colour: String,

    /// Scheme to resolve in (default: the default scheme)
    #[arg(long, short)]
    pub scheme: Option<String>,

    /// Variant or function to apply to the colour
    #[arg(long)]
    pub variant: Option<String>,

    /// Extra function arguments, e.g. `20%`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: ResolveArgs, printer: &Printer) -> Result<()> {
    let chroma = args.project.load(printer)?;
    let call = call_args(&args, chroma.registry().default_scheme().name())?;
    let value = chroma.colour(&call)?;
    println!("{}", value);
    Ok(())
}

/// Build `colour()` arguments. The scheme is spelled out whenever a
/// variant is given so the variant is never mistaken for a scheme.
fn call_args(args: &ResolveArgs, default_scheme: &str) -> Result<Vec<Value>> {
    if args.variant.is_none() && !args.args.is_empty() {
        return Err(ChromaError::argument(
            format!("Unexpected arguments: {}", args.args.join(" ")),
            Some("Function arguments need a function: --variant darken 20%".to_string()),
        ));
    }

    let mut call = vec![Value::ident(&args.colour)];

    match (&args.scheme, &args.variant) {
        (Some(scheme), _) => call.push(Value::ident(scheme)),
        (None, Some(_)) => call.push(Value::ident(default_scheme)),
        (None, None) => {}
    }
    if let Some(variant) = &args.variant {
        call.push(Value::ident(variant));
        call.extend(args.args.iter().map(|arg| Value::parse(arg)));
    }

    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(scheme: Option<&str>, variant: Option<&str>, extra: &[&str]) -> ResolveArgs {
        ResolveArgs {
            colour: "link".to_string(),
            scheme: scheme.map(str::to_string),
            variant: variant.map(str::to_string),
            args: extra.iter().map(|s| s.to_string()).collect(),
            project: ProjectArgs {
                path: PathBuf::from("."),
                compressed: false,
            },
        }
    }

    #[test]
    fn test_call_args_plain() {
        assert_eq!(
            call_args(&args(None, None, &[]), "default").unwrap(),
            vec![Value::ident("link")]
        );
    }

    #[test]
    fn test_call_args_variant_names_default_scheme() {
        assert_eq!(
            call_args(&args(None, Some("darken"), &["20%"]), "base").unwrap(),
            vec![
                Value::ident("link"),
                Value::ident("base"),
                Value::ident("darken"),
                Value::Percent(20.0),
            ]
        );
    }

    #[test]
    fn test_call_args_extra_args_need_variant() {
        assert!(call_args(&args(Some("dark"), None, &["20%"]), "default").is_err());
        assert_eq!(
            call_args(&args(Some("dark"), None, &[]), "default").unwrap(),
            vec![Value::ident("link"), Value::ident("dark")]
        );
    }
}
