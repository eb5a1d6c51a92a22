//! chroma - Colour schemes with inheritance and function variants
//!
//! A registry of named colour schemes for a stylesheet evaluator. Schemes
//! inherit from a parent, colours may reference other colours (in the
//! same scheme or another one), and every colour can carry variants that
//! run it through a host function such as `darken` or `invert`.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod functions;
pub mod host;
pub mod keyword;
pub mod output;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_paths, DiscoveryResult, LoadOptions, Manifest, ScanResult};
pub use error::{ChromaError, ErrorKind, Result, Stage};
pub use functions::{FunctionCatalogue, FunctionTable, NativeFunction};
pub use host::{Chroma, OutputStyle};
pub use registry::{
    ColourDefinition, ColourEntry, ColourId, ColourRef, ColourRegistry, ColourScheme,
    ColourValue, SchemeId,
};
pub use render::{swatches, Swatch, VariantSwatch};
pub use resolve::Resolver;
pub use types::{Colour, Value};
pub use validation::{validate_registry, Diagnostic, Severity, ValidationResult};
