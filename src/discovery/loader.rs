//! Scheme file loader - parses discovered files into an engine.
//!
//! A scheme file looks like this:
//!
//! ```yaml
//! default:
//!   description: Base colours
//! schemes:
//!   - name: dark
//!     description: Dark mode
//!     parent: default
//! colours:
//!   default:
//!     - name: brand
//!       value: "#00f"
//!     - name: link
//!       value: brand
//!       functions:
//!         - { variant: hover, function: darken, args: ["20%"] }
//!   dark:
//!     - name: brand
//!       value: "#66f"
//! ```
//!
//! Scalars are read with [`Value::parse`]. A bare CSS keyword such as
//! `blue` stays a keyword rather than a reference, and a quoted keyword
//! has to keep its quotes inside the YAML string: `value: "'lightslategray'"`.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ChromaError, Result};
use crate::functions::FunctionTable;
use crate::host::{Chroma, OutputStyle};
use crate::registry::{check_parent_links, ColourEntry, ColourRef, DependencyGraph};
use crate::types::Value;

use super::manifest::{DefaultScheme, Manifest};
use super::scanner::ScanResult;

/// Options for loading scheme files.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Register the builtin colour functions (darken, lighten, ...).
    pub include_builtin_functions: bool,
    /// Override the manifest's output style.
    pub output_style: Option<OutputStyle>,
}

impl LoadOptions {
    /// Create options with the builtin functions included.
    pub fn with_builtins() -> Self {
        Self {
            include_builtin_functions: true,
            output_style: None,
        }
    }
}

/// One `*.colours.yaml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemeFile {
    pub default: Option<DefaultScheme>,
    pub schemes: Vec<SchemeDecl>,
    /// Colour lists keyed by scheme name.
    pub colours: BTreeMap<String, Vec<ColourDecl>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeDecl {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColourDecl {
    pub name: String,
    pub value: serde_yaml::Value,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDecl {
    pub variant: String,
    pub function: String,
    #[serde(default)]
    pub args: Vec<serde_yaml::Value>,
}

/// Parse a scheme file from YAML.
pub fn parse_scheme_file(content: &str) -> Result<SchemeFile> {
    if content.trim().is_empty() {
        return Ok(SchemeFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| ChromaError::Parse {
        message: format!("Invalid scheme file: {}", e),
        help: Some("Scheme files hold `default`, `schemes` and `colours` sections".to_string()),
    })
}

/// Load every scanned scheme file into a new engine.
///
/// Scheme declarations from all files are registered parents first. Then
/// colours are added, each scheme's in file order, holding back any colour
/// whose reference target is not loaded yet.
pub fn load_project(scan: &ScanResult, manifest: &Manifest, options: &LoadOptions) -> Result<Chroma> {
    let mut errors: Vec<String> = Vec::new();
    let mut files: Vec<(PathBuf, SchemeFile)> = Vec::new();

    for path in &scan.files {
        match load_scheme_file(path) {
            Ok(file) => files.push((path.clone(), file)),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if !errors.is_empty() {
        return Err(ChromaError::Parse {
            message: format!("Failed to load {} file(s):\n  {}", errors.len(), errors.join("\n  ")),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    let functions = if options.include_builtin_functions {
        FunctionTable::with_builtins()
    } else {
        FunctionTable::new()
    };
    let mut chroma = Chroma::with_functions(functions);
    chroma.set_output_style(options.output_style.unwrap_or(manifest.output_style));

    let defaults = manifest
        .default_scheme
        .iter()
        .chain(files.iter().filter_map(|(_, file)| file.default.as_ref()));
    for default in defaults {
        chroma.define_default_colour_scheme(default.name.as_deref(), default.description.as_deref())?;
    }

    let mut declarations: BTreeMap<&str, &SchemeDecl> = BTreeMap::new();
    let mut colours: BTreeMap<&str, Vec<&ColourDecl>> = BTreeMap::new();
    for (path, file) in &files {
        for decl in &file.schemes {
            if declarations.insert(decl.name.as_str(), decl).is_some() {
                return Err(ChromaError::DuplicateScheme {
                    scheme: decl.name.clone(),
                    help: Some(format!("Declared again in {}", path.display())),
                });
            }
        }
        for (scheme, list) in &file.colours {
            colours.entry(scheme.as_str()).or_default().extend(list);
        }
    }

    check_parent_links(
        declarations
            .values()
            .map(|decl| (decl.name.as_str(), decl.parent.as_deref())),
    )?;

    let order = scheme_order(&declarations)?;
    debug!(files = files.len(), schemes = order.len(), "loading scheme files");

    for name in &order {
        if let Some(decl) = declarations.get(name.as_str()) {
            chroma.define_colour_scheme(&decl.name, &decl.description, decl.parent.as_deref())?;
        }
    }
    add_colour_lists(&mut chroma, &colours)?;

    Ok(chroma)
}

/// Order scheme declarations parents first.
fn scheme_order(declarations: &BTreeMap<&str, &SchemeDecl>) -> Result<Vec<String>> {
    let mut graph = DependencyGraph::new();
    for (name, decl) in declarations {
        graph.register(*name);
        if let Some(parent) = &decl.parent {
            graph.add_dependency(*name, parent.as_str());
        }
    }

    graph
        .topological_sort()
        .map_err(|cycle| ChromaError::CyclicInheritance {
            chain: cycle.join(" -> "),
        })
}

type Blocked<'a> = (&'a str, &'a ColourDecl, ChromaError);

/// Add each scheme's colours in file order.
///
/// A scheme waits while its next colour references one that is not added
/// yet, and the other schemes carry on. Loading fails once no scheme can
/// move.
fn add_colour_lists(chroma: &mut Chroma, colours: &BTreeMap<&str, Vec<&ColourDecl>>) -> Result<()> {
    let mut queues: BTreeMap<&str, VecDeque<&ColourDecl>> = colours
        .iter()
        .map(|(scheme, list)| (*scheme, list.iter().copied().collect()))
        .collect();

    loop {
        let mut progressed = false;
        let mut blocked: Vec<Blocked> = Vec::new();

        for (scheme, queue) in queues.iter_mut() {
            while let Some(&decl) = queue.front() {
                match chroma.add_colours(Some(*scheme), [colour_entry(decl)?]) {
                    Ok(()) => {
                        queue.pop_front();
                        progressed = true;
                    }
                    Err(error @ ChromaError::UndefinedReference { .. }) => {
                        blocked.push((*scheme, decl, error));
                        break;
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        if blocked.is_empty() {
            return Ok(());
        }
        if !progressed {
            return stalled(blocked);
        }
    }
}

/// Explain why no scheme could add its next colour: either schemes wait on
/// each other through qualified references, or a reference is undefined.
fn stalled(blocked: Vec<Blocked>) -> Result<()> {
    let mut graph = DependencyGraph::new();
    for (scheme, decl, _) in &blocked {
        graph.register(*scheme);
        if let serde_yaml::Value::String(text) = &decl.value {
            if let Some(target) = ColourRef::parse(text).scheme {
                if target != *scheme {
                    graph.add_dependency(*scheme, target);
                }
            }
        }
    }

    if let Err(cycle) = graph.topological_sort() {
        return Err(ChromaError::Parse {
            message: format!("Schemes reference each other's colours in a cycle: {}", cycle.join(" -> ")),
            help: Some("Move the shared colours into a common parent scheme".to_string()),
        });
    }

    match blocked.into_iter().next() {
        Some((_, _, error)) => Err(error),
        None => Ok(()),
    }
}

fn load_scheme_file(path: &Path) -> Result<SchemeFile> {
    let content = fs::read_to_string(path).map_err(|e| ChromaError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_scheme_file(&content)
}

fn colour_entry(decl: &ColourDecl) -> Result<ColourEntry> {
    let mut entry = ColourEntry::new(decl.name.clone(), yaml_value(&decl.value)?);
    for function in &decl.functions {
        let args = function
            .args
            .iter()
            .map(yaml_value)
            .collect::<Result<Vec<_>>>()?;
        entry = entry.with_variant(function.variant.clone(), function.function.clone(), args);
    }
    Ok(entry)
}

/// Convert a YAML scalar into a host value.
pub fn yaml_value(value: &serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::String(text) => Ok(Value::parse(text)),
        serde_yaml::Value::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| ChromaError::Parse {
            message: format!("Unsupported number: {}", n),
            help: None,
        }),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Null => Ok(Value::Null),
        other => Err(ChromaError::Parse {
            message: format!("Expected a scalar value, got {:?}", other),
            help: Some("Write colours, names and arguments as plain YAML scalars".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Colour;
    use tempfile::tempdir;

    fn write_scan(files: &[(&str, &str)]) -> (tempfile::TempDir, ScanResult) {
        let dir = tempdir().unwrap();
        let mut scan = ScanResult::default();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            scan.files.push(path);
        }
        (dir, scan)
    }

    fn load(files: &[(&str, &str)]) -> Result<Chroma> {
        let (_dir, scan) = write_scan(files);
        load_project(&scan, &Manifest::default(), &LoadOptions::with_builtins())
    }

    #[test]
    fn test_load_empty_scan() {
        let chroma = load_project(
            &ScanResult::default(),
            &Manifest::default(),
            &LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(chroma.registry().schemes().count(), 1);
        assert!(chroma.functions().names().is_empty());
    }

    #[test]
    fn test_parse_scheme_file() {
        let file = parse_scheme_file(
            r##"
schemes:
  - name: dark
    parent: default
colours:
  dark:
    - name: text
      value: "#eee"
"##,
        )
        .unwrap();
        assert_eq!(file.schemes[0].name, "dark");
        assert_eq!(file.schemes[0].description, "");
        assert_eq!(file.colours["dark"][0].name, "text");
    }

    #[test]
    fn test_parse_unknown_section() {
        let err = parse_scheme_file("palettes: []").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_yaml_values() {
        let parse = |s: &str| yaml_value(&serde_yaml::from_str(s).unwrap()).unwrap();
        assert_eq!(parse("\"#00f\""), Value::Colour(Colour::rgb(0, 0, 255)));
        assert_eq!(parse("20%"), Value::Percent(20.0));
        assert_eq!(parse("0.5"), Value::Number(0.5));
        assert_eq!(parse("blue"), Value::Keyword("blue".to_string()));
        assert_eq!(parse("link"), Value::ident("link"));
        assert_eq!(parse("\"'grey'\""), Value::quoted("grey"));
        assert!(yaml_value(&serde_yaml::from_str("[1, 2]").unwrap()).is_err());
    }

    #[test]
    fn test_child_file_before_parent_file() {
        // Files load in path order; declarations are reordered.
        let chroma = load(&[
            (
                "a.colours.yaml",
                r##"
schemes:
  - name: night
    parent: dark
colours:
  night:
    - name: text
      value: primary
"##,
            ),
            (
                "b.colours.yaml",
                r##"
schemes:
  - name: dark
    description: Dark
colours:
  dark:
    - name: primary
      value: "#111"
"##,
            ),
        ])
        .unwrap();

        assert_eq!(
            chroma.colour(&[Value::ident("text"), Value::ident("night")]).unwrap(),
            Value::Colour(Colour::rgb(0x11, 0x11, 0x11))
        );
    }

    #[test]
    fn test_qualified_reference_target_loads_first() {
        let chroma = load(&[(
            "brand.colours.yaml",
            r##"
schemes:
  - name: accent
  - name: print
colours:
  accent:
    - name: link
      value: print.ink
  print:
    - name: ink
      value: "#222"
"##,
        )])
        .unwrap();

        let link = chroma.colour(&[Value::ident("link"), Value::ident("accent")]).unwrap();
        assert_eq!(link, Value::Colour(Colour::rgb(0x22, 0x22, 0x22)));
    }

    #[test]
    fn test_variants_and_default_block() {
        let chroma = load(&[(
            "base.colours.yaml",
            r##"
default:
  name: base
  description: Base colours
colours:
  base:
    - name: blue
      value: "#00f"
      functions:
        - variant: faded
          function: alpha
          args: ["50%"]
"##,
        )])
        .unwrap();

        let default = chroma.registry().default_scheme();
        assert_eq!(default.name(), "base");
        assert_eq!(default.description(), "Base colours");

        let faded = chroma
            .colour(&[Value::ident("blue"), Value::ident("faded")])
            .unwrap();
        assert_eq!(faded.to_colour().unwrap().a, 128);
    }

    #[test]
    fn test_inheritance_cycle() {
        let err = load(&[(
            "loop.colours.yaml",
            r#"
schemes:
  - name: a
    parent: b
  - name: b
    parent: a
"#,
        )])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicInheritance);
    }

    #[test]
    fn test_qualified_reference_cycle() {
        let err = load(&[(
            "loop.colours.yaml",
            r#"
schemes:
  - name: a
  - name: b
colours:
  a:
    - name: x
      value: b.y
  b:
    - name: y
      value: a.x
"#,
        )])
        .unwrap_err();
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn test_parent_references_child_colour() {
        let chroma = load(&[(
            "brand.colours.yaml",
            r##"
schemes:
  - name: dark
    parent: default
colours:
  default:
    - name: accent
      value: dark.ink
  dark:
    - name: ink
      value: "#123"
"##,
        )])
        .unwrap();

        let accent = chroma.colour(&[Value::ident("accent")]).unwrap();
        assert_eq!(accent, Value::Colour(Colour::rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn test_waiting_colour_keeps_file_order() {
        let chroma = load(&[(
            "order.colours.yaml",
            r##"
schemes:
  - name: dark
colours:
  default:
    - name: accent
      value: dark.ink
    - name: accent
      value: "#222"
  dark:
    - name: ink
      value: "#123"
"##,
        )])
        .unwrap();

        let accent = chroma.colour(&[Value::ident("accent")]).unwrap();
        assert_eq!(accent, Value::Colour(Colour::rgb(0x22, 0x22, 0x22)));
    }

    #[test]
    fn test_undefined_reference_while_loading() {
        let err = load(&[(
            "base.colours.yaml",
            r##"
schemes:
  - name: dark
colours:
  dark:
    - name: ink
      value: "#123"
  default:
    - name: accent
      value: dark.missing
"##,
        )])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ColourNotFound);
        assert_eq!(
            err.to_string(),
            "The colour \"missing\" was not found when adding the colour \"accent\"."
        );
    }

    #[test]
    fn test_duplicate_declaration_across_files() {
        let decl = "schemes:\n  - name: dark\n";
        let err = load(&[("a.colours.yaml", decl), ("b.colours.yaml", decl)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateScheme);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let err = load(&[("broken.colours.yaml", "schemes: [")]).unwrap_err();
        assert!(err.to_string().contains("broken.colours.yaml"));
    }

    #[test]
    fn test_output_style_override() {
        let (_dir, scan) = write_scan(&[]);
        let options = LoadOptions {
            output_style: Some(OutputStyle::Compressed),
            ..LoadOptions::with_builtins()
        };
        let chroma = load_project(&scan, &Manifest::default(), &options).unwrap();
        assert_eq!(chroma.output_style(), OutputStyle::Compressed);
    }
}
