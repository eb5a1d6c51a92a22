//! End-to-end tests: on-disk projects loaded through discovery.

use std::fs;
use std::path::Path;

use chroma::{discover, validate_registry, Chroma, ColourEntry, ErrorKind, Severity, Value};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn load(root: &Path) -> chroma::Result<Chroma> {
    discover(root)?.into_chroma()
}

fn resolve(chroma: &Chroma, args: &[&str]) -> String {
    let args: Vec<Value> = args.iter().map(|a| Value::ident(*a)).collect();
    chroma.colour(&args).unwrap().to_string()
}

const BASE: &str = r##"
default:
  description: Base colours
schemes:
  - name: dark
    description: Dark mode
    parent: default
colours:
  default:
    - name: primary
      value: "#00f"
    - name: text
      value: primary
      functions:
        - variant: hover
          function: invert
"##;

const DARK: &str = r##"
colours:
  dark:
    - name: primary
      value: "#fff"
"##;

#[test]
fn test_override_propagates_through_references() {
    let dir = project(&[
        ("base.colours.yaml", BASE),
        ("dark.colours.yaml", DARK),
    ]);
    let chroma = load(dir.path()).unwrap();

    assert_eq!(resolve(&chroma, &["text"]), "#0000ff");
    assert_eq!(resolve(&chroma, &["text", "dark"]), "#ffffff");
    assert_eq!(resolve(&chroma, &["text", "dark", "hover"]), "#000000");
    assert_eq!(resolve(&chroma, &["text", "hover"]), "#ffff00");
}

#[test]
fn test_manifest_sources_and_default_name() {
    let dir = project(&[
        (
            "chroma.yaml",
            "sources: [themes]\ndefault_scheme:\n  name: light\n  description: Light mode\n",
        ),
        (
            "themes/light.colours.yaml",
            r##"
colours:
  light:
    - name: ink
      value: "#222"
"##,
        ),
        ("stray.colours.yaml", "not: [valid"),
    ]);

    let discovery = discover(dir.path()).unwrap();
    assert!(discovery.has_manifest);
    assert_eq!(discovery.scan.total(), 1);

    let chroma = discovery.into_chroma().unwrap();
    let default = chroma.registry().default_scheme();
    assert_eq!(default.name(), "light");
    assert_eq!(default.description(), "Light mode");
    assert_eq!(resolve(&chroma, &["ink"]), "#222222");
}

#[test]
fn test_qualified_reference_across_files() {
    let dir = project(&[
        (
            "brand.colours.yaml",
            r##"
schemes:
  - name: brand
colours:
  brand:
    - name: accent
      value: "#f80"
"##,
        ),
        (
            "app.colours.yaml",
            r##"
colours:
  default:
    - name: button
      value: brand.accent
"##,
        ),
    ]);
    let chroma = load(dir.path()).unwrap();

    assert_eq!(resolve(&chroma, &["button"]), "#ff8800");
    let referrers: Vec<String> = chroma
        .referenced_by("brand", "accent")
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(referrers, vec!["default.button"]);
}

#[test]
fn test_missing_parent_names_the_parent() {
    let mut chroma = Chroma::new();
    let err = chroma
        .define_colour_scheme("child", "", Some("404"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemeNotFound);
    assert!(err.to_string().contains("\"404\""));
}

#[test]
fn test_undefined_reference_names_both_colours() {
    let dir = project(&[(
        "base.colours.yaml",
        r##"
colours:
  default:
    - name: blue
      value: bermuda
"##,
    )]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ColourNotFound);
    assert_eq!(
        err.to_string(),
        "The colour \"bermuda\" was not found when adding the colour \"blue\"."
    );
}

#[test]
fn test_number_is_not_a_colour() {
    let dir = project(&[(
        "base.colours.yaml",
        r##"
colours:
  default:
    - name: green
      value: 0.5
"##,
    )]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidColourValue);
    assert_eq!(
        err.to_string(),
        "Unexpected value, \"0.5\", given for colour \"green\"."
    );
}

#[test]
fn test_unknown_function_rejected_at_definition() {
    let dir = project(&[(
        "base.colours.yaml",
        r##"
colours:
  default:
    - name: primary
      value: "#00f"
      functions:
        - variant: glow
          function: bloom
"##,
    )]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FunctionNotFound);
    assert!(err.to_string().contains("\"bloom\""));
}

#[test]
fn test_function_removed_after_definition() {
    let dir = project(&[("base.colours.yaml", BASE)]);
    let mut chroma = load(dir.path()).unwrap();
    chroma.functions_mut().remove("invert");

    let err = chroma
        .colour(&[Value::ident("text"), Value::ident("hover")])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The function \"invert\" was not found when resolving the colour \"text\"."
    );

    let result = validate_registry(&chroma);
    assert_eq!(result.error_count(), 1);
}

#[test]
fn test_unquoted_ambiguous_keyword_rejected() {
    let dir = project(&[(
        "base.colours.yaml",
        r##"
colours:
  default:
    - name: slate
      value: lightslategray
"##,
    )]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DangerousKeyword);

    let dir = project(&[(
        "base.colours.yaml",
        r##"
colours:
  default:
    - name: slate
      value: "'lightslategray'"
"##,
    )]);
    let chroma = load(dir.path()).unwrap();
    assert_eq!(resolve(&chroma, &["slate"]), "lightslategray");
}

#[test]
fn test_scheme_declared_twice() {
    let decl = "schemes:\n  - name: dark\n";
    let dir = project(&[("a.colours.yaml", decl), ("b.colours.yaml", decl)]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateScheme);
}

#[test]
fn test_inheritance_cycle_across_files() {
    let dir = project(&[
        ("a.colours.yaml", "schemes:\n  - name: dark\n    parent: dim\n"),
        ("b.colours.yaml", "schemes:\n  - name: dim\n    parent: dark\n"),
    ]);
    let err = load(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicInheritance);
}

#[test]
fn test_check_reports_shadowed_override() {
    let dir = project(&[
        ("base.colours.yaml", BASE),
        (
            "dark.colours.yaml",
            r##"
colours:
  dark:
    - name: primary
      value: "#0000ff"
"##,
        ),
    ]);
    let chroma = load(dir.path()).unwrap();
    let result = validate_registry(&chroma);

    let found: Vec<(Severity, Option<&str>)> = result
        .iter()
        .map(|d| (d.severity, d.subject.as_deref()))
        .collect();
    assert_eq!(found, vec![(Severity::Warning, Some("dark.primary"))]);
}

fn styleguide_engine() -> Chroma {
    let mut chroma = Chroma::new();
    chroma
        .add_colours(
            None,
            [
                ColourEntry::new("brand", Value::parse("#00f")),
                ColourEntry::new("link", Value::ident("brand")).with_variant(
                    "hover",
                    "invert",
                    vec![],
                ),
            ],
        )
        .unwrap();
    chroma
}

#[test]
fn test_styleguide_markup() {
    let html = chroma::render::kss::markup(&styleguide_engine(), "default").unwrap();
    insta::assert_snapshot!(html, @r#"
<ul class="chroma-kss">
  <li class="chroma-kss__colour">
    <div class="chroma-kss__swatch" style="background-color: #0000ff"></div>
    <div class="chroma-kss__name">brand</div>
    <div class="chroma-kss__value">#0000ff</div>
  </li>
  <li class="chroma-kss__colour">
    <div class="chroma-kss__swatch" style="background-color: #0000ff"></div>
    <div class="chroma-kss__name">link</div>
    <div class="chroma-kss__value">#0000ff</div>
    <div class="chroma-kss__reference">brand</div>
    <ul class="chroma-kss__variants">
      <li class="chroma-kss__variant"><div class="chroma-kss__swatch" style="background-color: #ffff00"></div>hover: #ffff00</li>
    </ul>
  </li>
</ul>
"#);
}

#[test]
fn test_swatches_json() {
    let swatches = chroma::swatches(&styleguide_engine(), "default").unwrap();
    insta::assert_json_snapshot!(swatches, @r###"
    [
      {
        "name": "brand",
        "defined_in": "default",
        "value": "#0000ff"
      },
      {
        "name": "link",
        "defined_in": "default",
        "value": "#0000ff",
        "reference": "brand",
        "variants": [
          {
            "name": "hover",
            "function": "invert",
            "value": "#ffff00"
          }
        ]
      }
    ]
    "###);
}
