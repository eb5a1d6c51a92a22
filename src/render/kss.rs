//! KSS style-guide output.
//!
//! `markup` renders a scheme's colours as the HTML block a KSS style
//! guide section embeds; `styles` is the CSS that lays it out.

use crate::error::Result;
use crate::host::Chroma;

use super::{swatches, Swatch};

const STYLES: &str = r#".chroma-kss {
  margin: 0;
  padding: 0;
  list-style: none;
  display: flex;
  flex-wrap: wrap;
}
.chroma-kss__colour {
  width: 10em;
  margin: 0 1em 1em 0;
}
.chroma-kss__swatch {
  height: 4em;
  border: 1px solid rgba(0, 0, 0, 0.1);
}
.chroma-kss__name {
  font-weight: bold;
}
.chroma-kss__value,
.chroma-kss__reference {
  font-family: monospace;
}
.chroma-kss__colour--inherited .chroma-kss__name {
  font-style: italic;
}
.chroma-kss__variants {
  margin: 0.5em 0 0;
  padding: 0;
  list-style: none;
}
.chroma-kss__variant .chroma-kss__swatch {
  height: 1em;
}
"#;

/// The CSS for [`markup`].
pub fn styles() -> &'static str {
    STYLES
}

/// Render every colour visible in `scheme` as HTML.
pub fn markup(chroma: &Chroma, scheme: &str) -> Result<String> {
    let mut html = String::from("<ul class=\"chroma-kss\">\n");
    for swatch in swatches(chroma, scheme)? {
        html.push_str(&colour_item(&swatch, scheme));
    }
    html.push_str("</ul>\n");
    Ok(html)
}

fn colour_item(swatch: &Swatch, scheme: &str) -> String {
    let modifier = if swatch.is_inherited(scheme) {
        " chroma-kss__colour--inherited"
    } else {
        ""
    };

    let mut item = format!("  <li class=\"chroma-kss__colour{}\">\n", modifier);
    item.push_str(&format!(
        "    <div class=\"chroma-kss__swatch\" style=\"background-color: {}\"></div>\n",
        escape(&swatch.value)
    ));
    item.push_str(&format!(
        "    <div class=\"chroma-kss__name\">{}</div>\n",
        escape(&swatch.name)
    ));
    item.push_str(&format!(
        "    <div class=\"chroma-kss__value\">{}</div>\n",
        escape(&swatch.value)
    ));
    if let Some(reference) = &swatch.reference {
        item.push_str(&format!(
            "    <div class=\"chroma-kss__reference\">{}</div>\n",
            escape(reference)
        ));
    }

    if !swatch.variants.is_empty() {
        item.push_str("    <ul class=\"chroma-kss__variants\">\n");
        for variant in &swatch.variants {
            item.push_str(&format!(
                "      <li class=\"chroma-kss__variant\"><div class=\"chroma-kss__swatch\" style=\"background-color: {value}\"></div>{name}: {value}</li>\n",
                value = escape(&variant.value),
                name = escape(&variant.name),
            ));
        }
        item.push_str("    </ul>\n");
    }

    item.push_str("  </li>\n");
    item
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
