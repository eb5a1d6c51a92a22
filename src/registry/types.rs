//! Identifier types for the registry.
//!
//! Colours are identified by their owning scheme and their name, so
//! different schemes can define (and override) the same colour name.

use std::fmt;

/// Stable handle to a registered scheme.
///
/// Parent links use handles rather than names so renaming the default
/// scheme never orphans its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemeId(pub(crate) usize);

impl SchemeId {
    /// The default scheme always occupies the first slot.
    pub const DEFAULT: SchemeId = SchemeId(0);
}

/// A scheme-qualified colour name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColourId {
    pub scheme: String,
    pub colour: String,
}

impl ColourId {
    pub fn new(scheme: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            colour: colour.into(),
        }
    }
}

impl fmt::Display for ColourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.scheme, self.colour)
    }
}

/// A reference to another colour, as written in a definition.
///
/// `link` looks the colour up from the active scheme; `dark.link` starts
/// from the `dark` scheme instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColourRef {
    /// The scheme qualifier, if one was written.
    pub scheme: Option<String>,
    /// The referenced colour name.
    pub colour: String,
}

impl ColourRef {
    /// Split an optional `scheme.` qualifier off a reference.
    pub fn parse(text: &str) -> Self {
        match text.split_once('.') {
            Some((scheme, colour)) if !scheme.is_empty() && !colour.is_empty() => Self {
                scheme: Some(scheme.to_string()),
                colour: colour.to_string(),
            },
            _ => Self {
                scheme: None,
                colour: text.to_string(),
            },
        }
    }

    /// Create an unqualified reference.
    pub fn local(colour: impl Into<String>) -> Self {
        Self {
            scheme: None,
            colour: colour.into(),
        }
    }
}

impl fmt::Display for ColourRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}.{}", scheme, self.colour),
            None => write!(f, "{}", self.colour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_id_display() {
        assert_eq!(ColourId::new("dark", "link").to_string(), "dark.link");
    }

    #[test]
    fn test_colour_ref_parse() {
        assert_eq!(ColourRef::parse("link"), ColourRef::local("link"));

        let qualified = ColourRef::parse("dark.link");
        assert_eq!(qualified.scheme.as_deref(), Some("dark"));
        assert_eq!(qualified.colour, "link");
        assert_eq!(qualified.to_string(), "dark.link");
    }

    #[test]
    fn test_colour_ref_parse_degenerate_dots() {
        assert_eq!(ColourRef::parse(".link"), ColourRef::local(".link"));
        assert_eq!(ColourRef::parse("dark."), ColourRef::local("dark."));
    }
}
