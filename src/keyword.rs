//! Colour keyword table and the ambiguous-keyword safety check.
//!
//! Several CSS colour keywords are spelled two ways (`gray`/`grey`,
//! `aqua`/`cyan`, ...) and share one hex value. Once a compressing
//! stylesheet writer has replaced such a keyword with its hex form, the
//! original spelling cannot be recovered. Those keywords must be quoted
//! to survive.

use crate::error::{ChromaError, Result};
use crate::types::{Colour, Value};

/// Keyword pairs that compress to the same hex literal.
pub const AMBIGUOUS_KEYWORDS: &[(&str, &str)] = &[
    ("aqua", "cyan"),
    ("darkgray", "darkgrey"),
    ("darkslategray", "darkslategrey"),
    ("dimgray", "dimgrey"),
    ("fuchsia", "magenta"),
    ("gray", "grey"),
    ("lightgray", "lightgrey"),
    ("lightslategray", "lightslategrey"),
    ("slategray", "slategrey"),
];

/// When a keyword is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// A colour definition is being added; the output mode may not be known yet.
    Definition,
    /// A value is about to be emitted.
    Output,
}

/// Named colours, sorted for binary search.
const KEYWORDS: &[(&str, Colour)] = &[
    ("aliceblue", Colour::rgb(240, 248, 255)),
    ("antiquewhite", Colour::rgb(250, 235, 215)),
    ("aqua", Colour::rgb(0, 255, 255)),
    ("aquamarine", Colour::rgb(127, 255, 212)),
    ("azure", Colour::rgb(240, 255, 255)),
    ("beige", Colour::rgb(245, 245, 220)),
    ("bisque", Colour::rgb(255, 228, 196)),
    ("black", Colour::rgb(0, 0, 0)),
    ("blanchedalmond", Colour::rgb(255, 235, 205)),
    ("blue", Colour::rgb(0, 0, 255)),
    ("blueviolet", Colour::rgb(138, 43, 226)),
    ("brown", Colour::rgb(165, 42, 42)),
    ("burlywood", Colour::rgb(222, 184, 135)),
    ("cadetblue", Colour::rgb(95, 158, 160)),
    ("chartreuse", Colour::rgb(127, 255, 0)),
    ("chocolate", Colour::rgb(210, 105, 30)),
    ("coral", Colour::rgb(255, 127, 80)),
    ("cornflowerblue", Colour::rgb(100, 149, 237)),
    ("cornsilk", Colour::rgb(255, 248, 220)),
    ("crimson", Colour::rgb(220, 20, 60)),
    ("cyan", Colour::rgb(0, 255, 255)),
    ("darkblue", Colour::rgb(0, 0, 139)),
    ("darkcyan", Colour::rgb(0, 139, 139)),
    ("darkgoldenrod", Colour::rgb(184, 134, 11)),
    ("darkgray", Colour::rgb(169, 169, 169)),
    ("darkgreen", Colour::rgb(0, 100, 0)),
    ("darkgrey", Colour::rgb(169, 169, 169)),
    ("darkkhaki", Colour::rgb(189, 183, 107)),
    ("darkmagenta", Colour::rgb(139, 0, 139)),
    ("darkolivegreen", Colour::rgb(85, 107, 47)),
    ("darkorange", Colour::rgb(255, 140, 0)),
    ("darkorchid", Colour::rgb(153, 50, 204)),
    ("darkred", Colour::rgb(139, 0, 0)),
    ("darksalmon", Colour::rgb(233, 150, 122)),
    ("darkseagreen", Colour::rgb(143, 188, 143)),
    ("darkslateblue", Colour::rgb(72, 61, 139)),
    ("darkslategray", Colour::rgb(47, 79, 79)),
    ("darkslategrey", Colour::rgb(47, 79, 79)),
    ("darkturquoise", Colour::rgb(0, 206, 209)),
    ("darkviolet", Colour::rgb(148, 0, 211)),
    ("deeppink", Colour::rgb(255, 20, 147)),
    ("deepskyblue", Colour::rgb(0, 191, 255)),
    ("dimgray", Colour::rgb(105, 105, 105)),
    ("dimgrey", Colour::rgb(105, 105, 105)),
    ("dodgerblue", Colour::rgb(30, 144, 255)),
    ("firebrick", Colour::rgb(178, 34, 34)),
    ("floralwhite", Colour::rgb(255, 250, 240)),
    ("forestgreen", Colour::rgb(34, 139, 34)),
    ("fuchsia", Colour::rgb(255, 0, 255)),
    ("gainsboro", Colour::rgb(220, 220, 220)),
    ("ghostwhite", Colour::rgb(248, 248, 255)),
    ("gold", Colour::rgb(255, 215, 0)),
    ("goldenrod", Colour::rgb(218, 165, 32)),
    ("gray", Colour::rgb(128, 128, 128)),
    ("green", Colour::rgb(0, 128, 0)),
    ("greenyellow", Colour::rgb(173, 255, 47)),
    ("grey", Colour::rgb(128, 128, 128)),
    ("honeydew", Colour::rgb(240, 255, 240)),
    ("hotpink", Colour::rgb(255, 105, 180)),
    ("indianred", Colour::rgb(205, 92, 92)),
    ("indigo", Colour::rgb(75, 0, 130)),
    ("ivory", Colour::rgb(255, 255, 240)),
    ("khaki", Colour::rgb(240, 230, 140)),
    ("lavender", Colour::rgb(230, 230, 250)),
    ("lavenderblush", Colour::rgb(255, 240, 245)),
    ("lawngreen", Colour::rgb(124, 252, 0)),
    ("lemonchiffon", Colour::rgb(255, 250, 205)),
    ("lightblue", Colour::rgb(173, 216, 230)),
    ("lightcoral", Colour::rgb(240, 128, 128)),
    ("lightcyan", Colour::rgb(224, 255, 255)),
    ("lightgoldenrodyellow", Colour::rgb(250, 250, 210)),
    ("lightgray", Colour::rgb(211, 211, 211)),
    ("lightgreen", Colour::rgb(144, 238, 144)),
    ("lightgrey", Colour::rgb(211, 211, 211)),
    ("lightpink", Colour::rgb(255, 182, 193)),
    ("lightsalmon", Colour::rgb(255, 160, 122)),
    ("lightseagreen", Colour::rgb(32, 178, 170)),
    ("lightskyblue", Colour::rgb(135, 206, 250)),
    ("lightslategray", Colour::rgb(119, 136, 153)),
    ("lightslategrey", Colour::rgb(119, 136, 153)),
    ("lightsteelblue", Colour::rgb(176, 196, 222)),
    ("lightyellow", Colour::rgb(255, 255, 224)),
    ("lime", Colour::rgb(0, 255, 0)),
    ("limegreen", Colour::rgb(50, 205, 50)),
    ("linen", Colour::rgb(250, 240, 230)),
    ("magenta", Colour::rgb(255, 0, 255)),
    ("maroon", Colour::rgb(128, 0, 0)),
    ("mediumaquamarine", Colour::rgb(102, 205, 170)),
    ("mediumblue", Colour::rgb(0, 0, 205)),
    ("mediumorchid", Colour::rgb(186, 85, 211)),
    ("mediumpurple", Colour::rgb(147, 112, 219)),
    ("mediumseagreen", Colour::rgb(60, 179, 113)),
    ("mediumslateblue", Colour::rgb(123, 104, 238)),
    ("mediumspringgreen", Colour::rgb(0, 250, 154)),
    ("mediumturquoise", Colour::rgb(72, 209, 204)),
    ("mediumvioletred", Colour::rgb(199, 21, 133)),
    ("midnightblue", Colour::rgb(25, 25, 112)),
    ("mintcream", Colour::rgb(245, 255, 250)),
    ("mistyrose", Colour::rgb(255, 228, 225)),
    ("moccasin", Colour::rgb(255, 228, 181)),
    ("navajowhite", Colour::rgb(255, 222, 173)),
    ("navy", Colour::rgb(0, 0, 128)),
    ("oldlace", Colour::rgb(253, 245, 230)),
    ("olive", Colour::rgb(128, 128, 0)),
    ("olivedrab", Colour::rgb(107, 142, 35)),
    ("orange", Colour::rgb(255, 165, 0)),
    ("orangered", Colour::rgb(255, 69, 0)),
    ("orchid", Colour::rgb(218, 112, 214)),
    ("palegoldenrod", Colour::rgb(238, 232, 170)),
    ("palegreen", Colour::rgb(152, 251, 152)),
    ("paleturquoise", Colour::rgb(175, 238, 238)),
    ("palevioletred", Colour::rgb(219, 112, 147)),
    ("papayawhip", Colour::rgb(255, 239, 213)),
    ("peachpuff", Colour::rgb(255, 218, 185)),
    ("peru", Colour::rgb(205, 133, 63)),
    ("pink", Colour::rgb(255, 192, 203)),
    ("plum", Colour::rgb(221, 160, 221)),
    ("powderblue", Colour::rgb(176, 224, 230)),
    ("purple", Colour::rgb(128, 0, 128)),
    ("rebeccapurple", Colour::rgb(102, 51, 153)),
    ("red", Colour::rgb(255, 0, 0)),
    ("rosybrown", Colour::rgb(188, 143, 143)),
    ("royalblue", Colour::rgb(65, 105, 225)),
    ("saddlebrown", Colour::rgb(139, 69, 19)),
    ("salmon", Colour::rgb(250, 128, 114)),
    ("sandybrown", Colour::rgb(244, 164, 96)),
    ("seagreen", Colour::rgb(46, 139, 87)),
    ("seashell", Colour::rgb(255, 245, 238)),
    ("sienna", Colour::rgb(160, 82, 45)),
    ("silver", Colour::rgb(192, 192, 192)),
    ("skyblue", Colour::rgb(135, 206, 235)),
    ("slateblue", Colour::rgb(106, 90, 205)),
    ("slategray", Colour::rgb(112, 128, 144)),
    ("slategrey", Colour::rgb(112, 128, 144)),
    ("snow", Colour::rgb(255, 250, 250)),
    ("springgreen", Colour::rgb(0, 255, 127)),
    ("steelblue", Colour::rgb(70, 130, 180)),
    ("tan", Colour::rgb(210, 180, 140)),
    ("teal", Colour::rgb(0, 128, 128)),
    ("thistle", Colour::rgb(216, 191, 216)),
    ("tomato", Colour::rgb(255, 99, 71)),
    ("transparent", Colour::new(0, 0, 0, 0)),
    ("turquoise", Colour::rgb(64, 224, 208)),
    ("violet", Colour::rgb(238, 130, 238)),
    ("wheat", Colour::rgb(245, 222, 179)),
    ("white", Colour::rgb(255, 255, 255)),
    ("whitesmoke", Colour::rgb(245, 245, 245)),
    ("yellow", Colour::rgb(255, 255, 0)),
    ("yellowgreen", Colour::rgb(154, 205, 50)),
];

/// Look up the colour a keyword names (case-insensitive).
pub fn lookup(name: &str) -> Option<Colour> {
    let name = name.to_ascii_lowercase();
    KEYWORDS
        .binary_search_by(|(k, _)| (*k).cmp(name.as_str()))
        .ok()
        .map(|i| KEYWORDS[i].1)
}

/// Check if a name is a colour keyword.
pub fn is_keyword_name(name: &str) -> bool {
    lookup(name).is_some()
}

/// The ambiguous pair a keyword belongs to, if any.
pub fn ambiguous_pair(name: &str) -> Option<(&'static str, &'static str)> {
    let name = name.to_ascii_lowercase();
    AMBIGUOUS_KEYWORDS
        .iter()
        .find(|(a, b)| *a == name || *b == name)
        .copied()
}

/// The ambiguous pair whose keywords compress to this colour.
pub fn ambiguous_pair_for(colour: Colour) -> Option<(&'static str, &'static str)> {
    AMBIGUOUS_KEYWORDS
        .iter()
        .find(|(a, _)| lookup(a) == Some(colour))
        .copied()
}

/// Reject an ambiguous keyword that is about to lose its spelling.
///
/// Quoted keywords always pass. Unquoted ambiguous keywords fail at
/// definition time whatever the output mode, and at output time only when
/// output is compressed.
pub fn check(keyword: &str, quoted: bool, stage: CheckStage, compressed: bool) -> Result<()> {
    if quoted {
        return Ok(());
    }
    let Some((first, second)) = ambiguous_pair(keyword) else {
        return Ok(());
    };
    let hex = lookup(keyword).map(Colour::to_short_hex).unwrap_or_default();

    match stage {
        CheckStage::Definition => {
            let keyword = keyword.to_ascii_lowercase();
            let twin = if keyword == first { second } else { first };
            Err(ChromaError::DangerousKeyword {
                keyword,
                twin: twin.to_string(),
                hex,
            })
        }
        CheckStage::Output if compressed => Err(ChromaError::CompressedKeyword {
            hex,
            first: first.to_string(),
            second: second.to_string(),
        }),
        CheckStage::Output => Ok(()),
    }
}

/// Check if a value is a colour keyword, written bare or quoted.
pub fn is_keyword(value: &Value) -> bool {
    match value {
        Value::Keyword(name) | Value::String { text: name, .. } => is_keyword_name(name),
        _ => false,
    }
}

/// Check if a value has lost, or will lose, its keyword spelling.
///
/// Unquoted ambiguous keywords are always dangerous, whether they arrive as
/// a keyword token or a bare string. In compressed mode a
/// colour literal is dangerous when it carries the hex value of an
/// ambiguous pair, since the writer may already have swapped the keyword
/// for that hex.
pub fn is_dangerous(value: &Value, compressed: bool) -> bool {
    match value {
        Value::Keyword(name) | Value::String { text: name, quoted: false } => {
            ambiguous_pair(name).is_some()
        }
        Value::Colour(colour) => compressed && ambiguous_pair_for(*colour).is_some(),
        _ => false,
    }
}

/// Recover the keyword a compressed colour stood for.
///
/// Only unambiguous keywords can be recovered; `gray`/`grey` style pairs
/// yield `None`. Keywords and strings pass through as their own names.
pub fn keyword_for_value(value: &Value, compressed: bool) -> Option<String> {
    match value {
        Value::Keyword(name) => Some(name.clone()),
        Value::String { text, .. } if is_keyword_name(text) => Some(text.clone()),
        Value::Colour(colour) if compressed => {
            if ambiguous_pair_for(*colour).is_some() {
                return None;
            }
            KEYWORDS
                .iter()
                .find(|(_, c)| c == colour)
                .map(|(name, _)| name.to_string())
        }
        _ => None,
    }
}
