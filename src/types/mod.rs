//! Core value types for chroma.
//!
//! - `Colour` - RGBA colour literals
//! - `Value` - typed host values (colours, keywords, strings, numbers)

mod colour;
mod value;

pub use colour::Colour;
pub use value::Value;
