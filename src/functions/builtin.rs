//! Builtin colour functions.
//!
//! - `darken(colour, 20%)` - reduce lightness by percentage
//! - `lighten(colour, 20%)` - increase lightness by percentage
//! - `saturate(colour, 20%)` - increase saturation by percentage
//! - `desaturate(colour, 20%)` - decrease saturation by percentage
//! - `mix(colour, other, 50%)` - blend two colours
//! - `alpha(colour, 50%)` - set alpha channel
//! - `rgba(colour, 0.5)` - set alpha channel from a fraction
//! - `invert(colour)` - invert the colour channels

use palette::{Hsl, IntoColor, Srgb};

use crate::error::{ChromaError, Result};
use crate::types::{Colour, Value};

use super::FunctionTable;

/// Register every builtin on a table.
pub(super) fn register_all(table: &mut FunctionTable) {
    table.register("darken", |args| {
        let (colour, percent) = expect_colour_and_percent(args, "darken")?;
        Ok(adjust_lightness(colour, -percent).into())
    });
    table.register("lighten", |args| {
        let (colour, percent) = expect_colour_and_percent(args, "lighten")?;
        Ok(adjust_lightness(colour, percent).into())
    });
    table.register("saturate", |args| {
        let (colour, percent) = expect_colour_and_percent(args, "saturate")?;
        Ok(adjust_saturation(colour, percent).into())
    });
    table.register("desaturate", |args| {
        let (colour, percent) = expect_colour_and_percent(args, "desaturate")?;
        Ok(adjust_saturation(colour, -percent).into())
    });
    table.register("mix", |args| {
        if args.len() != 3 {
            return Err(ChromaError::argument(
                format!("mix() requires 3 arguments, got {}", args.len()),
                Some("Usage: mix(colour, other, 50%)".to_string()),
            ));
        }
        let first = expect_colour(&args[0], "mix")?;
        let second = expect_colour(&args[1], "mix")?;
        let percent = expect_percent(&args[2], "mix")?;
        Ok(mix_colours(first, second, percent / 100.0).into())
    });
    table.register("alpha", |args| {
        let (colour, percent) = expect_colour_and_percent(args, "alpha")?;
        Ok(with_alpha(colour, percent / 100.0).into())
    });
    table.register("rgba", |args| {
        if args.len() != 2 {
            return Err(ChromaError::argument(
                format!("rgba() requires 2 arguments, got {}", args.len()),
                Some("Usage: rgba(colour, 0.5)".to_string()),
            ));
        }
        let colour = expect_colour(&args[0], "rgba")?;
        let fraction = match &args[1] {
            Value::Number(n) => *n as f32,
            Value::Percent(p) => *p as f32 / 100.0,
            other => {
                return Err(ChromaError::argument(
                    format!("rgba() requires an alpha value, got \"{}\"", other),
                    None,
                ))
            }
        };
        Ok(with_alpha(colour, fraction).into())
    });
    table.register("invert", |args| {
        let [value] = args else {
            return Err(ChromaError::argument(
                format!("invert() requires 1 argument, got {}", args.len()),
                None,
            ));
        };
        let c = expect_colour(value, "invert")?;
        Ok(Colour::new(255 - c.r, 255 - c.g, 255 - c.b, c.a).into())
    });
}

fn expect_colour_and_percent(args: &[Value], func_name: &str) -> Result<(Colour, f32)> {
    if args.len() != 2 {
        return Err(ChromaError::argument(
            format!("{}() requires 2 arguments, got {}", func_name, args.len()),
            Some(format!("Usage: {}(colour, 20%)", func_name)),
        ));
    }

    let colour = expect_colour(&args[0], func_name)?;
    let percent = expect_percent(&args[1], func_name)?;

    Ok((colour, percent))
}

fn expect_colour(value: &Value, func_name: &str) -> Result<Colour> {
    value.to_colour().ok_or_else(|| {
        ChromaError::argument(
            format!("{}() requires a colour, got \"{}\"", func_name, value),
            None,
        )
    })
}

fn expect_percent(value: &Value, func_name: &str) -> Result<f32> {
    match value {
        Value::Percent(p) | Value::Number(p) => Ok(*p as f32),
        _ => Err(ChromaError::argument(
            format!("{}() requires a percentage argument", func_name),
            Some(format!("Usage: {}(colour, 20%)", func_name)),
        )),
    }
}

fn to_hsl(colour: Colour) -> Hsl {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );
    rgb.into_color()
}

fn from_hsl(hsl: Hsl, alpha: u8) -> Colour {
    let rgb: Srgb<f32> = hsl.into_color();
    Colour::new(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
        alpha,
    )
}

/// Move `value` toward 1.0 (positive percent) or 0.0 (negative percent).
fn nudge(value: f32, percent: f32) -> f32 {
    let delta = percent / 100.0;
    let moved = if delta > 0.0 {
        value + (1.0 - value) * delta
    } else {
        value + value * delta
    };
    moved.clamp(0.0, 1.0)
}

fn adjust_lightness(colour: Colour, percent: f32) -> Colour {
    let mut hsl = to_hsl(colour);
    hsl.lightness = nudge(hsl.lightness, percent);
    from_hsl(hsl, colour.a)
}

fn adjust_saturation(colour: Colour, percent: f32) -> Colour {
    let mut hsl = to_hsl(colour);
    hsl.saturation = nudge(hsl.saturation, percent);
    from_hsl(hsl, colour.a)
}

fn with_alpha(colour: Colour, fraction: f32) -> Colour {
    let alpha = (fraction * 255.0).clamp(0.0, 255.0).round() as u8;
    Colour::new(colour.r, colour.g, colour.b, alpha)
}

/// Mix two colours by a factor (0.0 = first colour, 1.0 = second colour).
fn mix_colours(a: Colour, b: Colour, factor: f32) -> Colour {
    let factor = factor.clamp(0.0, 1.0);
    let inv = 1.0 - factor;
    let blend = |x: u8, y: u8| ((x as f32 * inv) + (y as f32 * factor)).round() as u8;

    Colour::new(blend(a.r, b.r), blend(a.g, b.g), blend(a.b, b.b), blend(a.a, b.a))
}
