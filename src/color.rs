//! Background colours for tree rows.

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

/// Default background of a row by tree depth.
pub fn depth_background(depth: u8) -> Option<Rgb> {
    match depth {
        0 => Some(Rgb(157, 159, 85)),
        1 => Some(Rgb(85, 157, 159)),
        2 => Some(Rgb(85, 120, 159)),
        3 => Some(Rgb(159, 85, 120)),
        4 => Some(Rgb(120, 159, 85)),
        _ => None,
    }
}

/// Parse a colour given as `[r, g, b]` (0–255), `#rrggbb` or a basic name.
pub fn parse_color(val: &str) -> Option<Rgb> {
    let val = val.trim();
    if let Some(inner) = val.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let parts: Vec<u8> = inner
            .split(',')
            .map(|s| s.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        return match parts[..] {
            [r, g, b] => Some(Rgb(r, g, b)),
            _ => None,
        };
    }
    if let Some(hex) = val.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match val.to_ascii_lowercase().as_str() {
        "white" => Some(Rgb(255, 255, 255)),
        "black" => Some(Rgb(0, 0, 0)),
        "red" => Some(Rgb(255, 0, 0)),
        "green" => Some(Rgb(0, 128, 0)),
        "blue" => Some(Rgb(0, 0, 255)),
        "yellow" => Some(Rgb(255, 255, 0)),
        "orange" => Some(Rgb(255, 165, 0)),
        "gray" | "grey" => Some(Rgb(128, 128, 128)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_hex_and_names() {
        assert_eq!(parse_color("[1, 2, 3]"), Some(Rgb(1, 2, 3)));
        assert_eq!(parse_color("#ff8000"), Some(Rgb(255, 128, 0)));
        assert_eq!(parse_color("Grey"), Some(Rgb(128, 128, 128)));
        assert_eq!(parse_color("[1, 2]"), None);
        assert_eq!(parse_color("[1, 2, 300]"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!("orange".parse::<Rgb>(), Ok(Rgb(255, 165, 0)));
        assert_eq!("teal".parse::<Rgb>(), Err(ColorParseError("teal".into())));
    }

    #[test]
    fn palette_covers_all_tree_depths() {
        assert!((0..=4).all(|d| depth_background(d).is_some()));
        assert_eq!(depth_background(5), None);
    }
}
