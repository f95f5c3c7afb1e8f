// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::{Cell, Layer, Weight};
use crate::lightning::BoltTier;
use crate::rain::RainIntensity;
use crate::runtime::ColorMode;
use crate::screen::StyleHint;

pub const DEFAULT_RAIN_COLOR: &str = "cyan";
pub const DEFAULT_LIGHTNING_COLOR: &str = "yellow";

pub const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Maps one of the eight basic terminal color names, case-insensitively.
pub fn parse_color_name(name: &str) -> Option<Color> {
    match name.trim().to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::DarkRed),
        "green" => Some(Color::DarkGreen),
        "yellow" => Some(Color::DarkYellow),
        "blue" => Some(Color::DarkBlue),
        "magenta" => Some(Color::DarkMagenta),
        "cyan" => Some(Color::DarkCyan),
        "white" => Some(Color::Grey),
        _ => None,
    }
}

/// Resolves `name`, falling back to `default_name` for anything unknown.
pub fn resolve_color(role: &str, name: &str, default_name: &str) -> Color {
    if let Some(c) = parse_color_name(name) {
        return c;
    }
    log::warn!(
        "unknown {} color {:?}, using {} (see --list-colors)",
        role,
        name,
        default_name
    );
    parse_color_name(default_name).unwrap_or(Color::Reset)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub rain: Option<Color>,
    pub lightning: Option<Color>,
}

impl Palette {
    pub fn new(rain: Color, lightning: Color, color_mode: ColorMode) -> Self {
        match color_mode {
            ColorMode::Mono => Self {
                rain: None,
                lightning: None,
            },
            ColorMode::Ansi => Self {
                rain: Some(rain),
                lightning: Some(lightning),
            },
        }
    }

    pub fn cell(&self, ch: char, style: StyleHint) -> Cell {
        let (fg, weight, layer) = match style {
            StyleHint::Rain(i) => {
                let weight = match i {
                    RainIntensity::Normal => Weight::Normal,
                    RainIntensity::Emphasized => Weight::Bold,
                    RainIntensity::Deemphasized => Weight::Dim,
                };
                (self.rain, weight, Layer::Rain)
            }
            StyleHint::Bolt(t) => {
                let weight = match t {
                    BoltTier::Bright => Weight::Bold,
                    BoltTier::Medium => Weight::Normal,
                    BoltTier::Dim => Weight::Dim,
                };
                (self.lightning, weight, Layer::Bolt)
            }
        };
        Cell {
            ch,
            fg,
            weight,
            layer,
        }
    }
}
