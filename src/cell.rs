// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// Stacking order inside one frame; a cell never replaces one on a higher layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    #[default]
    Empty,
    Rain,
    Bolt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub weight: Weight,
    pub layer: Layer,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: None,
        weight: Weight::Normal,
        layer: Layer::Empty,
    };

    /// Same glyph and style; the layer only matters while composing.
    pub fn looks_like(&self, other: &Cell) -> bool {
        self.ch == other.ch && self.fg == other.fg && self.weight == other.weight
    }
}
