// Copyright (c) 2026 rezky_nightky

use std::io::Result;

use crate::lightning::BoltTier;
use crate::rain::RainIntensity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Quit,
    ToggleMode,
    Resize,
}

/// How a cell should be drawn; the screen maps this onto concrete colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleHint {
    Rain(RainIntensity),
    Bolt(BoltTier),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderCell {
    pub row: u16,
    pub col: u16,
    pub glyph: char,
    pub style: StyleHint,
}

/// Display surface the scene draws into.
pub trait Screen {
    /// `(rows, columns)`.
    fn grid_size(&self) -> Result<(u16, u16)>;

    /// Out-of-bounds cells are dropped silently.
    fn put_cell(&mut self, row: u16, col: u16, glyph: char, style: StyleHint);

    fn clear_frame(&mut self);

    fn present_frame(&mut self) -> Result<()>;

    /// Never blocks. Returns `None` once no mapped input is pending.
    fn poll_input(&mut self) -> Result<Option<Signal>>;
}
