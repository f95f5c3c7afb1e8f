// Copyright (c) 2026 rezky_nightky

use std::io::Result;

use crate::clock::Clock;
use crate::lightning::{LightningEngine, MAX_BOLTS};
use crate::rain::{RainField, MAX_RAIN};
use crate::random::RandomSource;
use crate::runtime::Mode;
use crate::screen::{RenderCell, Screen, Signal};

const CALM_RAIN_CHANCE: f32 = 0.3;
const STORM_RAIN_CHANCE: f32 = 0.5;
const CALM_COLS_PER_DROP: u16 = 15;
const STORM_COLS_PER_DROP: u16 = 8;

const BOLT_CHANCE: f32 = 0.005;
/// Random strikes only start while fewer bolts than this are active.
const BOLT_SPAWN_CEILING: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one frame at a time: input, spawning, simulation, then drawing.
pub struct SceneDirector<C: Clock, R: RandomSource> {
    clock: C,
    rng: R,
    mode: Mode,
    rows: u16,
    cols: u16,
    rain: RainField,
    lightning: LightningEngine,
    cells: Vec<RenderCell>,
}

impl<C: Clock, R: RandomSource> SceneDirector<C, R> {
    pub fn new(clock: C, rng: R, mode: Mode, rows: u16, cols: u16) -> Self {
        Self {
            clock,
            rng,
            mode,
            rows,
            cols,
            rain: RainField::new(),
            lightning: LightningEngine::new(),
            cells: Vec::with_capacity(MAX_RAIN + MAX_BOLTS * 64),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `(rows, columns)` the scene currently simulates.
    pub fn grid(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn rain(&self) -> &RainField {
        &self.rain
    }

    pub fn lightning(&self) -> &LightningEngine {
        &self.lightning
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::info!("mode switched to {}", self.mode.label());
    }

    /// Adopts new grid bounds and drops every particle and bolt.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        log::info!(
            "grid resized {}x{} -> {}x{}, clearing {} drops and {} bolts",
            self.cols,
            self.rows,
            cols,
            rows,
            self.rain.len(),
            self.lightning.len()
        );
        self.rows = rows;
        self.cols = cols;
        self.rain.clear();
        self.lightning.clear();
    }

    /// Starts a bolt right away, subject only to the engine's hard cap.
    pub fn strike(&mut self) -> bool {
        self.lightning
            .spawn(self.rows, self.cols, &self.clock, &mut self.rng)
    }

    pub fn tick<S: Screen + ?Sized>(&mut self, screen: &mut S) -> Result<Flow> {
        let mut resized = false;
        while let Some(signal) = screen.poll_input()? {
            match signal {
                Signal::Quit => return Ok(Flow::Quit),
                Signal::ToggleMode => self.toggle_mode(),
                Signal::Resize => {
                    let (rows, cols) = screen.grid_size()?;
                    self.resize(rows, cols);
                    resized = true;
                }
            }
        }

        // A resized scene starts from an empty frame.
        if !resized {
            self.spawn_rain();
            self.spawn_lightning();
            self.rain.advance(self.rows);
            self.lightning.advance(&self.clock, &mut self.rng);
        }

        self.render(screen)?;
        Ok(Flow::Continue)
    }

    fn spawn_rain(&mut self) {
        let (chance, cols_per_drop) = match self.mode {
            Mode::Calm => (CALM_RAIN_CHANCE, CALM_COLS_PER_DROP),
            Mode::Thunderstorm => (STORM_RAIN_CHANCE, STORM_COLS_PER_DROP),
        };
        if !self.rng.chance(chance) {
            return;
        }
        let max_new = (self.cols / cols_per_drop).max(1);
        let count = 1 + self.rng.below(max_new as u32);
        for _ in 0..count {
            if !self.rain.spawn(self.cols, self.mode, &mut self.rng) {
                break;
            }
        }
    }

    fn spawn_lightning(&mut self) {
        if self.mode.is_thunderstorm()
            && self.lightning.len() < BOLT_SPAWN_CEILING
            && self.rng.chance(BOLT_CHANCE)
        {
            self.strike();
        }
    }

    /// Bolts are emitted before rain.
    pub fn snapshot(&mut self) -> &[RenderCell] {
        self.cells.clear();
        self.lightning.render_into(&self.clock, &mut self.cells);
        self.rain
            .render_into(self.cols, self.rows, self.mode, &mut self.cells);
        &self.cells
    }

    fn render<S: Screen + ?Sized>(&mut self, screen: &mut S) -> Result<()> {
        screen.clear_frame();
        self.snapshot();
        for c in &self.cells {
            screen.put_cell(c.row, c.col, c.glyph, c.style);
        }
        screen.present_frame()
    }
}
