// Copyright (c) 2026 rezky_nightky

use crate::random::RandomSource;
use crate::runtime::Mode;
use crate::screen::{RenderCell, StyleHint};

pub const MAX_RAIN: usize = 2000;
pub const RAIN_GLYPHS: [char; 3] = ['|', '.', '`'];

const MIN_SPEED: f32 = 0.3;
const CALM_MAX_SPEED: f32 = 0.6;
const STORM_MAX_SPEED: f32 = 1.0;
const DIM_BELOW_SPEED: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RainIntensity {
    Normal,
    Emphasized,
    Deemphasized,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Raindrop {
    /// Unwrapped column; reduced modulo the grid width when drawn.
    pub col: u16,
    pub y: f32,
    /// Cells per tick.
    pub speed: f32,
    pub glyph: char,
}

impl Raindrop {
    pub fn intensity(&self, mode: Mode) -> RainIntensity {
        if mode.is_thunderstorm() {
            RainIntensity::Emphasized
        } else if self.speed < DIM_BELOW_SPEED {
            RainIntensity::Deemphasized
        } else {
            RainIntensity::Normal
        }
    }
}

pub fn speed_range(mode: Mode) -> (f32, f32) {
    match mode {
        Mode::Calm => (MIN_SPEED, CALM_MAX_SPEED),
        Mode::Thunderstorm => (MIN_SPEED, STORM_MAX_SPEED),
    }
}

pub struct RainField {
    drops: Vec<Raindrop>,
    capacity: usize,
}

impl RainField {
    pub fn new() -> Self {
        Self::with_capacity(MAX_RAIN)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            drops: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    #[cfg(test)]
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn clear(&mut self) {
        self.drops.clear();
    }

    /// Adds a drop unless the field is full. Returns whether it was added.
    pub fn insert(&mut self, drop: Raindrop) -> bool {
        if self.drops.len() >= self.capacity {
            return false;
        }
        self.drops.push(drop);
        true
    }

    /// Spawns one drop on the top row. A full field or a zero-width grid makes
    /// this a no-op.
    pub fn spawn(&mut self, width: u16, mode: Mode, rng: &mut dyn RandomSource) -> bool {
        if width == 0 || self.drops.len() >= self.capacity {
            return false;
        }
        let (min, max) = speed_range(mode);
        let col = rng.below(width as u32) as u16;
        let speed = rng.unit() * (max - min) + min;
        let glyph = RAIN_GLYPHS[rng.below(RAIN_GLYPHS.len() as u32) as usize];
        self.insert(Raindrop {
            col,
            y: 0.0,
            speed,
            glyph,
        })
    }

    /// Moves every drop down by its speed and drops those at or past `height`.
    /// Survivors keep their relative order.
    pub fn advance(&mut self, height: u16) {
        let limit = height as f32;
        self.drops.retain_mut(|d| {
            d.y += d.speed;
            d.y < limit
        });
    }

    pub fn render_into(&self, width: u16, height: u16, mode: Mode, out: &mut Vec<RenderCell>) {
        if width == 0 {
            return;
        }
        for d in &self.drops {
            let row = d.y.floor();
            if row < 0.0 || row >= height as f32 {
                continue;
            }
            out.push(RenderCell {
                row: row as u16,
                col: d.col % width,
                glyph: d.glyph,
                style: StyleHint::Rain(d.intensity(mode)),
            });
        }
    }
}

impl Default for RainField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, StdRandom};

    fn drop_at(col: u16, speed: f32) -> Raindrop {
        Raindrop {
            col,
            y: 0.0,
            speed,
            glyph: '|',
        }
    }

    #[test]
    fn drop_falls_then_is_pruned_at_bottom() {
        let mut field = RainField::new();
        assert!(field.insert(drop_at(5, 0.5)));

        field.advance(10);
        field.advance(10);
        assert_eq!(field.len(), 1);
        assert_eq!(field.drops()[0].y, 1.0);

        for _ in 2..20 {
            field.advance(10);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn positions_never_decrease_and_out_of_bounds_drops_vanish() {
        let mut field = RainField::new();
        let mut rng = StdRandom::seeded(3);
        for _ in 0..200 {
            for _ in 0..5 {
                field.spawn(40, Mode::Thunderstorm, &mut rng);
            }
            let before = field.len();
            field.advance(12);
            assert!(field.len() <= before);
            assert!(field.drops().iter().all(|d| d.y >= d.speed && d.y < 12.0));
        }
    }

    #[test]
    fn spawn_respects_capacity() {
        let mut field = RainField::with_capacity(8);
        let mut rng = StdRandom::seeded(1);
        let added = (0..50)
            .filter(|_| field.spawn(20, Mode::Calm, &mut rng))
            .count();
        assert_eq!(added, 8);
        assert_eq!(field.len(), 8);
        assert!(!field.insert(drop_at(0, 0.5)));
    }

    #[test]
    fn default_capacity_is_never_exceeded() {
        let mut field = RainField::new();
        let mut rng = StdRandom::seeded(11);
        for _ in 0..(MAX_RAIN + 500) {
            field.spawn(80, Mode::Thunderstorm, &mut rng);
        }
        assert_eq!(field.len(), MAX_RAIN);
    }

    #[test]
    fn spawn_draws_column_speed_and_glyph() {
        let mut field = RainField::new();
        let mut rng = ScriptedRandom::new().ints(&[7, 2]).units(&[0.5]);
        assert!(field.spawn(10, Mode::Thunderstorm, &mut rng));
        let d = field.drops()[0];
        assert_eq!(d.col, 7);
        assert_eq!(d.y, 0.0);
        assert!((d.speed - 0.65).abs() < 1e-6);
        assert_eq!(d.glyph, '`');
    }

    #[test]
    fn spawned_speeds_follow_mode_range() {
        let mut rng = StdRandom::seeded(5);
        for mode in [Mode::Calm, Mode::Thunderstorm] {
            let (min, max) = speed_range(mode);
            let mut field = RainField::new();
            for _ in 0..500 {
                field.spawn(30, mode, &mut rng);
            }
            assert!(field
                .drops()
                .iter()
                .all(|d| d.speed >= min && d.speed <= max && d.col < 30));
        }
    }

    #[test]
    fn zero_width_spawns_nothing() {
        let mut field = RainField::new();
        let mut rng = StdRandom::seeded(0);
        assert!(!field.spawn(0, Mode::Calm, &mut rng));
        assert!(field.is_empty());
    }

    #[test]
    fn render_wraps_column_and_picks_intensity() {
        let mut field = RainField::new();
        field.insert(Raindrop {
            col: 13,
            y: 2.7,
            speed: 0.4,
            glyph: '.',
        });
        field.insert(Raindrop {
            col: 1,
            y: 0.0,
            speed: 0.9,
            glyph: '|',
        });

        let mut out = Vec::new();
        field.render_into(10, 5, Mode::Calm, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].row, out[0].col), (2, 3));
        assert_eq!(out[0].style, StyleHint::Rain(RainIntensity::Deemphasized));
        assert_eq!(out[1].style, StyleHint::Rain(RainIntensity::Normal));

        out.clear();
        field.render_into(10, 5, Mode::Thunderstorm, &mut out);
        assert!(out
            .iter()
            .all(|c| c.style == StyleHint::Rain(RainIntensity::Emphasized)));

        out.clear();
        field.render_into(10, 2, Mode::Calm, &mut out);
        assert_eq!(out.len(), 1);
    }
}
