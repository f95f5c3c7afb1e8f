// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crate::clock::Clock;
use crate::random::RandomSource;
use crate::screen::{RenderCell, StyleHint};

pub const MAX_BOLTS: usize = 5;
pub const MAX_SEGMENTS: usize = 1000;

/// Minimum time between two growth steps of one bolt. Shorter than a frame so
/// bolt speed does not depend on the frame rate.
pub const GROWTH_INTERVAL: Duration = Duration::from_millis(2);

/// Age after which a segment is no longer drawn.
pub const VISIBILITY_WINDOW: Duration = Duration::from_millis(800);

const JITTER_SPAN: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltState {
    Growing,
    Decaying,
    Retired,
}

/// Age band of a visible segment, youngest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltTier {
    Bright,
    Medium,
    Dim,
}

impl BoltTier {
    pub fn from_age(age: Duration) -> Option<Self> {
        if age > VISIBILITY_WINDOW {
            None
        } else if age * 3 < VISIBILITY_WINDOW {
            Some(BoltTier::Bright)
        } else if age * 3 < VISIBILITY_WINDOW * 2 {
            Some(BoltTier::Medium)
        } else {
            Some(BoltTier::Dim)
        }
    }

    pub fn glyph(self) -> char {
        match self {
            BoltTier::Bright => '#',
            BoltTier::Medium => '+',
            BoltTier::Dim => '*',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub row: u16,
    pub col: u16,
    pub created: Duration,
}

impl Segment {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created)
    }

    pub fn is_visible(&self, now: Duration) -> bool {
        self.age(now) <= VISIBILITY_WINDOW
    }
}

#[derive(Clone, Debug)]
pub struct LightningBolt {
    segments: Vec<Segment>,
    state: BoltState,
    target_len: usize,
    last_growth: Duration,
    rows: u16,
    cols: u16,
}

impl LightningBolt {
    /// Starts a bolt at `(row, col)` inside a `rows x cols` grid. The target
    /// length is clamped to `[1, MAX_SEGMENTS]`.
    pub fn new(
        row: u16,
        col: u16,
        target_len: usize,
        rows: u16,
        cols: u16,
        now: Duration,
    ) -> Self {
        let target_len = target_len.clamp(1, MAX_SEGMENTS);
        let mut segments = Vec::with_capacity(target_len);
        segments.push(Segment {
            row,
            col,
            created: now,
        });
        let mut bolt = Self {
            segments,
            state: BoltState::Growing,
            target_len,
            last_growth: now,
            rows,
            cols,
        };
        bolt.halt_if_done();
        bolt
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[cfg(test)]
    pub fn state(&self) -> BoltState {
        self.state
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn is_growing(&self) -> bool {
        self.state == BoltState::Growing
    }

    fn head(&self) -> Segment {
        // A bolt is never built without its first segment.
        self.segments[self.segments.len() - 1]
    }

    fn halt_if_done(&mut self) {
        if self.state != BoltState::Growing {
            return;
        }
        let at_bottom = self.head().row as u32 + 1 >= self.rows as u32;
        if at_bottom || self.segments.len() >= self.target_len {
            self.state = BoltState::Decaying;
        }
    }

    /// One tick of the bolt lifecycle. Returns the state after the tick.
    pub fn advance(&mut self, now: Duration, rng: &mut dyn RandomSource) -> BoltState {
        if self.is_growing() && now.saturating_sub(self.last_growth) > GROWTH_INTERVAL {
            self.last_growth = now;
            let head = self.head();
            let max_col = self.cols.saturating_sub(1) as i32;
            let col = (head.col as i32 + rng.jitter(JITTER_SPAN)).clamp(0, max_col);
            self.segments.push(Segment {
                row: head.row + 1,
                col: col as u16,
                created: now,
            });
            self.halt_if_done();
        }

        if !self.segments.iter().any(|s| s.is_visible(now)) {
            self.state = BoltState::Retired;
        }
        self.state
    }

    pub fn render_into(&self, now: Duration, out: &mut Vec<RenderCell>) {
        for s in &self.segments {
            if let Some(tier) = BoltTier::from_age(s.age(now)) {
                out.push(RenderCell {
                    row: s.row,
                    col: s.col,
                    glyph: tier.glyph(),
                    style: StyleHint::Bolt(tier),
                });
            }
        }
    }
}

pub struct LightningEngine {
    bolts: Vec<LightningBolt>,
    capacity: usize,
}

impl LightningEngine {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BOLTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bolts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.bolts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bolts.is_empty()
    }

    #[cfg(test)]
    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }

    pub fn clear(&mut self) {
        self.bolts.clear();
    }

    /// Adds a prepared bolt unless the engine is full.
    pub fn insert(&mut self, bolt: LightningBolt) -> bool {
        if self.bolts.len() >= self.capacity {
            log::trace!("bolt rejected, {} already active", self.bolts.len());
            return false;
        }
        self.bolts.push(bolt);
        true
    }

    /// Starts a bolt in the upper fifth of the grid, somewhere in the middle
    /// half of its width, aiming for between half and all of its height.
    pub fn spawn(
        &mut self,
        rows: u16,
        cols: u16,
        clock: &dyn Clock,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if rows == 0 || cols == 0 || self.bolts.len() >= self.capacity {
            return false;
        }
        let row = rng.below((rows / 5).max(1) as u32) as u16;
        let col = (cols / 4 + rng.below((cols / 2).max(1) as u32) as u16).min(cols - 1);
        let target = (rows / 2) as usize + rng.below((rows / 2).max(1) as u32) as usize;

        let bolt = LightningBolt::new(row, col, target, rows, cols, clock.now());
        log::debug!(
            "bolt spawned at ({}, {}) aiming for {} segments",
            row,
            col,
            bolt.target_len()
        );
        self.insert(bolt)
    }

    /// Grows every bolt and prunes those whose segments have all faded.
    pub fn advance(&mut self, clock: &dyn Clock, rng: &mut dyn RandomSource) {
        let now = clock.now();
        self.bolts.retain_mut(|b| b.advance(now, rng) != BoltState::Retired);
    }

    pub fn render_into(&self, clock: &dyn Clock, out: &mut Vec<RenderCell>) {
        let now = clock.now();
        for b in &self.bolts {
            b.render_into(now, out);
        }
    }
}

impl Default for LightningEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::{ScriptedRandom, StdRandom};

    fn grow_until_halted(
        bolt: &mut LightningBolt,
        clock: &ManualClock,
        rng: &mut dyn RandomSource,
    ) {
        for _ in 0..10_000 {
            if !bolt.is_growing() {
                return;
            }
            clock.advance_ms(3);
            bolt.advance(clock.now(), rng);
        }
        panic!("bolt never stopped growing");
    }

    #[test]
    fn spawn_stops_at_capacity() {
        let clock = ManualClock::new();
        let mut rng = StdRandom::seeded(9);
        let mut engine = LightningEngine::new();
        let spawned = (0..10)
            .filter(|_| engine.spawn(40, 100, &clock, &mut rng))
            .count();
        assert_eq!(spawned, MAX_BOLTS);
        assert_eq!(engine.len(), 5);
    }

    #[test]
    fn spawn_places_first_segment_in_upper_fifth_and_middle_half() {
        let clock = ManualClock::new();
        let mut rng = StdRandom::seeded(21);
        for _ in 0..200 {
            let mut engine = LightningEngine::new();
            assert!(engine.spawn(50, 80, &clock, &mut rng));
            let b = &engine.bolts()[0];
            let first = b.segments()[0];
            assert!(first.row < 10);
            assert!((20..60).contains(&first.col));
            assert!((25..50).contains(&b.target_len()));
            assert_eq!(b.state(), BoltState::Growing);
        }
    }

    #[test]
    fn spawn_handles_tiny_and_empty_grids() {
        let clock = ManualClock::new();
        let mut rng = StdRandom::seeded(2);
        let mut engine = LightningEngine::new();
        assert!(!engine.spawn(0, 10, &clock, &mut rng));
        assert!(!engine.spawn(10, 0, &clock, &mut rng));
        assert!(engine.spawn(1, 1, &clock, &mut rng));
        let b = &engine.bolts()[0];
        assert_eq!(
            b.segments()[0],
            Segment {
                row: 0,
                col: 0,
                created: Duration::ZERO
            }
        );
        assert_eq!(b.state(), BoltState::Decaying);
    }

    #[test]
    fn growth_waits_for_interval() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        let mut bolt = LightningBolt::new(0, 10, 20, 30, 40, clock.now());

        clock.advance_ms(1);
        bolt.advance(clock.now(), &mut rng);
        assert_eq!(bolt.segments().len(), 1);

        clock.advance_ms(2);
        bolt.advance(clock.now(), &mut rng);
        assert_eq!(bolt.segments().len(), 2);

        // Only one step per tick even when several intervals have elapsed.
        clock.advance_ms(50);
        bolt.advance(clock.now(), &mut rng);
        assert_eq!(bolt.segments().len(), 3);
    }

    #[test]
    fn segments_form_connected_downward_path() {
        let clock = ManualClock::new();
        let mut rng = StdRandom::seeded(77);
        for _ in 0..50 {
            let mut engine = LightningEngine::new();
            engine.spawn(40, 12, &clock, &mut rng);
            let mut bolt = engine.bolts()[0].clone();
            grow_until_halted(&mut bolt, &clock, &mut rng);

            let segs = bolt.segments();
            assert!(segs.len() <= bolt.target_len());
            for pair in segs.windows(2) {
                assert_eq!(pair[1].row, pair[0].row + 1);
                let dx = pair[1].col as i32 - pair[0].col as i32;
                assert!((-2..=2).contains(&dx));
                assert!(pair[1].col < 12);
            }
        }
    }

    #[test]
    fn jitter_is_clamped_to_grid() {
        let clock = ManualClock::new();
        // below(5) == 0 -> jitter -2, then 4 -> +2
        let mut rng = ScriptedRandom::new().ints(&[0, 0, 4, 4]);
        let mut bolt = LightningBolt::new(0, 1, 10, 20, 4, clock.now());
        for _ in 0..4 {
            clock.advance_ms(3);
            bolt.advance(clock.now(), &mut rng);
        }
        let cols: Vec<u16> = bolt.segments().iter().map(|s| s.col).collect();
        assert_eq!(cols, vec![1, 0, 0, 2, 3]);
    }

    #[test]
    fn reaching_target_length_halts_growth() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        let mut bolt = LightningBolt::new(0, 5, 4, 30, 10, clock.now());
        grow_until_halted(&mut bolt, &clock, &mut rng);
        assert_eq!(bolt.segments().len(), 4);
        assert_eq!(bolt.state(), BoltState::Decaying);
    }

    #[test]
    fn reaching_bottom_row_halts_growth_before_target() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        // Grid height 10, starting on row 7: rows 7, 8, 9 and then the floor.
        let mut bolt = LightningBolt::new(7, 5, 4, 10, 10, clock.now());

        clock.advance_ms(3);
        bolt.advance(clock.now(), &mut rng);
        assert!(bolt.is_growing());

        clock.advance_ms(3);
        bolt.advance(clock.now(), &mut rng);
        assert_eq!(bolt.segments().last().map(|s| s.row), Some(9));
        assert_eq!(bolt.state(), BoltState::Decaying);
        assert_eq!(bolt.segments().len(), 3);

        clock.advance_ms(3);
        bolt.advance(clock.now(), &mut rng);
        assert_eq!(bolt.segments().len(), 3);
    }

    #[test]
    fn bolt_is_pruned_once_every_segment_faded() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        let mut engine = LightningEngine::new();
        engine.insert(LightningBolt::new(0, 5, 3, 30, 10, clock.now()));

        for _ in 0..5 {
            clock.advance_ms(3);
            engine.advance(&clock, &mut rng);
        }
        assert_eq!(engine.bolts()[0].segments().len(), 3);
        assert_eq!(engine.bolts()[0].state(), BoltState::Decaying);

        // The first segment is past the window but the last one is not.
        clock.advance_ms(790);
        engine.advance(&clock, &mut rng);
        assert_eq!(engine.len(), 1);

        clock.advance_ms(20);
        engine.advance(&clock, &mut rng);
        assert!(engine.is_empty());

        engine.advance(&clock, &mut rng);
        assert!(engine.is_empty());
    }

    #[test]
    fn retired_bolts_leave_others_in_order() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        let mut engine = LightningEngine::new();
        engine.insert(LightningBolt::new(0, 1, 1, 30, 10, clock.now()));
        clock.advance_ms(500);
        engine.insert(LightningBolt::new(0, 2, 1, 30, 10, clock.now()));
        engine.insert(LightningBolt::new(0, 3, 1, 30, 10, clock.now()));

        clock.advance_ms(400);
        engine.advance(&clock, &mut rng);
        let cols: Vec<u16> = engine
            .bolts()
            .iter()
            .map(|b| b.segments()[0].col)
            .collect();
        assert_eq!(cols, vec![2, 3]);
    }

    #[test]
    fn tiers_split_window_in_three_equal_bands() {
        let ms = Duration::from_millis;
        assert_eq!(BoltTier::from_age(ms(0)), Some(BoltTier::Bright));
        assert_eq!(BoltTier::from_age(ms(266)), Some(BoltTier::Bright));
        assert_eq!(BoltTier::from_age(ms(267)), Some(BoltTier::Medium));
        assert_eq!(BoltTier::from_age(ms(533)), Some(BoltTier::Medium));
        assert_eq!(BoltTier::from_age(ms(534)), Some(BoltTier::Dim));
        assert_eq!(BoltTier::from_age(ms(800)), Some(BoltTier::Dim));
        assert_eq!(BoltTier::from_age(ms(801)), None);
    }

    #[test]
    fn render_skips_faded_segments_and_tiers_by_age() {
        let clock = ManualClock::new();
        let mut rng = ScriptedRandom::new().fallback_int(2);
        let mut bolt = LightningBolt::new(0, 5, 10, 30, 10, clock.now());
        clock.advance_ms(300);
        bolt.advance(clock.now(), &mut rng);
        clock.advance_ms(300);
        bolt.advance(clock.now(), &mut rng);
        clock.advance_ms(300);
        bolt.advance(clock.now(), &mut rng);

        // Ages: 900ms, 600ms, 300ms, 0ms.
        let mut out = Vec::new();
        bolt.render_into(clock.now(), &mut out);
        let glyphs: Vec<char> = out.iter().map(|c| c.glyph).collect();
        assert_eq!(glyphs, vec!['*', '+', '#']);
        assert_eq!(out[0].row, 1);
        assert_eq!(out[2].style, StyleHint::Bolt(BoltTier::Bright));
    }
}
