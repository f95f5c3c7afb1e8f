// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::{Cell, Weight};
use crate::frame::Frame;
use crate::palette::Palette;
use crate::screen::{Screen, Signal, StyleHint};

pub struct Terminal {
    stdout: Stdout,
    palette: Palette,
    screensaver: bool,
    frame: Frame,
    last: Option<Frame>,
    run_buf: String,
}

impl Terminal {
    pub fn new(palette: Palette, screensaver: bool) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<(u16, u16)> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            terminal::size()
        })();
        let (w, h) = match init_res {
            Ok(size) => size,
            Err(e) => {
                restore_terminal_best_effort();
                return Err(e);
            }
        };
        Ok(Self {
            stdout: out,
            palette,
            screensaver,
            frame: Frame::new(w, h),
            last: None,
            run_buf: String::with_capacity(64),
        })
    }

    fn map_key(&self, k: KeyEvent) -> Option<Signal> {
        if self.screensaver {
            return Some(Signal::Quit);
        }
        match (k.code, k.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Signal::Quit),
            (KeyCode::Esc, _) | (KeyCode::Char('q' | 'Q'), _) => Some(Signal::Quit),
            (KeyCode::Char('t' | 'T'), _) => Some(Signal::ToggleMode),
            _ => None,
        }
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            stdout,
            frame,
            last,
            run_buf,
            ..
        } = self;

        let full = last.as_ref().map_or(true, |l| !l.same_size(frame));
        if full {
            stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        let unchanged = |x: u16, y: u16, cell: &Cell| {
            !full
                && last
                    .as_ref()
                    .and_then(|l| l.get(x, y))
                    .is_some_and(|prev| prev.looks_like(cell))
        };

        let mut cur_fg: Option<Color> = None;
        let mut cur_weight = Weight::Normal;
        let mut cur_pos: Option<(u16, u16)> = None;

        for y in 0..frame.height {
            let mut x = 0u16;
            while x < frame.width {
                let Some(&cell) = frame.get(x, y) else {
                    break;
                };
                if unchanged(x, y, &cell) {
                    x += 1;
                    continue;
                }

                let x0 = x;
                run_buf.clear();
                run_buf.push(cell.ch);
                x += 1;
                while let Some(next) = frame.get(x, y) {
                    if unchanged(x, y, next) || next.fg != cell.fg || next.weight != cell.weight {
                        break;
                    }
                    run_buf.push(next.ch);
                    x += 1;
                }

                if cur_pos != Some((x0, y)) {
                    stdout.queue(cursor::MoveTo(x0, y))?;
                }
                if cell.fg != cur_fg {
                    stdout.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
                    cur_fg = cell.fg;
                }
                if cell.weight != cur_weight {
                    stdout.queue(SetAttribute(Attribute::NormalIntensity))?;
                    match cell.weight {
                        Weight::Bold => {
                            stdout.queue(SetAttribute(Attribute::Bold))?;
                        }
                        Weight::Dim => {
                            stdout.queue(SetAttribute(Attribute::Dim))?;
                        }
                        Weight::Normal => {}
                    }
                    cur_weight = cell.weight;
                }

                stdout.queue(Print(run_buf.as_str()))?;
                cur_pos = if x < frame.width { Some((x, y)) } else { None };
            }
        }

        stdout.queue(SetAttribute(Attribute::Reset))?;
        stdout.queue(ResetColor)?;
        stdout.flush()?;

        match last {
            Some(l) => l.copy_from(frame),
            None => *last = Some(frame.clone()),
        }
        Ok(())
    }
}

impl Screen for Terminal {
    fn grid_size(&self) -> Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        Ok((h, w))
    }

    fn put_cell(&mut self, row: u16, col: u16, glyph: char, style: StyleHint) {
        let cell = self.palette.cell(glyph, style);
        self.frame.set(col, row, cell);
    }

    fn clear_frame(&mut self) {
        self.frame.clear();
    }

    fn present_frame(&mut self) -> Result<()> {
        self.draw()
    }

    fn poll_input(&mut self) -> Result<Option<Signal>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Resize(w, h) => {
                    self.frame.resize(w, h);
                    return Ok(Some(Signal::Resize));
                }
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    if let Some(signal) = self.map_key(k) {
                        return Ok(Some(signal));
                    }
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
