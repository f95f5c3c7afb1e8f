// Copyright (c) 2026 rezky_nightky

mod cell;
mod clock;
mod config;
mod error;
mod frame;
mod lightning;
mod palette;
mod rain;
mod random;
mod runtime;
mod scene;
mod screen;
mod terminal;

use std::env;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::clock::MonotonicClock;
use crate::config::{color_enabled_stdout, print_list_colors, Args, KEYS_USAGE};
use crate::error::{Error, Result};
use crate::palette::{resolve_color, Palette, DEFAULT_LIGHTNING_COLOR, DEFAULT_RAIN_COLOR};
use crate::random::StdRandom;
use crate::runtime::{ColorMode, Mode};
use crate::scene::{Flow, SceneDirector};
use crate::screen::Screen;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u64_range(name: &str, v: u64, min: u64, max: u64) -> u64 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if args.mono || env::var_os("NO_COLOR").is_some() {
        return ColorMode::Mono;
    }
    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    ColorMode::Ansi
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let interval = Duration::from_millis(require_u64_range(
        "--interval-ms",
        args.interval_ms,
        1,
        1000,
    ));
    let stop_after = args.duration.and_then(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s <= 0.0 {
            return None;
        }
        Some(Duration::from_secs_f64(require_f64_range(
            "--duration",
            s,
            0.1,
            86400.0,
        )))
    });

    let palette = Palette::new(
        resolve_color("rain", &args.rain_color, DEFAULT_RAIN_COLOR),
        resolve_color("lightning", &args.lightning_color, DEFAULT_LIGHTNING_COLOR),
        detect_color_mode(args),
    );
    let rng = match args.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };

    let mut term = Terminal::new(palette, args.screensaver).map_err(Error::TerminalInit)?;
    let (rows, cols) = term.grid_size()?;
    let mode = Mode::from_flag(args.thunderstorm);
    let mut scene = SceneDirector::new(MonotonicClock::new(), rng, mode, rows, cols);
    log::info!(
        "starting {}x{} grid in {} mode, frame interval {:?}",
        cols,
        rows,
        mode.label(),
        interval
    );

    let start = Instant::now();
    let mut frames: u64 = 0;
    while scene.tick(&mut term)? == Flow::Continue {
        frames += 1;
        if stop_after.is_some_and(|d| start.elapsed() >= d) {
            break;
        }
        thread::sleep(interval);
    }

    let (rows, cols) = scene.grid();
    log::info!(
        "stopped after {} frames on a {}x{} grid in {} mode ({} drops, {} bolts active)",
        frames,
        cols,
        rows,
        scene.mode().label(),
        scene.rain().len(),
        scene.lightning().len()
    );
    Ok(())
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    let cmd = Args::command()
        .styles(clap_styles())
        .help_template(help_template)
        .after_help(KEYS_USAGE);
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return ExitCode::SUCCESS;
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", env!("RAINSTORM_BUILD"));
        let sha = env!("RAINSTORM_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {}", sha);
        }
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
