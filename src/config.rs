// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::palette::{COLOR_NAMES, DEFAULT_LIGHTNING_COLOR, DEFAULT_RAIN_COLOR};

pub const KEYS_USAGE: &str = "KEYS:\n  t        toggle calm / thunderstorm\n  q, Esc   quit";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "rainstorm", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        long = "rain-color",
        default_value = DEFAULT_RAIN_COLOR,
        help_heading = "APPEARANCE",
        help = "Rain color (see --list-colors)"
    )]
    pub rain_color: String,

    #[arg(
        long = "lightning-color",
        default_value = DEFAULT_LIGHTNING_COLOR,
        help_heading = "APPEARANCE",
        help = "Lightning color (see --list-colors)"
    )]
    pub lightning_color: String,

    #[arg(
        long = "mono",
        help_heading = "APPEARANCE",
        help = "Disable colors (also implied by NO_COLOR or TERM=dumb)"
    )]
    pub mono: bool,

    #[arg(
        short = 't',
        long = "thunderstorm",
        help_heading = "GENERAL",
        help = "Start in thunderstorm mode"
    )]
    pub thunderstorm: bool,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed for a reproducible scene"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "interval-ms",
        default_value_t = 15,
        help_heading = "PERFORMANCE",
        help = "Frame interval in milliseconds (min 1 max 1000)"
    )]
    pub interval_ms: u64,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Write log output to this file (filter with RUST_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color names and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLORS:\x1b[0m");
    } else {
        println!("AVAILABLE COLORS:");
    }
    for name in COLOR_NAMES {
        let note = if name == DEFAULT_RAIN_COLOR {
            "  (default rain)"
        } else if name == DEFAULT_LIGHTNING_COLOR {
            "  (default lightning)"
        } else {
            ""
        };
        println!("  {}{}", name, note);
    }
    println!();
    println!("Unknown names fall back to the default for that role.");
}
