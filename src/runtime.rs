// Copyright (c) 2026 rezky_nightky

/// Scene intensity. Governs spawn rates, rain speed range and rain emphasis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Calm,
    Thunderstorm,
}

impl Mode {
    pub fn from_flag(thunderstorm: bool) -> Self {
        if thunderstorm {
            Mode::Thunderstorm
        } else {
            Mode::Calm
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Calm => Mode::Thunderstorm,
            Mode::Thunderstorm => Mode::Calm,
        }
    }

    pub fn is_thunderstorm(self) -> bool {
        self == Mode::Thunderstorm
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Calm => "calm",
            Mode::Thunderstorm => "thunderstorm",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Ansi,
}
