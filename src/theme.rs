use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Semantic color roles shared by every theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub muted: Color,
    pub subtle: Color,
    pub text: Color,
    pub love: Color,
    pub gold: Color,
    pub rose: Color,
    pub pine: Color,
    pub foam: Color,
    pub iris: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

pub const ROSE_PINE: Theme = Theme {
    name: "Rose Pine",
    base: rgb(25, 23, 36),
    surface: rgb(31, 29, 46),
    overlay: rgb(38, 35, 58),
    muted: rgb(110, 106, 134),
    subtle: rgb(144, 140, 170),
    text: rgb(224, 222, 244),
    love: rgb(235, 111, 146),
    gold: rgb(246, 193, 119),
    rose: rgb(235, 188, 186),
    pine: rgb(49, 116, 143),
    foam: rgb(156, 207, 216),
    iris: rgb(196, 167, 231),
};

pub const VESPER: Theme = Theme {
    name: "Vesper",
    base: rgb(16, 16, 16),
    surface: rgb(24, 24, 24),
    overlay: rgb(32, 32, 32),
    muted: rgb(102, 102, 102),
    subtle: rgb(153, 153, 153),
    text: rgb(179, 179, 179),
    love: rgb(222, 112, 120),
    gold: rgb(216, 166, 87),
    rose: rgb(255, 152, 146),
    pine: rgb(96, 174, 125),
    foam: rgb(87, 199, 183),
    iris: rgb(138, 125, 201),
};

pub const CATPPUCCIN_MOCHA: Theme = Theme {
    name: "Catppuccin Mocha",
    base: rgb(30, 30, 46),
    surface: rgb(49, 50, 68),
    overlay: rgb(88, 91, 112),
    muted: rgb(108, 112, 134),
    subtle: rgb(147, 153, 178),
    text: rgb(205, 214, 244),
    love: rgb(243, 139, 168),
    gold: rgb(249, 226, 175),
    rose: rgb(245, 194, 231),
    pine: rgb(166, 227, 161),
    foam: rgb(148, 226, 213),
    iris: rgb(203, 166, 247),
};

pub const NOIR: Theme = Theme {
    name: "Noir (Poimandres Black)",
    base: rgb(0, 0, 0),
    surface: rgb(10, 10, 10),
    overlay: rgb(20, 20, 20),
    muted: rgb(80, 80, 80),
    subtle: rgb(120, 120, 120),
    text: rgb(173, 215, 255),
    love: rgb(208, 103, 157),
    gold: rgb(91, 206, 250),
    rose: rgb(129, 161, 193),
    pine: rgb(173, 215, 255),
    foam: rgb(245, 169, 127),
    iris: rgb(100, 200, 255),
};

/// Cycle order for Ctrl+T
pub const THEMES: [Theme; 4] = [ROSE_PINE, VESPER, CATPPUCCIN_MOCHA, NOIR];

/// Theme identifiers as accepted on the command line and in the config file
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    RosePine,
    Vesper,
    Catppuccin,
    Noir,
}

impl ThemeId {
    /// Position of this theme in [`THEMES`]
    pub fn index(self) -> usize {
        match self {
            ThemeId::RosePine => 0,
            ThemeId::Vesper => 1,
            ThemeId::Catppuccin => 2,
            ThemeId::Noir => 3,
        }
    }

    pub fn theme(self) -> &'static Theme {
        &THEMES[self.index()]
    }
}

/// Look up a theme by cycle position, wrapping out-of-range indices
pub fn theme_at(index: usize) -> &'static Theme {
    &THEMES[index % THEMES.len()]
}

pub fn next_theme_index(index: usize) -> usize {
    (index + 1) % THEMES.len()
}
