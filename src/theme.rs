//! Accent color themes
//!
//! The eight themes mirror the colors predefined by the Awesome-CV class.
//! This table is the single source of truth for names and hex values; the
//! renderer embeds the hex value and the CLI lists it.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when selecting a theme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{name}' (available: {})", Theme::names().join(", "))]
    Unknown { name: String },
}

/// A named accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Theme {
    Emerald,
    Skyblue,
    /// The Awesome-CV class default
    #[default]
    Red,
    Pink,
    Orange,
    Nephritis,
    Concrete,
    Darknight,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Emerald,
        Theme::Skyblue,
        Theme::Red,
        Theme::Pink,
        Theme::Orange,
        Theme::Nephritis,
        Theme::Concrete,
        Theme::Darknight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Emerald => "emerald",
            Theme::Skyblue => "skyblue",
            Theme::Red => "red",
            Theme::Pink => "pink",
            Theme::Orange => "orange",
            Theme::Nephritis => "nephritis",
            Theme::Concrete => "concrete",
            Theme::Darknight => "darknight",
        }
    }

    /// Hex color with leading `#`
    pub fn hex(self) -> &'static str {
        match self {
            Theme::Emerald => "#00A388",
            Theme::Skyblue => "#0395DE",
            Theme::Red => "#DC3522",
            Theme::Pink => "#EF4089",
            Theme::Orange => "#FF6138",
            Theme::Nephritis => "#27AE60",
            Theme::Concrete => "#95A5A6",
            Theme::Darknight => "#131A28",
        }
    }

    /// Hex digits as expected by xcolor's `HTML` model
    pub fn html_code(self) -> &'static str {
        &self.hex()[1..]
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|theme| theme.name()).collect()
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    /// Case-insensitive lookup; there is no fallback for unknown names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ThemeError::Unknown {
                name: wanted.to_string(),
            })
    }
}

impl TryFrom<String> for Theme {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
