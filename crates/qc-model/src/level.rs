use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Control material concentration tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    /// Parses the level digit captured from a printout token.
    pub fn from_digit(digit: u8) -> Result<Self> {
        match digit {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ModelError::InvalidLevel(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Zero-based slot in a [`crate::ResultRow`].
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    /// CSV column header for this level.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::One => "NIVEL 1",
            Self::Two => "NIVEL 2",
            Self::Three => "NIVEL 3",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ModelError;

    fn try_from(digit: u8) -> Result<Self> {
        Self::from_digit(digit)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
