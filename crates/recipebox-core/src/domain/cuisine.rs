//! Cuisine tags attached to every recipe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of cuisine tags a recipe can carry.
///
/// Serialized using the display name (e.g. `"Italian"`), which is also the
/// value persisted by storage adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Indian,
    American,
    Japanese,
    Mexican,
    Chinese,
    Thai,
    French,
    Other,
}

/// Returned when a cuisine name is not one of the known tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown cuisine: {0}")]
pub struct UnknownCuisine(pub String);

impl Cuisine {
    /// Every cuisine, in the order filter menus present them.
    pub const ALL: [Self; 9] = [
        Self::Italian,
        Self::Indian,
        Self::American,
        Self::Japanese,
        Self::Mexican,
        Self::Chinese,
        Self::Thai,
        Self::French,
        Self::Other,
    ];

    /// Display name of the cuisine.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Italian => "Italian",
            Self::Indian => "Indian",
            Self::American => "American",
            Self::Japanese => "Japanese",
            Self::Mexican => "Mexican",
            Self::Chinese => "Chinese",
            Self::Thai => "Thai",
            Self::French => "French",
            Self::Other => "Other",
        }
    }

    /// Parse a free-form cuisine name, falling back to [`Cuisine::Other`].
    ///
    /// Used for model output, where the cuisine is a best guess rather than
    /// a value picked from a menu.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = UnknownCuisine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCuisine(trimmed.to_string()))
    }
}
