use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Mode-specific policy injected into the engine at construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// No fire tiles ever spawn
    Classic,
    /// Fire tiles spawn with level and streak pressure
    Arcade,
}

impl GameMode {
    pub fn spawns_hazards(self) -> bool {
        matches!(self, GameMode::Arcade)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => f.write_str("classic"),
            GameMode::Arcade => f.write_str("arcade"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "arcade" => Ok(GameMode::Arcade),
            other => Err(format!("unknown game mode '{}'", other)),
        }
    }
}
