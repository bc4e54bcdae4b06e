use crate::GameError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Construction-time settings for a play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub room_count: usize,
    pub seed: Option<u64>,
    pub starting_wealth: i32,
    pub coins_per_room: usize,
    pub threats_per_room: usize,
    pub rocks_per_room: usize,
    /// Seconds a single step animation takes.
    pub move_duration: f32,
    /// Seconds the end message stays up before the session resets.
    pub end_game_delay: f32,
    /// Load the maze from this JSON file instead of generating one.
    pub maze_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            room_count: 8,
            seed: None,
            starting_wealth: 0,
            coins_per_room: 3,
            threats_per_room: 2,
            rocks_per_room: 3,
            move_duration: 0.15,
            end_game_delay: 3.0,
            maze_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<GameConfig, GameError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config at `path`, or the defaults when there is no such file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<GameConfig, GameError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        let text = std::fs::read_to_string(path)?;
        GameConfig::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.maze_file.is_none() && self.room_count < 2 {
            return Err(GameError::InvalidConfig(format!(
                "room_count must be at least 2, got {}",
                self.room_count
            )));
        }
        if self.move_duration.is_nan() || self.move_duration < 0.0 {
            return Err(GameError::InvalidConfig(
                "move_duration must not be negative".to_string(),
            ));
        }
        if self.end_game_delay.is_nan() || self.end_game_delay < 0.0 {
            return Err(GameError::InvalidConfig(
                "end_game_delay must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
