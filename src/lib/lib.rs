pub mod coin_system;
pub mod components;
pub mod config;
pub mod error;
pub mod game_manager;
pub mod game_state;
pub mod hud;
pub mod input;
pub mod maze;
pub mod maze_generator;
pub mod player;
pub mod rect;
pub mod room_manager;
pub mod threat_system;

pub use components::*;
pub use config::GameConfig;
pub use error::GameError;
pub use game_manager::GameManager;
pub use hud::Hud;
pub use input::{InputSnapshot, PlayerInput};
pub use maze::{EntityType, Exit, ExitPosition, Maze, Room, RoomEntity};
pub use player::PlayerAction;

/// Whose turn it is. Owned by the [`GameManager`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameState {
    None,
    PlayerTurn,
    EnemyTurn,
    TurnInProgress,
}
