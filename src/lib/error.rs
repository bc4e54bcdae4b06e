use thiserror::Error;

/// Errors surfaced by the maze controller and its loaders.
///
/// Missing rooms and entities mean the maze data is inconsistent with what
/// the controller was asked to do; callers treat them as fatal.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("room {0} does not exist in the maze")]
    RoomNotFound(i32),

    #[error("no active entity at ({x}, {y}) in room {room_id}")]
    EntityNotFound { room_id: i32, x: f32, y: f32 },

    #[error("no player is spawned")]
    NoPlayer,

    #[error("invalid maze: {0}")]
    InvalidMaze(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
