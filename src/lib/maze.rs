use crate::rect::Rect;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Cells of the play area. Cell `(cx, cy)` has its center at
/// `(cx + 0.5, cy + 0.5)`.
pub const ROOM_BOUNDS: Rect = Rect {
    top: 4,
    lft: -8,
    bot: -4,
    rht: 8,
};

/// Where a fresh game places the player.
pub const START_POSITION: (f32, f32) = (0.5, 0.5);

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum ExitPosition {
    North,
    East,
    South,
    West,
}

impl ExitPosition {
    pub const ALL: [ExitPosition; 4] = [
        ExitPosition::North,
        ExitPosition::East,
        ExitPosition::South,
        ExitPosition::West,
    ];

    pub fn opposite(self) -> ExitPosition {
        match self {
            ExitPosition::North => ExitPosition::South,
            ExitPosition::East => ExitPosition::West,
            ExitPosition::South => ExitPosition::North,
            ExitPosition::West => ExitPosition::East,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            ExitPosition::North => (0, 1),
            ExitPosition::East => (1, 0),
            ExitPosition::South => (0, -1),
            ExitPosition::West => (-1, 0),
        }
    }

    /// The door cell on this wall. It doubles as the spawn point for a
    /// player arriving through it.
    pub fn spawn_point(self) -> (f32, f32) {
        match self {
            ExitPosition::North => (0.5, 4.5),
            ExitPosition::East => (8.5, 0.5),
            ExitPosition::South => (0.5, -3.5),
            ExitPosition::West => (-7.5, 0.5),
        }
    }

    pub fn door_cell(self) -> (i32, i32) {
        let (x, y) = self.spawn_point();
        cell_of(x, y)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum EntityType {
    Coin,
    Zombie,
    Skeleton,
    Rock,
}

impl EntityType {
    pub fn is_threat(self) -> bool {
        matches!(self, EntityType::Zombie | EntityType::Skeleton)
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityType::Coin => "Coin",
            EntityType::Zombie => "Zombie",
            EntityType::Skeleton => "Skeleton",
            EntityType::Rock => "Rock",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RoomEntity {
    pub position: (f32, f32),
    pub kind: EntityType,
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

impl RoomEntity {
    pub fn new(kind: EntityType, x: f32, y: f32) -> RoomEntity {
        RoomEntity {
            position: (x, y),
            kind,
            active: true,
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.position.0, self.position.1)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Exit {
    pub position: ExitPosition,
    pub room_id: i32,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_id: i32,
    #[serde(default)]
    pub entities: Vec<RoomEntity>,
    #[serde(default)]
    pub exits: Vec<Exit>,
}

impl Room {
    pub fn new(room_id: i32) -> Room {
        Room {
            room_id,
            entities: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub fn exit_at(&self, position: ExitPosition) -> Option<&Exit> {
        self.exits.iter().find(|e| e.position == position)
    }

    pub fn has_active_threats(&self) -> bool {
        self.entities.iter().any(|e| e.active && e.kind.is_threat())
    }

    /// First active entity of `kind` occupying the cell that contains
    /// `(x, y)`. Threat entries keep their spawn cell while the threat roams,
    /// so other kinds sharing the cell must not match.
    pub fn active_entity_at_mut(
        &mut self,
        kind: EntityType,
        x: f32,
        y: f32,
    ) -> Option<&mut RoomEntity> {
        let cell = cell_of(x, y);
        self.entities
            .iter_mut()
            .find(|e| e.active && e.kind == kind && e.cell() == cell)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub rooms: Vec<Room>,
    pub exit_room_id: i32,
}

impl Maze {
    pub fn room(&self, room_id: i32) -> Result<&Room, GameError> {
        self.rooms
            .iter()
            .find(|r| r.room_id == room_id)
            .ok_or(GameError::RoomNotFound(room_id))
    }

    pub fn from_json(text: &str) -> Result<Maze, GameError> {
        let maze: Maze = serde_json::from_str(text)?;
        maze.validate()?;
        Ok(maze)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Maze, GameError> {
        let text = std::fs::read_to_string(path)?;
        Maze::from_json(&text)
    }

    /// Checks the structural integrity the controller relies on.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rooms.len() < 2 {
            return Err(GameError::InvalidMaze(
                "a maze needs at least two rooms".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for room in self.rooms.iter() {
            if !ids.insert(room.room_id) {
                return Err(GameError::InvalidMaze(format!(
                    "room id {} is used twice",
                    room.room_id
                )));
            }
        }
        if !ids.contains(&0) {
            return Err(GameError::InvalidMaze("room 0 is missing".to_string()));
        }
        if !ids.contains(&self.exit_room_id) {
            return Err(GameError::InvalidMaze(format!(
                "exit room {} is missing",
                self.exit_room_id
            )));
        }

        for room in self.rooms.iter() {
            let mut walls = HashSet::new();
            for exit in room.exits.iter() {
                if !walls.insert(exit.position) {
                    return Err(GameError::InvalidMaze(format!(
                        "room {} has two exits on the {:?} wall",
                        room.room_id, exit.position
                    )));
                }
                if !ids.contains(&exit.room_id) {
                    return Err(GameError::InvalidMaze(format!(
                        "room {} leads to missing room {}",
                        room.room_id, exit.room_id
                    )));
                }
            }
            for entity in room.entities.iter() {
                if !ROOM_BOUNDS.contains(entity.cell()) {
                    return Err(GameError::InvalidMaze(format!(
                        "room {} has a {} outside the play area",
                        room.room_id,
                        entity.kind.name()
                    )));
                }
            }
        }

        Ok(())
    }
}

pub fn cell_of(x: f32, y: f32) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}

pub fn cell_center(cell: (i32, i32)) -> (f32, f32) {
    (cell.0 as f32 + 0.5, cell.1 as f32 + 0.5)
}
