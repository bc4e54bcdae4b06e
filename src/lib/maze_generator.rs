use crate::maze::{cell_center, EntityType, Exit, ExitPosition, Maze, Room, RoomEntity, ROOM_BOUNDS};
use crate::{GameConfig, GameError};
use rltk::RandomNumberGenerator;
use std::collections::HashMap;

/// Builds the maze for a session from the configuration it was created with.
pub struct MazeGenerator {
    config: GameConfig,
}

impl MazeGenerator {
    pub fn new(config: &GameConfig) -> MazeGenerator {
        MazeGenerator {
            config: config.clone(),
        }
    }

    pub fn load_maze(&self) -> Result<Maze, GameError> {
        let maze = match &self.config.maze_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading maze from file");
                Maze::load(path)?
            }
            None => self.generate()?,
        };
        maze.validate()?;
        Ok(maze)
    }

    /// Grows a tree of rooms on a grid so that an exit on one wall always
    /// leads to a room whose opposite wall leads back.
    pub fn generate(&self) -> Result<Maze, GameError> {
        self.config.validate()?;
        let mut rng = match self.config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };

        let mut rooms = vec![Room::new(0)];
        let mut coords = vec![(0, 0)];
        let mut depth = vec![0];
        let mut taken: HashMap<(i32, i32), i32> = HashMap::new();
        taken.insert((0, 0), 0);

        for id in 1..self.config.room_count as i32 {
            let mut candidates = Vec::new();
            for (parent, coord) in coords.iter().enumerate() {
                for side in ExitPosition::ALL.iter() {
                    let (dx, dy) = side.delta();
                    let next = (coord.0 + dx, coord.1 + dy);
                    if !taken.contains_key(&next) {
                        candidates.push((parent, *side, next));
                    }
                }
            }

            let (parent, side, next) = candidates[rng.range(0, candidates.len())];
            rooms[parent].exits.push(Exit {
                position: side,
                room_id: id,
            });
            let mut room = Room::new(id);
            room.exits.push(Exit {
                position: side.opposite(),
                room_id: parent as i32,
            });
            rooms.push(room);
            coords.push(next);
            depth.push(depth[parent] + 1);
            taken.insert(next, id);
        }

        let exit_room_id = depth
            .iter()
            .enumerate()
            .max_by_key(|(_, d)| **d)
            .map(|(id, _)| id as i32)
            .unwrap_or(0);

        for room in rooms.iter_mut() {
            if room.room_id == exit_room_id {
                continue;
            }
            self.populate(room, &mut rng);
        }

        tracing::debug!(
            rooms = rooms.len(),
            exit_room_id,
            "generated maze"
        );
        Ok(Maze {
            rooms,
            exit_room_id,
        })
    }

    fn populate(&self, room: &mut Room, rng: &mut RandomNumberGenerator) {
        let doors: Vec<(i32, i32)> = ExitPosition::ALL.iter().map(|s| s.door_cell()).collect();
        let start = ROOM_BOUNDS.center();
        let mut free = Vec::new();
        for cx in ROOM_BOUNDS.lft..=ROOM_BOUNDS.rht {
            for cy in ROOM_BOUNDS.bot..=ROOM_BOUNDS.top {
                if (cx, cy) != start && !doors.contains(&(cx, cy)) {
                    free.push((cx, cy));
                }
            }
        }

        // The starting room stays free of threats.
        let threats = if room.room_id == 0 {
            0
        } else {
            self.config.threats_per_room
        };
        let wanted = [
            (EntityType::Coin, self.config.coins_per_room),
            (EntityType::Rock, self.config.rocks_per_room),
        ];

        for (kind, count) in wanted.iter() {
            for _ in 0..*count {
                if let Some(cell) = take_random(&mut free, rng) {
                    let (x, y) = cell_center(cell);
                    room.entities.push(RoomEntity::new(*kind, x, y));
                }
            }
        }
        for _ in 0..threats {
            if let Some(cell) = take_random(&mut free, rng) {
                let kind = if rng.roll_dice(1, 2) == 1 {
                    EntityType::Zombie
                } else {
                    EntityType::Skeleton
                };
                let (x, y) = cell_center(cell);
                room.entities.push(RoomEntity::new(kind, x, y));
            }
        }
    }
}

fn take_random(free: &mut Vec<(i32, i32)>, rng: &mut RandomNumberGenerator) -> Option<(i32, i32)> {
    if free.is_empty() {
        return None;
    }
    let idx = rng.range(0, free.len());
    Some(free.swap_remove(idx))
}
