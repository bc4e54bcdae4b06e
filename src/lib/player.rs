use crate::maze::{cell_center, Exit, ExitPosition, Room, ROOM_BOUNDS};
use crate::*;
use specs::prelude::*;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PlayerAction {
    None,
    MoveNorth,
    MoveEast,
    MoveSouth,
    MoveWest,
    DropCoin,
    Escape,
}

impl PlayerAction {
    pub fn direction(self) -> Option<ExitPosition> {
        match self {
            PlayerAction::MoveNorth => Some(ExitPosition::North),
            PlayerAction::MoveEast => Some(ExitPosition::East),
            PlayerAction::MoveSouth => Some(ExitPosition::South),
            PlayerAction::MoveWest => Some(ExitPosition::West),
            _ => None,
        }
    }
}

/// Picks one action from the trigger flags, first match in the order North,
/// East, South, West, Drop, Escape. Recognizing an action locks the turn;
/// escaping ends it.
pub fn interpret_player_action(input: &InputSnapshot, state: &mut GameState) -> PlayerAction {
    let action = if input.north {
        PlayerAction::MoveNorth
    } else if input.east {
        PlayerAction::MoveEast
    } else if input.south {
        PlayerAction::MoveSouth
    } else if input.west {
        PlayerAction::MoveWest
    } else if input.drop {
        PlayerAction::DropCoin
    } else if input.escape {
        PlayerAction::Escape
    } else {
        PlayerAction::None
    };

    match action {
        PlayerAction::None => {}
        PlayerAction::Escape => *state = GameState::None,
        _ => *state = GameState::TurnInProgress,
    }
    action
}

#[derive(Debug, PartialEq)]
pub enum MoveOutcome {
    Bumped,
    Stepped { coin: Option<Entity> },
    LeftRoom(Exit),
}

/// Resolves one step of the player. Leaving the room is only possible from a
/// door cell through a wall that has an exit.
pub fn try_move_player(
    ecs: &mut World,
    player: Entity,
    direction: ExitPosition,
    room: &Room,
) -> MoveOutcome {
    let entities = ecs.entities();
    let mut positions = ecs.write_storage::<Position>();
    let obstacles = ecs.read_storage::<Obstacle>();
    let threats = ecs.read_storage::<Threat>();
    let coins = ecs.read_storage::<Coin>();
    let mut wants_collect = ecs.write_storage::<WantsToCollectCoin>();

    let from = match positions.get(player) {
        Some(pos) => pos.cell(),
        None => return MoveOutcome::Bumped,
    };
    let (dx, dy) = direction.delta();
    let destination = (from.0 + dx, from.1 + dy);

    if !ROOM_BOUNDS.contains(destination) {
        if from == direction.door_cell() {
            if let Some(exit) = room.exit_at(direction) {
                return MoveOutcome::LeftRoom(*exit);
            }
        }
        return MoveOutcome::Bumped;
    }

    let blocked = (&positions, &obstacles)
        .join()
        .any(|(pos, _)| pos.cell() == destination)
        || (&positions, &threats)
            .join()
            .any(|(pos, _)| pos.cell() == destination);
    if blocked {
        return MoveOutcome::Bumped;
    }

    let coin = (&entities, &positions, &coins)
        .join()
        .find(|(_, pos, _)| pos.cell() == destination)
        .map(|(entity, _, _)| entity);

    if let Some(pos) = positions.get_mut(player) {
        let (x, y) = cell_center(destination);
        pos.x = x;
        pos.y = y;
    }

    if let Some(coin) = coin {
        wants_collect
            .insert(
                player,
                WantsToCollectCoin {
                    collected_by: player,
                    coin,
                },
            )
            .expect("Unable to insert want to collect");
    }

    MoveOutcome::Stepped { coin }
}
