use crate::coin_system::CoinCollectionSystem;
use crate::maze::{Room, START_POSITION};
use crate::maze_generator::MazeGenerator;
use crate::player::{interpret_player_action, try_move_player, MoveOutcome};
use crate::room_manager::{renderable, RoomManager};
use crate::threat_system::ThreatTurnSystem;
use crate::*;
use rltk::RGB;
use specs::prelude::*;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
struct EndGameTimer {
    remaining: f32,
}

/// Owns one play session: the turn state, the rooms, the player and the
/// threats of the displayed room. The host drives it through
/// [`init`](GameManager::init), [`tick`](GameManager::tick) and
/// [`shutdown`](GameManager::shutdown).
pub struct GameManager {
    pub ecs: World,
    pub hud: Hud,
    config: GameConfig,
    preset: Option<Maze>,
    state: GameState,
    input: PlayerInput,
    rooms: Vec<Room>,
    exit_room_id: i32,
    current_room_id: i32,
    player: Option<Entity>,
    enemies: Vec<Entity>,
    room_manager: RoomManager,
    end_game: Option<EndGameTimer>,
}

impl GameManager {
    pub fn new(config: GameConfig) -> Result<GameManager, GameError> {
        config.validate()?;
        let mut ecs = World::new();
        register_components(&mut ecs);
        Ok(GameManager {
            ecs,
            hud: Hud::default(),
            config,
            preset: None,
            state: GameState::None,
            input: PlayerInput::default(),
            rooms: Vec::new(),
            exit_room_id: 0,
            current_room_id: 0,
            player: None,
            enemies: Vec::new(),
            room_manager: RoomManager::default(),
            end_game: None,
        })
    }

    /// A session that always plays `maze` instead of loading one.
    pub fn with_maze(config: GameConfig, maze: Maze) -> Result<GameManager, GameError> {
        maze.validate()?;
        let mut manager = GameManager::new(config)?;
        manager.preset = Some(maze);
        Ok(manager)
    }

    pub fn init(&mut self) -> Result<(), GameError> {
        let maze = match &self.preset {
            Some(maze) => maze.clone(),
            None => MazeGenerator::new(&self.config).load_maze()?,
        };
        self.exit_room_id = maze.exit_room_id;
        self.rooms = maze.rooms;
        self.enemies.clear();
        self.end_game = None;

        let (x, y) = START_POSITION;
        self.spawn_player(x, y, self.config.starting_wealth);
        self.load_room(0)?;
        self.hud.update_wealth(self.config.starting_wealth);
        self.input.enable();
        info!(
            rooms = self.rooms.len(),
            exit_room_id = self.exit_room_id,
            "game started"
        );
        Ok(())
    }

    pub fn tick(&mut self, delta: f32, input: &InputSnapshot) -> Result<(), GameError> {
        if self.advance_end_game(delta)? {
            return Ok(());
        }
        self.advance_player_move(delta)?;

        match self.state {
            GameState::None => {}
            GameState::PlayerTurn => {
                if self.input.is_enabled() && !self.is_player_moving() {
                    let action = interpret_player_action(input, &mut self.state);
                    self.dispatch(action)?;
                }
            }
            GameState::EnemyTurn => {
                if self.check_for_enemies()? {
                    self.enemy_turn();
                }
                if self.end_game.is_none() {
                    self.input.enable();
                    self.state = GameState::PlayerTurn;
                }
            }
            GameState::TurnInProgress => {}
        }
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.room_manager.clear_room(&mut self.ecs);
        self.destroy_player();
        self.enemies.clear();
        self.end_game = None;
        self.state = GameState::None;
        self.input.disable();
        info!("game shut down");
    }

    pub fn load_room(&mut self, room_id: i32) -> Result<(), GameError> {
        let room = find_room(&self.rooms, room_id)?;
        self.current_room_id = room_id;
        self.enemies = self.room_manager.interpret_room(room, &mut self.ecs);
        self.hud.update_room(room_id);
        self.state = GameState::PlayerTurn;
        info!(room_id, threats = self.enemies.len(), "room loaded");
        Ok(())
    }

    /// Moves the player into `room_id`, arriving through `exit_position` of
    /// the new room. Entering the maze's exit room wins the game.
    pub fn enter_room(
        &mut self,
        exit_position: ExitPosition,
        room_id: i32,
    ) -> Result<(), GameError> {
        self.state = GameState::None;
        self.input.disable();
        self.enemies.clear();

        let wealth = self.wealth().ok_or(GameError::NoPlayer)?;
        self.destroy_player();

        if room_id == self.exit_room_id {
            info!(wealth, "exit found");
            self.hud.win_text = format!("You found the exit and acquired {} Wealth!", wealth);
            self.start_end_game();
            return Ok(());
        }

        self.load_room(room_id)?;
        let (x, y) = exit_position.spawn_point();
        self.spawn_player(x, y, wealth);
        self.hud.update_wealth(wealth);
        self.input.enable();
        info!(room_id, side = ?exit_position, "entered room");
        Ok(())
    }

    /// Drops a coin at `(x, y)`. Wealth is allowed to go negative.
    pub fn drop_coin(&mut self, x: f32, y: f32) -> Result<(), GameError> {
        let player = self.player.ok_or(GameError::NoPlayer)?;
        let wealth = {
            let mut players = self.ecs.write_storage::<Player>();
            let stats = players.get_mut(player).ok_or(GameError::NoPlayer)?;
            stats.wealth -= 1;
            stats.wealth
        };
        self.hud.update_wealth(wealth);

        let room = find_room_mut(&mut self.rooms, self.current_room_id)?;
        self.room_manager.add_coin(room, x, y, &mut self.ecs);

        self.state = GameState::EnemyTurn;
        debug!(x, y, wealth, "coin dropped");
        Ok(())
    }

    /// Soft-removes the active `kind` entity occupying the cell of `(x, y)`
    /// in the current room.
    pub fn update_room_entity(
        &mut self,
        kind: EntityType,
        x: f32,
        y: f32,
    ) -> Result<(), GameError> {
        let room_id = self.current_room_id;
        let room = find_room_mut(&mut self.rooms, room_id)?;
        match room.active_entity_at_mut(kind, x, y) {
            Some(entity) => {
                entity.active = false;
                Ok(())
            }
            None => Err(GameError::EntityNotFound { room_id, x, y }),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_room_id(&self) -> i32 {
        self.current_room_id
    }

    pub fn exit_room_id(&self) -> i32 {
        self.exit_room_id
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input.is_enabled()
    }

    pub fn is_game_over(&self) -> bool {
        self.end_game.is_some()
    }

    pub fn player_position(&self) -> Option<(f32, f32)> {
        let player = self.player?;
        let positions = self.ecs.read_storage::<Position>();
        positions.get(player).map(|pos| (pos.x, pos.y))
    }

    pub fn wealth(&self) -> Option<i32> {
        let player = self.player?;
        let players = self.ecs.read_storage::<Player>();
        players.get(player).map(|p| p.wealth)
    }

    pub fn is_player_moving(&self) -> bool {
        match self.player {
            Some(player) => self.ecs.read_storage::<Moving>().get(player).is_some(),
            None => false,
        }
    }

    fn dispatch(&mut self, action: PlayerAction) -> Result<(), GameError> {
        if action == PlayerAction::None {
            return Ok(());
        }
        debug!(?action, "player action");
        self.input.disable();

        match action {
            PlayerAction::None => Ok(()),
            PlayerAction::DropCoin => {
                let (x, y) = self.player_position().ok_or(GameError::NoPlayer)?;
                self.drop_coin(x, y)
            }
            PlayerAction::Escape => {
                self.destroy_player();
                self.hud.win_text = "You escaped".to_string();
                self.start_end_game();
                Ok(())
            }
            _ => {
                let player = self.player.ok_or(GameError::NoPlayer)?;
                if let Some(direction) = action.direction() {
                    self.ecs
                        .write_storage::<Moving>()
                        .insert(
                            player,
                            Moving {
                                direction,
                                remaining: self.config.move_duration,
                            },
                        )
                        .expect("Unable to insert movement");
                }
                Ok(())
            }
        }
    }

    fn advance_player_move(&mut self, delta: f32) -> Result<(), GameError> {
        let player = match self.player {
            Some(player) => player,
            None => return Ok(()),
        };
        let finished = {
            let mut moving = self.ecs.write_storage::<Moving>();
            match moving.get_mut(player) {
                None => return Ok(()),
                Some(step) => {
                    step.remaining -= delta;
                    if step.remaining > 0.0 {
                        None
                    } else {
                        Some(step.direction)
                    }
                }
            }
        };

        if let Some(direction) = finished {
            self.ecs.write_storage::<Moving>().remove(player);
            self.complete_player_move(player, direction)?;
        }
        Ok(())
    }

    fn complete_player_move(
        &mut self,
        player: Entity,
        direction: ExitPosition,
    ) -> Result<(), GameError> {
        let room = find_room(&self.rooms, self.current_room_id)?;
        match try_move_player(&mut self.ecs, player, direction, room) {
            MoveOutcome::LeftRoom(exit) => self.enter_room(exit.position.opposite(), exit.room_id),
            MoveOutcome::Bumped => {
                warn!(?direction, "player bumped into something");
                self.state = GameState::EnemyTurn;
                Ok(())
            }
            MoveOutcome::Stepped { coin } => {
                if coin.is_some() {
                    self.collect_coins()?;
                }
                self.state = GameState::EnemyTurn;
                Ok(())
            }
        }
    }

    fn collect_coins(&mut self) -> Result<(), GameError> {
        let mut collect = CoinCollectionSystem::default();
        collect.run_now(&self.ecs);
        self.ecs.maintain();

        for (x, y) in collect.collected {
            self.update_room_entity(EntityType::Coin, x, y)?;
        }
        if let Some(wealth) = self.wealth() {
            self.hud.update_wealth(wealth);
        }
        Ok(())
    }

    fn check_for_enemies(&self) -> Result<bool, GameError> {
        Ok(find_room(&self.rooms, self.current_room_id)?.has_active_threats())
    }

    fn enemy_turn(&mut self) {
        let player = match self.player {
            Some(player) => player,
            None => return,
        };
        let mut threats = ThreatTurnSystem::new(self.enemies.clone(), player);
        threats.run_now(&self.ecs);
        self.ecs.maintain();
        debug!(threats = self.enemies.len(), "enemy turn");

        if let Some(kind) = threats.caught_by {
            info!(kind = kind.name(), "player caught");
            self.destroy_player();
            self.hud.win_text = format!("You were caught by a {}!", kind.name());
            self.start_end_game();
        }
    }

    fn start_end_game(&mut self) {
        self.state = GameState::None;
        self.input.disable();
        self.end_game = Some(EndGameTimer {
            remaining: self.config.end_game_delay,
        });
    }

    /// Counts down the end message. Returns true once the session was reset.
    fn advance_end_game(&mut self, delta: f32) -> Result<bool, GameError> {
        let timer = match self.end_game.as_mut() {
            Some(timer) => timer,
            None => return Ok(false),
        };
        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            return Ok(false);
        }

        self.end_game = None;
        self.hud.win_text.clear();
        self.room_manager.clear_room(&mut self.ecs);
        self.reset_scene()?;
        Ok(true)
    }

    fn reset_scene(&mut self) -> Result<(), GameError> {
        info!("resetting to the initial scene");
        self.destroy_player();
        self.ecs = World::new();
        register_components(&mut self.ecs);
        self.room_manager = RoomManager::default();
        self.hud.clear();
        self.init()
    }

    fn spawn_player(&mut self, x: f32, y: f32, wealth: i32) {
        let player = self
            .ecs
            .create_entity()
            .with(Position { x, y })
            .with(Player { wealth })
            .with(renderable('@', RGB::named(rltk::YELLOW), 0))
            .build();
        self.player = Some(player);
    }

    fn destroy_player(&mut self) {
        if let Some(player) = self.player.take() {
            self.ecs.delete_entity(player).expect("Delete failed");
            self.ecs.maintain();
        }
    }
}

fn find_room(rooms: &[Room], room_id: i32) -> Result<&Room, GameError> {
    rooms
        .iter()
        .find(|r| r.room_id == room_id)
        .ok_or(GameError::RoomNotFound(room_id))
}

fn find_room_mut(rooms: &mut [Room], room_id: i32) -> Result<&mut Room, GameError> {
    rooms
        .iter_mut()
        .find(|r| r.room_id == room_id)
        .ok_or(GameError::RoomNotFound(room_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Exit, RoomEntity};

    fn link(room: &mut Room, position: ExitPosition, room_id: i32) {
        room.exits.push(Exit { position, room_id });
    }

    /// Rooms 0 - 1 - 2 in a row from west to east, room 2 being the exit.
    fn corridor() -> Maze {
        let mut first = Room::new(0);
        link(&mut first, ExitPosition::East, 1);
        let mut middle = Room::new(1);
        link(&mut middle, ExitPosition::West, 0);
        link(&mut middle, ExitPosition::East, 2);
        let mut last = Room::new(2);
        link(&mut last, ExitPosition::West, 1);
        Maze {
            rooms: vec![first, middle, last],
            exit_room_id: 2,
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            move_duration: 0.0,
            ..GameConfig::default()
        }
    }

    fn started(maze: Maze, config: GameConfig) -> GameManager {
        let mut manager = GameManager::with_maze(config, maze).unwrap();
        manager.init().unwrap();
        manager
    }

    fn east() -> InputSnapshot {
        InputSnapshot {
            east: true,
            ..InputSnapshot::default()
        }
    }

    fn west() -> InputSnapshot {
        InputSnapshot {
            west: true,
            ..InputSnapshot::default()
        }
    }

    /// One full turn: the action tick, then the tick that resolves it.
    fn take_turn(manager: &mut GameManager, input: InputSnapshot) {
        manager.tick(0.1, &input).unwrap();
        manager.tick(0.1, &InputSnapshot::default()).unwrap();
    }

    #[test]
    fn init_loads_the_first_room() {
        let manager = started(corridor(), config());
        assert_eq!(manager.state(), GameState::PlayerTurn);
        assert_eq!(manager.current_room_id(), 0);
        assert_eq!(manager.player_position(), Some((0.5, 0.5)));
        assert_eq!(manager.exit_room_id(), 2);
        assert_eq!(manager.wealth(), Some(0));
        assert!(manager.is_input_enabled());
        assert_eq!(manager.hud.room_text, "Room: 1");
        assert_eq!(manager.hud.wealth_text, "Wealth: 0");
    }

    #[test]
    fn every_generated_room_loads() {
        let config = GameConfig {
            seed: Some(99),
            room_count: 6,
            ..GameConfig::default()
        };
        let mut manager = GameManager::new(config).unwrap();
        manager.init().unwrap();

        let ids: Vec<i32> = manager.rooms().iter().map(|r| r.room_id).collect();
        for id in ids {
            manager.load_room(id).unwrap();
            assert_eq!(manager.current_room_id(), id);
            assert_eq!(manager.state(), GameState::PlayerTurn);
            assert_eq!(manager.hud.room_text, format!("Room: {}", id + 1));
        }
    }

    #[test]
    fn unknown_room_is_an_error() {
        let mut manager = started(corridor(), config());
        assert!(matches!(
            manager.load_room(42),
            Err(GameError::RoomNotFound(42))
        ));
        assert_eq!(manager.current_room_id(), 0);
    }

    #[test]
    fn drop_coin_can_go_into_debt() {
        let mut manager = started(corridor(), config());
        manager.drop_coin(0.5, 0.5).unwrap();

        assert_eq!(manager.wealth(), Some(-1));
        assert_eq!(manager.hud.wealth_text, "Wealth: -1");
        assert_eq!(manager.state(), GameState::EnemyTurn);
        let room = &manager.rooms()[0];
        assert_eq!(room.entities.len(), 1);
        assert_eq!(room.entities[0].kind, EntityType::Coin);
        assert!(room.entities[0].active);
        assert_eq!(manager.ecs.read_storage::<Coin>().join().count(), 1);
    }

    #[test]
    fn drop_coin_takes_exactly_one() {
        let config = GameConfig {
            starting_wealth: 5,
            ..config()
        };
        let mut manager = started(corridor(), config);
        manager.drop_coin(0.5, 0.5).unwrap();
        assert_eq!(manager.wealth(), Some(4));
        assert_eq!(manager.state(), GameState::EnemyTurn);
    }

    #[test]
    fn enemy_turn_hands_back_without_enemies() {
        let mut manager = started(corridor(), config());
        manager.drop_coin(0.5, 0.5).unwrap();
        assert!(manager.enemies().is_empty());

        manager.tick(0.1, &InputSnapshot::default()).unwrap();
        assert_eq!(manager.state(), GameState::PlayerTurn);
        assert!(manager.is_input_enabled());
    }

    #[test]
    fn drop_key_drops_where_the_player_stands() {
        let mut manager = started(corridor(), config());
        let input = InputSnapshot {
            drop: true,
            ..InputSnapshot::default()
        };
        manager.tick(0.1, &input).unwrap();

        assert_eq!(manager.state(), GameState::EnemyTurn);
        assert_eq!(manager.rooms()[0].entities[0].position, (0.5, 0.5));
    }

    #[test]
    fn north_wins_over_drop() {
        let mut manager = started(corridor(), config());
        let input = InputSnapshot {
            north: true,
            drop: true,
            ..InputSnapshot::default()
        };
        manager.tick(0.1, &input).unwrap();
        assert_eq!(manager.state(), GameState::TurnInProgress);
        assert!(manager.is_player_moving());
        assert_eq!(manager.wealth(), Some(0));

        manager.tick(0.1, &InputSnapshot::default()).unwrap();
        assert_eq!(manager.player_position(), Some((0.5, 1.5)));
        assert_eq!(manager.state(), GameState::PlayerTurn);
    }

    #[test]
    fn spawn_point_follows_the_entry_side() {
        let cases = [
            (ExitPosition::North, (0.5, 4.5)),
            (ExitPosition::East, (8.5, 0.5)),
            (ExitPosition::South, (0.5, -3.5)),
            (ExitPosition::West, (-7.5, 0.5)),
        ];
        for (side, expected) in cases.iter() {
            let mut manager = started(corridor(), config());
            manager.enter_room(*side, 1).unwrap();
            assert_eq!(manager.player_position(), Some(*expected));
            assert_eq!(manager.current_room_id(), 1);
            assert_eq!(manager.state(), GameState::PlayerTurn);
            assert!(manager.is_input_enabled());
        }
    }

    #[test]
    fn wealth_survives_room_changes() {
        let config = GameConfig {
            starting_wealth: 3,
            ..config()
        };
        let mut manager = started(corridor(), config);
        let before = manager.player();
        manager.enter_room(ExitPosition::West, 1).unwrap();

        assert_ne!(manager.player(), before);
        assert_eq!(manager.wealth(), Some(3));
        assert_eq!(manager.hud.wealth_text, "Wealth: 3");
        assert_eq!(manager.hud.room_text, "Room: 2");
    }

    #[test]
    fn entering_the_exit_room_wins() {
        let config = GameConfig {
            starting_wealth: 7,
            ..config()
        };
        let mut manager = started(corridor(), config);
        manager.enter_room(ExitPosition::North, 2).unwrap();

        assert_eq!(manager.player(), None);
        assert_eq!(manager.state(), GameState::None);
        assert!(manager.is_game_over());
        assert_eq!(
            manager.hud.win_text,
            "You found the exit and acquired 7 Wealth!"
        );
    }

    #[test]
    fn walking_east_out_of_room_one_finishes_the_game() {
        let config = GameConfig {
            starting_wealth: 7,
            ..config()
        };
        let mut manager = started(corridor(), config);
        manager.enter_room(ExitPosition::East, 1).unwrap();
        assert_eq!(manager.player_position(), Some((8.5, 0.5)));

        take_turn(&mut manager, east());

        assert!(manager.hud.win_text.contains("7 Wealth"));
        assert_eq!(manager.player(), None);
        assert_eq!(manager.state(), GameState::None);
        assert!(!manager.is_input_enabled());
    }

    #[test]
    fn leaving_west_arrives_on_the_east_wall() {
        let mut manager = started(corridor(), config());
        manager.enter_room(ExitPosition::West, 1).unwrap();

        take_turn(&mut manager, west());

        assert_eq!(manager.current_room_id(), 0);
        assert_eq!(manager.player_position(), Some((8.5, 0.5)));
        assert_eq!(manager.state(), GameState::PlayerTurn);
    }

    #[test]
    fn session_resets_after_the_delay() {
        let mut manager = started(corridor(), config());
        manager.enter_room(ExitPosition::North, 2).unwrap();

        manager.tick(1.0, &InputSnapshot::default()).unwrap();
        manager.tick(1.0, &InputSnapshot::default()).unwrap();
        assert!(manager.is_game_over());
        assert_eq!(manager.state(), GameState::None);

        manager.tick(1.0, &InputSnapshot::default()).unwrap();
        assert!(!manager.is_game_over());
        assert_eq!(manager.hud.win_text, "");
        assert_eq!(manager.current_room_id(), 0);
        assert_eq!(manager.state(), GameState::PlayerTurn);
        assert_eq!(manager.player_position(), Some((0.5, 0.5)));
        assert_eq!(manager.wealth(), Some(0));
    }

    #[test]
    fn input_is_locked_while_moving() {
        let config = GameConfig {
            move_duration: 1.0,
            ..GameConfig::default()
        };
        let mut manager = started(corridor(), config);

        manager.tick(0.5, &east()).unwrap();
        assert_eq!(manager.state(), GameState::TurnInProgress);
        assert!(!manager.is_input_enabled());

        manager.tick(0.5, &west()).unwrap();
        assert_eq!(manager.state(), GameState::TurnInProgress);
        assert_eq!(manager.player_position(), Some((0.5, 0.5)));

        manager.tick(0.5, &west()).unwrap();
        assert_eq!(manager.player_position(), Some((1.5, 0.5)));
        assert_eq!(manager.state(), GameState::PlayerTurn);
        assert!(manager.is_input_enabled());
    }

    #[test]
    fn escape_ends_the_game() {
        let mut manager = started(corridor(), config());
        let input = InputSnapshot {
            escape: true,
            ..InputSnapshot::default()
        };
        manager.tick(0.1, &input).unwrap();

        assert_eq!(manager.state(), GameState::None);
        assert_eq!(manager.player(), None);
        assert_eq!(manager.hud.win_text, "You escaped");
        assert!(manager.is_game_over());
    }

    #[test]
    fn stepping_on_a_coin_collects_it() {
        let mut maze = corridor();
        maze.rooms[0]
            .entities
            .push(RoomEntity::new(EntityType::Coin, 1.5, 0.5));
        let mut manager = started(maze, config());

        take_turn(&mut manager, east());

        assert_eq!(manager.wealth(), Some(1));
        assert_eq!(manager.hud.wealth_text, "Wealth: 1");
        assert!(!manager.rooms()[0].entities[0].active);
        assert_eq!(manager.ecs.read_storage::<Coin>().join().count(), 0);
    }

    #[test]
    fn collected_coins_stay_gone_after_returning() {
        let mut maze = corridor();
        maze.rooms[0]
            .entities
            .push(RoomEntity::new(EntityType::Coin, 1.5, 0.5));
        let mut manager = started(maze, config());
        take_turn(&mut manager, east());

        manager.enter_room(ExitPosition::West, 1).unwrap();
        manager.enter_room(ExitPosition::East, 0).unwrap();

        assert_eq!(manager.rooms()[0].entities.len(), 1);
        assert_eq!(manager.ecs.read_storage::<Coin>().join().count(), 0);
        assert_eq!(manager.wealth(), Some(1));
    }

    #[test]
    fn missing_entity_is_an_error() {
        let mut manager = started(corridor(), config());
        let result = manager.update_room_entity(EntityType::Coin, 3.5, 3.5);
        assert!(matches!(
            result,
            Err(GameError::EntityNotFound { room_id: 0, .. })
        ));
    }

    #[test]
    fn update_room_entity_matches_the_cell() {
        let mut maze = corridor();
        maze.rooms[0]
            .entities
            .push(RoomEntity::new(EntityType::Rock, -2.5, 2.5));
        let mut manager = started(maze, config());

        manager.update_room_entity(EntityType::Rock, -2.2, 2.9).unwrap();
        assert!(!manager.rooms()[0].entities[0].active);
    }

    #[test]
    fn picking_up_a_coin_on_a_threat_spawn_cell_keeps_the_threat() {
        let mut maze = corridor();
        maze.rooms[0]
            .entities
            .push(RoomEntity::new(EntityType::Zombie, 3.5, 0.5));
        let mut manager = started(maze, config());
        let zombie = manager.enemies()[0];
        let player = manager.player().unwrap();
        {
            // The zombie has wandered off its spawn cell and the player
            // stands there.
            let mut positions = manager.ecs.write_storage::<Position>();
            *positions.get_mut(zombie).unwrap() = Position { x: -6.5, y: -3.5 };
            *positions.get_mut(player).unwrap() = Position { x: 3.5, y: 0.5 };
        }

        take_turn(&mut manager, InputSnapshot {
            drop: true,
            ..InputSnapshot::default()
        });
        take_turn(&mut manager, InputSnapshot {
            north: true,
            ..InputSnapshot::default()
        });
        take_turn(&mut manager, InputSnapshot {
            south: true,
            ..InputSnapshot::default()
        });

        assert_eq!(manager.player_position(), Some((3.5, 0.5)));
        assert_eq!(manager.wealth(), Some(0));
        let room = &manager.rooms()[0];
        let kinds: Vec<(EntityType, bool)> =
            room.entities.iter().map(|e| (e.kind, e.active)).collect();
        assert_eq!(
            kinds,
            vec![(EntityType::Zombie, true), (EntityType::Coin, false)]
        );
        assert!(room.has_active_threats());

        // One step per turn, including the turn after the pickup.
        let pos = *manager.ecs.read_storage::<Position>().get(zombie).unwrap();
        assert_eq!((pos.x, pos.y), (-3.5, -3.5));
        assert_eq!(manager.state(), GameState::PlayerTurn);

        manager.enter_room(ExitPosition::West, 1).unwrap();
        manager.enter_room(ExitPosition::East, 0).unwrap();
        assert_eq!(manager.ecs.read_storage::<Coin>().join().count(), 0);
        assert_eq!(manager.enemies().len(), 1);
        assert_eq!(manager.wealth(), Some(0));
    }

    #[test]
    fn bumping_a_wall_spends_the_turn() {
        let mut manager = started(corridor(), config());
        manager.enter_room(ExitPosition::North, 1).unwrap();

        take_turn(&mut manager, InputSnapshot {
            north: true,
            ..InputSnapshot::default()
        });

        assert_eq!(manager.current_room_id(), 1);
        assert_eq!(manager.player_position(), Some((0.5, 4.5)));
        assert_eq!(manager.state(), GameState::PlayerTurn);
    }

    #[test]
    fn threats_move_after_the_player() {
        let mut maze = corridor();
        maze.rooms[1]
            .entities
            .push(RoomEntity::new(EntityType::Skeleton, -3.5, 0.5));
        let mut manager = started(maze, config());
        manager.enter_room(ExitPosition::East, 1).unwrap();
        assert_eq!(manager.enemies().len(), 1);

        take_turn(&mut manager, west());

        let skeleton = manager.enemies()[0];
        let pos = *manager.ecs.read_storage::<Position>().get(skeleton).unwrap();
        assert_eq!((pos.x, pos.y), (-2.5, 0.5));
        assert_eq!(manager.state(), GameState::PlayerTurn);
    }

    #[test]
    fn caught_by_a_threat_loses() {
        let mut maze = corridor();
        maze.rooms[1]
            .entities
            .push(RoomEntity::new(EntityType::Zombie, 6.5, 0.5));
        let mut manager = started(maze, config());
        manager.enter_room(ExitPosition::East, 1).unwrap();

        take_turn(&mut manager, west());

        assert_eq!(manager.hud.win_text, "You were caught by a Zombie!");
        assert_eq!(manager.player(), None);
        assert_eq!(manager.state(), GameState::None);
        assert!(manager.is_game_over());
    }

    #[test]
    fn entering_a_room_replaces_the_enemy_list() {
        let mut maze = corridor();
        maze.rooms[1]
            .entities
            .push(RoomEntity::new(EntityType::Zombie, -3.5, -2.5));
        let mut manager = started(maze, config());
        manager.enter_room(ExitPosition::West, 1).unwrap();
        assert_eq!(manager.enemies().len(), 1);

        manager.enter_room(ExitPosition::East, 0).unwrap();
        assert!(manager.enemies().is_empty());
    }

    #[test]
    fn shutdown_stops_the_session() {
        let mut manager = started(corridor(), config());
        manager.shutdown();
        assert_eq!(manager.state(), GameState::None);
        assert_eq!(manager.player(), None);
        assert!(!manager.is_input_enabled());

        manager.tick(0.1, &east()).unwrap();
        assert_eq!(manager.state(), GameState::None);
    }
}
