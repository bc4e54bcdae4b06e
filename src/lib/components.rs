use crate::maze::{cell_of, EntityType, ExitPosition};
use rltk::RGB;
use specs::prelude::*;
use specs_derive::Component;

#[derive(Component, Debug, PartialEq, Copy, Clone)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.x, self.y)
    }
}

#[derive(Component)]
pub struct Renderable {
    pub glyph: rltk::FontCharType,
    pub fg: RGB,
    pub bg: RGB,
    pub render_order: i32,
}

#[derive(Component, Debug)]
pub struct Player {
    pub wealth: i32,
}

/// Present while the player is animating a step; doubles as the moving flag.
#[derive(Component, Debug)]
pub struct Moving {
    pub direction: ExitPosition,
    pub remaining: f32,
}

#[derive(Component, Debug)]
pub struct Threat {
    pub kind: EntityType,
}

#[derive(Component, Debug)]
pub struct Coin {}

#[derive(Component, Debug)]
pub struct Obstacle {}

/// Marks everything the room presenter spawned for the displayed room.
#[derive(Component, Debug)]
pub struct InRoom {
    pub room_id: i32,
}

#[derive(Component, Debug)]
pub struct WantsToCollectCoin {
    pub collected_by: Entity,
    pub coin: Entity,
}

pub fn register_components(ecs: &mut World) {
    ecs.register::<Position>();
    ecs.register::<Renderable>();
    ecs.register::<Player>();
    ecs.register::<Moving>();
    ecs.register::<Threat>();
    ecs.register::<Coin>();
    ecs.register::<Obstacle>();
    ecs.register::<InRoom>();
    ecs.register::<WantsToCollectCoin>();
}
