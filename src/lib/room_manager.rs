use crate::maze::{EntityType, Room, RoomEntity};
use crate::{Coin, InRoom, Obstacle, Position, Renderable, Threat};
use rltk::RGB;
use specs::prelude::*;

/// Materializes rooms into the play area.
#[derive(Default)]
pub struct RoomManager {
    displayed: Option<i32>,
}

impl RoomManager {
    /// Spawns every active entity of `room` and returns the threats in room
    /// order.
    pub fn interpret_room(&mut self, room: &Room, ecs: &mut World) -> Vec<Entity> {
        self.clear_room(ecs);

        let mut threats = Vec::new();
        for entity in room.entities.iter().filter(|e| e.active) {
            let spawned = spawn_entity(ecs, room.room_id, entity);
            if entity.kind.is_threat() {
                threats.push(spawned);
            }
        }
        self.displayed = Some(room.room_id);
        tracing::debug!(room_id = room.room_id, threats = threats.len(), "room interpreted");
        threats
    }

    /// Records a coin in `room` and, if it is displayed, spawns it.
    pub fn add_coin(&mut self, room: &mut Room, x: f32, y: f32, ecs: &mut World) {
        let coin = RoomEntity::new(EntityType::Coin, x, y);
        if self.displayed == Some(room.room_id) {
            spawn_entity(ecs, room.room_id, &coin);
        }
        room.entities.push(coin);
    }

    pub fn clear_room(&mut self, ecs: &mut World) {
        let doomed: Vec<Entity> = {
            let entities = ecs.entities();
            let in_room = ecs.read_storage::<InRoom>();
            (&entities, &in_room).join().map(|(e, _)| e).collect()
        };
        for entity in doomed {
            ecs.delete_entity(entity).expect("Unable to delete");
        }
        ecs.maintain();
        self.displayed = None;
    }
}

fn spawn_entity(ecs: &mut World, room_id: i32, entity: &RoomEntity) -> Entity {
    let (x, y) = entity.position;
    let builder = ecs
        .create_entity()
        .with(Position { x, y })
        .with(InRoom { room_id });

    match entity.kind {
        EntityType::Coin => builder
            .with(Coin {})
            .with(renderable('$', RGB::named(rltk::GOLD), 2)),
        EntityType::Rock => builder
            .with(Obstacle {})
            .with(renderable('o', RGB::named(rltk::GREY), 2)),
        EntityType::Zombie => builder
            .with(Threat { kind: entity.kind })
            .with(renderable('z', RGB::named(rltk::GREEN), 1)),
        EntityType::Skeleton => builder
            .with(Threat { kind: entity.kind })
            .with(renderable('s', RGB::named(rltk::WHITE), 1)),
    }
    .build()
}

pub fn renderable(glyph: char, fg: RGB, render_order: i32) -> Renderable {
    Renderable {
        glyph: rltk::to_cp437(glyph),
        fg,
        bg: RGB::named(rltk::BLACK),
        render_order,
    }
}
