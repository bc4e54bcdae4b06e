use crate::{Player, Position, WantsToCollectCoin};
use specs::prelude::*;

/// Moves collected coins out of play and into the collector's wealth.
/// `collected` lists where each coin lay, for the room model to catch up.
#[derive(Default)]
pub struct CoinCollectionSystem {
    pub collected: Vec<(f32, f32)>,
}

type CollectionData<'a> = (
    Entities<'a>,
    WriteStorage<'a, WantsToCollectCoin>,
    WriteStorage<'a, Player>,
    ReadStorage<'a, Position>,
);

impl<'a> System<'a> for CoinCollectionSystem {
    type SystemData = CollectionData<'a>;

    fn run(&mut self, data: Self::SystemData) {
        let (entities, mut wants_collect, mut players, positions) = data;

        for pickup in wants_collect.join() {
            if !entities.is_alive(pickup.coin) {
                continue;
            }
            if let Some(pos) = positions.get(pickup.coin) {
                self.collected.push((pos.x, pos.y));
            }
            if let Some(player) = players.get_mut(pickup.collected_by) {
                player.wealth += 1;
                tracing::debug!(wealth = player.wealth, "coin collected");
            }
            entities.delete(pickup.coin).expect("Delete failed");
        }

        wants_collect.clear();
    }
}
