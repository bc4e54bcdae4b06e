use crate::maze::{cell_center, EntityType, ExitPosition, ROOM_BOUNDS};
use crate::{Obstacle, Position, Threat};
use specs::prelude::*;
use std::collections::HashSet;

/// Moves each listed threat one cell toward the player, in list order.
/// Stops at the first threat that reaches the player.
pub struct ThreatTurnSystem {
    pub order: Vec<Entity>,
    pub player: Entity,
    pub caught_by: Option<EntityType>,
}

impl ThreatTurnSystem {
    pub fn new(order: Vec<Entity>, player: Entity) -> ThreatTurnSystem {
        ThreatTurnSystem {
            order,
            player,
            caught_by: None,
        }
    }
}

type ThreatData<'a> = (
    Entities<'a>,
    ReadStorage<'a, Threat>,
    ReadStorage<'a, Obstacle>,
    WriteStorage<'a, Position>,
);

impl<'a> System<'a> for ThreatTurnSystem {
    type SystemData = ThreatData<'a>;

    fn run(&mut self, data: Self::SystemData) {
        let (entities, threats, obstacles, mut positions) = data;

        let target = match positions.get(self.player) {
            Some(pos) => pos.cell(),
            None => return,
        };
        let rocks: HashSet<(i32, i32)> = (&obstacles, &positions)
            .join()
            .map(|(_, pos)| pos.cell())
            .collect();
        let doors: Vec<(i32, i32)> = ExitPosition::ALL.iter().map(|s| s.door_cell()).collect();

        for &mover in self.order.iter() {
            if !entities.is_alive(mover) {
                continue;
            }
            let kind = match threats.get(mover) {
                Some(threat) => threat.kind,
                None => continue,
            };
            let from = match positions.get(mover) {
                Some(pos) => pos.cell(),
                None => continue,
            };
            let others: HashSet<(i32, i32)> = (&entities, &threats, &positions)
                .join()
                .filter(|(e, _, _)| *e != mover)
                .map(|(_, _, pos)| pos.cell())
                .collect();

            let step = next_step(from, target, |cell| {
                cell == target
                    || (ROOM_BOUNDS.contains(cell)
                        && !doors.contains(&cell)
                        && !rocks.contains(&cell)
                        && !others.contains(&cell))
            });

            if let Some(cell) = step {
                if let Some(pos) = positions.get_mut(mover) {
                    let (x, y) = cell_center(cell);
                    pos.x = x;
                    pos.y = y;
                }
                if cell == target {
                    self.caught_by = Some(kind);
                    return;
                }
            }
        }
    }
}

/// One orthogonal step from `from` toward `to`, trying the longer axis
/// first. `None` when both candidate cells are blocked or `from == to`.
pub fn next_step<F>(from: (i32, i32), to: (i32, i32), is_free: F) -> Option<(i32, i32)>
where
    F: Fn((i32, i32)) -> bool,
{
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let horizontal = (from.0 + dx.signum(), from.1);
    let vertical = (from.0, from.1 + dy.signum());

    let mut options = Vec::with_capacity(2);
    if dx.abs() >= dy.abs() {
        if dx != 0 {
            options.push(horizontal);
        }
        if dy != 0 {
            options.push(vertical);
        }
    } else {
        options.push(vertical);
        if dx != 0 {
            options.push(horizontal);
        }
    }

    options.into_iter().find(|cell| is_free(*cell))
}
