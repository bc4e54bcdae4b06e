use crate::maze::{ExitPosition, ROOM_BOUNDS};
use crate::*;

use rltk::{Rltk, RGB};
use specs::prelude::*;

const ORIGIN_X: i32 = 30;
const ORIGIN_Y: i32 = 8;

/// Host adapter: feeds `rltk` frames into the [`GameManager`] and draws the
/// result.
pub struct State {
    pub manager: GameManager,
}

impl State {
    fn screen(cell: (i32, i32)) -> (i32, i32) {
        (
            ORIGIN_X + cell.0 - (ROOM_BOUNDS.lft - 1),
            ORIGIN_Y + (ROOM_BOUNDS.top + 1) - cell.1,
        )
    }

    fn draw_room(&self, ctx: &mut Rltk) {
        let room = self
            .manager
            .rooms()
            .iter()
            .find(|r| r.room_id == self.manager.current_room_id());
        let wall = RGB::named(rltk::SLATE_GRAY);
        let floor = RGB::named(rltk::DARK_GRAY);
        let black = RGB::named(rltk::BLACK);

        for cx in ROOM_BOUNDS.lft - 1..=ROOM_BOUNDS.rht + 1 {
            for cy in ROOM_BOUNDS.bot - 1..=ROOM_BOUNDS.top + 1 {
                let (x, y) = State::screen((cx, cy));
                if ROOM_BOUNDS.contains((cx, cy)) {
                    ctx.set(x, y, floor, black, rltk::to_cp437('.'));
                } else {
                    ctx.set(x, y, wall, black, rltk::to_cp437('#'));
                }
            }
        }

        if let Some(room) = room {
            for side in ExitPosition::ALL.iter() {
                if let Some(exit) = room.exit_at(*side) {
                    let (door_x, door_y) = side.door_cell();
                    let (dx, dy) = side.delta();
                    let (x, y) = State::screen((door_x + dx, door_y + dy));
                    // The door into the exit room stands out.
                    let (fg, glyph) = if exit.room_id == self.manager.exit_room_id() {
                        (RGB::named(rltk::GOLD), '>')
                    } else {
                        (RGB::named(rltk::CYAN), '+')
                    };
                    ctx.set(x, y, fg, black, rltk::to_cp437(glyph));
                }
            }
        }
    }

    fn draw_entities(&self, ctx: &mut Rltk) {
        let positions = self.manager.ecs.read_storage::<Position>();
        let renderables = self.manager.ecs.read_storage::<Renderable>();

        let mut data = (&positions, &renderables).join().collect::<Vec<_>>();
        data.sort_by(|&a, &b| b.1.render_order.cmp(&a.1.render_order));
        for (pos, render) in data.iter() {
            let (x, y) = State::screen(pos.cell());
            ctx.set(x, y, render.fg, render.bg, render.glyph);
        }
    }

    fn draw_hud(&self, ctx: &mut Rltk) {
        let hud = &self.manager.hud;
        let black = RGB::named(rltk::BLACK);
        ctx.print_color(2, 1, RGB::named(rltk::GOLD), black, &hud.wealth_text);
        ctx.print_color(2, 2, RGB::named(rltk::WHITE), black, &hud.room_text);
        if !hud.win_text.is_empty() {
            let y = ORIGIN_Y + ROOM_BOUNDS.height() + 4;
            ctx.print_color(2, y, RGB::named(rltk::YELLOW), black, &hud.win_text);
        }
        ctx.print(2, 48, "arrows/WASD/hjkl: move   space/g: drop coin   esc/q: escape");
    }
}

impl rltk::GameState for State {
    fn tick(&mut self, ctx: &mut Rltk) {
        ctx.cls();

        let input = InputSnapshot::from_key(ctx.key);
        let delta = ctx.frame_time_ms / 1000.0;
        if let Err(err) = self.manager.tick(delta, &input) {
            tracing::error!(%err, "tick failed, stopping the session");
            self.manager.shutdown();
            self.manager.hud.win_text = format!("Fatal: {}", err);
        }

        self.draw_room(ctx);
        self.draw_entities(ctx);
        self.draw_hud(ctx);
    }
}
