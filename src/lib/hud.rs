/// The three text surfaces shown over the play area. Each one is
/// overwritten whenever the value behind it changes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Hud {
    pub wealth_text: String,
    pub room_text: String,
    pub win_text: String,
}

impl Hud {
    pub fn update_wealth(&mut self, wealth: i32) {
        self.wealth_text = format!("Wealth: {}", wealth);
    }

    /// Room ids are 0-based; players see them 1-based.
    pub fn update_room(&mut self, room_id: i32) {
        self.room_text = format!("Room: {}", room_id + 1);
    }

    pub fn clear(&mut self) {
        *self = Hud::default();
    }
}
