/// Inclusive rectangle of grid cells. `y` grows to the north, so `top` is the
/// largest row.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Rect {
    pub top: i32,
    pub lft: i32,
    pub bot: i32,
    pub rht: i32,
}

impl Rect {
    pub fn new(lft: i32, bot: i32, wid: i32, hgt: i32) -> Rect {
        Rect {
            top: bot + hgt,
            lft,
            bot,
            rht: lft + wid,
        }
    }

    pub fn contains(&self, cell: (i32, i32)) -> bool {
        self.lft <= cell.0 && cell.0 <= self.rht && self.bot <= cell.1 && cell.1 <= self.top
    }

    pub fn height(&self) -> i32 {
        self.top - self.bot + 1
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.lft + self.rht) / 2, (self.top + self.bot) / 2)
    }
}
