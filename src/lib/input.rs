use rltk::VirtualKeyCode;

/// Trigger flags sampled once per tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
    pub drop: bool,
    pub escape: bool,
}

impl InputSnapshot {
    pub fn from_key(key: Option<VirtualKeyCode>) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        match key {
            None => {}
            Some(key) => match key {
                VirtualKeyCode::Up
                | VirtualKeyCode::W
                | VirtualKeyCode::K
                | VirtualKeyCode::Numpad8 => input.north = true,
                VirtualKeyCode::Right
                | VirtualKeyCode::D
                | VirtualKeyCode::L
                | VirtualKeyCode::Numpad6 => input.east = true,
                VirtualKeyCode::Down
                | VirtualKeyCode::S
                | VirtualKeyCode::J
                | VirtualKeyCode::Numpad2 => input.south = true,
                VirtualKeyCode::Left
                | VirtualKeyCode::A
                | VirtualKeyCode::H
                | VirtualKeyCode::Numpad4 => input.west = true,
                VirtualKeyCode::Space | VirtualKeyCode::G => input.drop = true,
                VirtualKeyCode::Escape | VirtualKeyCode::Q => input.escape = true,
                _ => {}
            },
        }
        input
    }
}

/// The switch that decides whether input is read at all.
#[derive(Debug, Default)]
pub struct PlayerInput {
    enabled: bool,
}

impl PlayerInput {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
