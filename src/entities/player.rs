use super::projectile::Projectile;
use super::{Bounds, Entity, EntityKind, Fate};
use crate::consts::{HEIGHT, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, STARTING_AMMO};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub x: i32,
    pub y: i32,
    /// Maximum number of projectiles allowed on screen at once
    pub ammo_cap: u32,
    /// Direction held this frame, consumed by `advance`
    pub heading: Option<Direction>,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ammo_cap: STARTING_AMMO,
            heading: None,
        }
    }

    /// Player at the start of a round: left edge, vertically centred
    pub fn spawn() -> Self {
        Self::new(0, (HEIGHT - PLAYER_HEIGHT) / 2)
    }

    /// Lowest y the top of the box may reach
    pub fn max_y() -> i32 {
        HEIGHT - PLAYER_HEIGHT
    }

    pub fn steer(&mut self, heading: Option<Direction>) {
        self.heading = heading;
    }

    /// Shift one step vertically, clamped to the playfield
    pub fn move_toward(&mut self, direction: Direction) {
        let step = match direction {
            Direction::Up => -PLAYER_SPEED,
            Direction::Down => PLAYER_SPEED,
        };
        self.y = (self.y + step).clamp(0, Self::max_y());
    }

    /// Toast remaining before the cap is hit
    pub fn remaining_ammo(&self, live: usize) -> u32 {
        self.ammo_cap.saturating_sub(live as u32)
    }

    /// Launches a projectile from the centre of the player if the live count
    /// is under the ammo cap. Returns whether a projectile was created.
    pub fn fire(&self, live: &mut Vec<Projectile>) -> bool {
        if live.len() as u32 >= self.ammo_cap {
            return false;
        }

        let (center_x, center_y) = self.bounds().center();
        live.push(Projectile::new(center_x, center_y));
        true
    }
}

impl Entity for Player {
    fn advance(&mut self) -> Fate {
        if let Some(direction) = self.heading.take() {
            self.move_toward(direction);
        }
        Fate::Alive
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn sprite_lines(&self) -> &'static [&'static str] {
        &[" _______  ", "|=|   |=|=", "|_|___|_| "]
    }

    fn glyph(&self) -> char {
        '='
    }
}
