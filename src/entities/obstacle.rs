use rand::Rng;

use super::{Bounds, Entity, EntityKind, Fate};
use crate::consts::{
    HEIGHT, OBSTACLE_HEIGHT, OBSTACLE_MIN_SPAWN_Y, OBSTACLE_SPEED, OBSTACLE_WIDTH, WIDTH,
};

/// An asteroid drifting toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Top-left corner of the bounding box
    pub x: i32,
    pub y: i32,
}

impl Obstacle {
    /// Creates an obstacle centred on the given point
    pub fn new(center_x: i32, center_y: i32) -> Self {
        let bounds = Bounds::centered_at(center_x, center_y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        Self {
            x: bounds.x,
            y: bounds.y,
        }
    }

    /// Spawns on the right edge at a random height
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let center_y = rng.random_range(OBSTACLE_MIN_SPAWN_Y..=HEIGHT - OBSTACLE_HEIGHT);
        Self::new(WIDTH, center_y)
    }

    /// True once the obstacle has reached the player's edge of the screen
    pub fn has_breached(&self) -> bool {
        self.x <= 0
    }
}

impl Entity for Obstacle {
    fn advance(&mut self) -> Fate {
        self.x -= OBSTACLE_SPEED;
        if self.has_breached() {
            Fate::Breached
        } else {
            Fate::Alive
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }

    fn sprite_lines(&self) -> &'static [&'static str] {
        &[" .-~-. ", "( o  O)", " `-~-' "]
    }

    fn glyph(&self) -> char {
        '@'
    }
}
