mod obstacle;
mod player;
mod projectile;

// Re-export all public types
pub use obstacle::Obstacle;
pub use player::{Direction, Player};
pub use projectile::Projectile;

/// Axis-aligned bounding box in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centred on `(center_x, center_y)`
    pub fn centered_at(center_x: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self::new(center_x - width / 2, center_y - height / 2, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// What happened to an entity after it advanced one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Still on the playfield
    Alive,
    /// Left the playfield harmlessly and should be dropped
    Expired,
    /// Slipped past the player's side of the screen; the round is lost
    Breached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Projectile,
    Obstacle,
}

/// Shared capability of everything drawn on the playfield
pub trait Entity {
    /// Move one frame forward
    fn advance(&mut self) -> Fate;

    fn bounds(&self) -> Bounds;

    fn kind(&self) -> EntityKind;

    /// Text art drawn inside the entity's box, top to bottom
    fn sprite_lines(&self) -> &'static [&'static str];

    /// Fill character used when the box is too small for the full art
    fn glyph(&self) -> char;
}
