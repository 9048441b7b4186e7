use super::{Bounds, Entity, EntityKind, Fate};
use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH, WIDTH};

/// A slice of toast flying rightward
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Top-left corner of the bounding box
    pub x: i32,
    pub y: i32,
}

impl Projectile {
    /// Creates a projectile centred on the given point
    pub fn new(center_x: i32, center_y: i32) -> Self {
        let bounds =
            Bounds::centered_at(center_x, center_y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        Self {
            x: bounds.x,
            y: bounds.y,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.x > WIDTH
    }
}

impl Entity for Projectile {
    fn advance(&mut self) -> Fate {
        self.x += PROJECTILE_SPEED;
        if self.is_out_of_bounds() {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn sprite_lines(&self) -> &'static [&'static str] {
        &["[##]"]
    }

    fn glyph(&self) -> char {
        '#'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_new_is_centered() {
        let projectile = Projectile::new(32, 300);
        assert_eq!(projectile.x, 20);
        assert_eq!(projectile.y, 292);
        assert_eq!(projectile.bounds().center(), (32, 300));
    }

    #[test]
    fn test_projectile_moves_right() {
        let mut projectile = Projectile::new(100, 100);
        let start_x = projectile.x;
        assert_eq!(projectile.advance(), Fate::Alive);
        assert_eq!(projectile.x, start_x + 12);
    }

    #[test]
    fn test_projectile_expires_past_right_edge() {
        let mut projectile = Projectile { x: 790, y: 100 };
        assert_eq!(projectile.advance(), Fate::Expired);

        // Exactly on the edge is still on screen
        let mut projectile = Projectile { x: 788, y: 100 };
        assert_eq!(projectile.advance(), Fate::Alive);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projectile_only_moves_horizontally(
                initial_x in -50i32..800,
                initial_y in 0i32..600
            ) {
                let mut projectile = Projectile { x: initial_x, y: initial_y };
                let fate = projectile.advance();
                prop_assert_eq!(projectile.y, initial_y);
                prop_assert_eq!(projectile.x, initial_x + PROJECTILE_SPEED);
                prop_assert_eq!(fate == Fate::Expired, projectile.x > WIDTH);
            }
        }
    }
}
