//! One round of play
//!
//! A round runs from a fresh playfield until the first loss. `Round::tick`
//! advances it by exactly one frame; everything it does is driven by the
//! `TickInput` and the injected RNG, so tests can step it deterministically.

use rand::Rng;

use crate::consts::{
    AMMO_BONUS_KILLS, BASE_SPAWN_KILL_LIMIT, SPAWN_INTERVAL_FRAMES, SPAWN_RAMP_KILLS,
};
use crate::entities::{Direction, Entity, Fate, Obstacle, Player, Projectile};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction held this frame
    pub direction: Option<Direction>,
    /// Fire one projectile
    pub fire: bool,
    /// Confirm a restart from the game over screen
    pub confirm: bool,
    /// Leave the game
    pub quit: bool,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// An obstacle made it past the left edge
    Breach,
    /// An obstacle touched the player
    Collision,
}

/// What happened during one frame, for audio cues and logging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fired: bool,
    /// Obstacles destroyed by projectiles this frame
    pub hits: u32,
    pub spawned: usize,
    /// Set on the frame the round is lost and on every frame after
    pub loss: Option<LossCause>,
}

/// Number of obstacles in a wave for the given kill count.
///
/// The single base obstacle is dropped once kills reach the limit, leaving only
/// the ramp term. This keeps the difficulty curve flat across that boundary.
pub fn spawn_count(kills: u32) -> usize {
    let base = if kills < BASE_SPAWN_KILL_LIMIT { 1 } else { 0 };
    (base + kills / SPAWN_RAMP_KILLS) as usize
}

#[derive(Debug, Clone)]
pub struct Round {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub kills: u32,
    /// Frames elapsed in this round; waves spawn when it is a multiple of the interval
    pub frame: u64,
    /// Once set, never cleared for the rest of the round
    pub loss: Option<LossCause>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            player: Player::spawn(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            kills: 0,
            frame: 0,
            loss: None,
        }
    }

    pub fn ammo_cap(&self) -> u32 {
        self.player.ammo_cap
    }

    pub fn remaining_ammo(&self) -> u32 {
        self.player.remaining_ammo(self.projectiles.len())
    }

    pub fn is_lost(&self) -> bool {
        self.loss.is_some()
    }

    /// Entities in draw order: player, then obstacles, then projectiles
    pub fn draw_list(&self) -> Vec<&dyn Entity> {
        let mut list: Vec<&dyn Entity> =
            Vec::with_capacity(1 + self.obstacles.len() + self.projectiles.len());
        list.push(&self.player);
        list.extend(self.obstacles.iter().map(|o| o as &dyn Entity));
        list.extend(self.projectiles.iter().map(|p| p as &dyn Entity));
        list
    }

    /// Advance the round by one frame
    pub fn tick<R: Rng + ?Sized>(&mut self, input: &TickInput, rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        if self.is_lost() {
            report.loss = self.loss;
            return report;
        }

        // Player movement and fire
        self.player.steer(input.direction);
        self.player.advance();
        if input.fire {
            report.fired = self.player.fire(&mut self.projectiles);
        }

        // Obstacle waves
        if self.frame % SPAWN_INTERVAL_FRAMES == 0 {
            let count = spawn_count(self.kills);
            for _ in 0..count {
                self.obstacles.push(Obstacle::spawn(rng));
            }
            report.spawned = count;
        }

        report.hits = self.resolve_hits();

        // Move everything else, dropping what left the screen
        self.projectiles.retain_mut(|p| p.advance() == Fate::Alive);

        let mut breached = false;
        self.obstacles.retain_mut(|o| match o.advance() {
            Fate::Alive => true,
            Fate::Breached => {
                breached = true;
                false
            }
            Fate::Expired => false,
        });

        if breached {
            self.loss = Some(LossCause::Breach);
        } else if self.player_collides() {
            self.loss = Some(LossCause::Collision);
        }

        self.frame += 1;
        report.loss = self.loss;
        report
    }

    /// Destroys every projectile/obstacle pair that overlaps and returns the
    /// number of obstacles destroyed. A frame with any hit scores one kill.
    fn resolve_hits(&mut self) -> u32 {
        let mut projectiles_to_remove = Vec::new();
        let mut obstacles_to_remove = Vec::new();

        for (p_idx, projectile) in self.projectiles.iter().enumerate() {
            let projectile_bounds = projectile.bounds();
            for (o_idx, obstacle) in self.obstacles.iter().enumerate() {
                if projectile_bounds.intersects(&obstacle.bounds()) {
                    projectiles_to_remove.push(p_idx);
                    obstacles_to_remove.push(o_idx);
                }
            }
        }

        // Remove in reverse order to avoid index issues
        projectiles_to_remove.sort_unstable();
        projectiles_to_remove.dedup();
        for idx in projectiles_to_remove.into_iter().rev() {
            self.projectiles.swap_remove(idx);
        }

        obstacles_to_remove.sort_unstable();
        obstacles_to_remove.dedup();
        let hits = obstacles_to_remove.len() as u32;
        for idx in obstacles_to_remove.into_iter().rev() {
            self.obstacles.swap_remove(idx);
        }

        if hits > 0 {
            self.record_kill();
        }
        hits
    }

    fn record_kill(&mut self) {
        self.kills += 1;
        if self.kills % AMMO_BONUS_KILLS == 0 {
            self.player.ammo_cap += 1;
            log::debug!(
                "Ammo cap raised to {} at {} kills",
                self.player.ammo_cap,
                self.kills
            );
        }
    }

    /// Non-destructive: neither side is removed
    fn player_collides(&self) -> bool {
        let player_bounds = self.player.bounds();
        self.obstacles
            .iter()
            .any(|o| o.bounds().intersects(&player_bounds))
    }
}
