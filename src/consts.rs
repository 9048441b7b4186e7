//! Gameplay constants
//!
//! All positions and speeds are in logical pixels on a fixed playfield; the
//! renderer scales the playfield to whatever terminal area is available.

/// Playfield width
pub const WIDTH: i32 = 800;
/// Playfield height
pub const HEIGHT: i32 = 600;

/// Target frame rate of the main loop
pub const FPS: u32 = 60;

/// Vertical distance the player moves per frame while a direction is held
pub const PLAYER_SPEED: i32 = 8;
pub const PLAYER_WIDTH: i32 = 64;
pub const PLAYER_HEIGHT: i32 = 48;

/// Horizontal distance a projectile travels per frame (rightward)
pub const PROJECTILE_SPEED: i32 = 12;
pub const PROJECTILE_WIDTH: i32 = 24;
pub const PROJECTILE_HEIGHT: i32 = 16;

/// Horizontal distance an obstacle travels per frame (leftward)
pub const OBSTACLE_SPEED: i32 = 4;
pub const OBSTACLE_WIDTH: i32 = 48;
pub const OBSTACLE_HEIGHT: i32 = 48;
/// Lowest centre y an obstacle may spawn at
pub const OBSTACLE_MIN_SPAWN_Y: i32 = 20;

/// Frames between obstacle waves
pub const SPAWN_INTERVAL_FRAMES: u64 = 100;
/// One extra obstacle per wave for every this many kills
pub const SPAWN_RAMP_KILLS: u32 = 10;
/// The single base obstacle of a wave stops spawning at this kill count
pub const BASE_SPAWN_KILL_LIMIT: u32 = 20;

/// Live projectiles allowed at the start of a round
pub const STARTING_AMMO: u32 = 2;
/// Ammo cap grows by one every this many kills
pub const AMMO_BONUS_KILLS: u32 = 20;
