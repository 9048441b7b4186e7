// Library exports for the binary and tests
pub use app::App;
pub use entities::{Bounds, Direction, Entity, EntityKind, Fate, Obstacle, Player, Projectile};
pub use round::{LossCause, Round, TickInput, TickReport, spawn_count};
pub use session::{Cue, Phase, Session};
pub use settings::Settings;

pub mod app;
pub mod audio;
pub mod clock;
pub mod consts;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod round;
pub mod session;
pub mod settings;
pub mod terminal;
