//! Lava Platformer - a tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, collisions, level state)
//! - `renderer`: Display contract and a plain-text display
//! - `session`: Level sequencing driver (restart on loss, advance on win)
//! - `levels`: Built-in level plans and JSON level packs
//! - `tuning`: Data-driven physics constants

pub mod levels;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use levels::{LevelPack, PackError};
pub use renderer::{LevelDisplay, TextDisplay};
pub use session::{Progress, Session};
pub use settings::{Settings, SettingsError};
pub use tuning::Physics;

/// Game configuration constants
pub mod consts {
    /// Largest simulation sub-step (seconds). Bigger frame deltas are split.
    pub const MAX_STEP: f32 = 0.05;
    /// Largest frame delta the session feeds into the level (seconds)
    pub const MAX_FRAME_STEP: f32 = 0.1;

    /// Player physics (tiles per second, tiles per second²)
    pub const PLAYER_X_SPEED: f32 = 7.0;
    pub const GRAVITY: f32 = 30.0;
    pub const JUMP_SPEED: f32 = 17.0;

    /// Display-hold window after a win or loss (seconds)
    pub const FINISH_DELAY: f32 = 1.0;

    /// Coin bobbing
    pub const WOBBLE_SPEED: f32 = 8.0;
    pub const WOBBLE_DIST: f32 = 0.07;
}
