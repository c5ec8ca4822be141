//! Slime Ascent - an endless vertical platformer driven by a song
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, level generation, collisions)
//! - `session`: Title / play / game over loop around one world
//! - `settings`: Player preferences
//! - `stats`: End-of-game statistics and leaderboard

pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;

pub use session::{FrameInput, Session, SessionState};
pub use settings::{ControlMode, Settings, SettingsError};
pub use stats::{Leaderboard, SessionStats};

/// Game configuration constants
pub mod consts {
    /// Simulation frames per second
    pub const FRAME_RATE: u32 = 30;

    /// Screen dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 400;
    pub const SCREEN_HEIGHT: i32 = 240;
}
