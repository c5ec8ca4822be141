//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Fixed-point character physics
//! - No rendering, audio or input device dependencies

pub mod bounded;
pub mod character;
pub mod collision;
pub mod fixed;
pub mod generator;
pub mod meteor;
pub mod state;
pub mod tick;
pub mod velocity_table;
pub mod view;

pub use bounded::{Bounded, CapacityError};
pub use character::Character;
pub use collision::adjust_cursor;
pub use fixed::Fixed;
pub use generator::generate;
pub use state::{
    Beat, MAX_METEORS, MAX_PLATFORMS, MAX_SPRINGS, Meteor, Phase, Platform, PlatformStyle, Spring,
    World,
};
pub use tick::{TickInput, tick};
pub use velocity_table::jump_velocity;
pub use view::{CharacterPose, WorldSnapshot};
