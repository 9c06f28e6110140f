//! A small rooms-and-corridors roguelike.
//!
//! The interesting parts live in [`map::gen`], which carves a level out of
//! solid rock, and [`level`], which moves the player around it, decides what
//! the player can see, and lets monsters take their turns. The [`render`]
//! and [`input`] modules are thin terminal adapters around them.

#![warn(missing_docs)]

pub mod actor;
pub mod config;
pub mod geo;
pub mod input;
pub mod level;
pub mod map;
pub mod render;
pub mod timing;

pub use config::Config;
pub use config::ConfigError;
pub use level::LevelState;
pub use map::gen::generate_level;
