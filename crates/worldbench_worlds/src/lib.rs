//! Example worlds for the worldbench engine.
//!
//! Composition roots live here: the `example` world (counter system) and the
//! `game` world (character system). Worlds are built once from static
//! definitions at startup; a composition error is a programming defect and
//! should abort the process.

mod character;
mod config;
mod counter;

pub use character::{character_node, character_system, gain_experience_action, level_up_action};
pub use config::{ConfigError, DemoConfig};
pub use counter::{counter_node, counter_system, increment_action};

use worldbench::{ComposeError, World};

/// The default inspection world: a single counter system.
pub fn example_world() -> Result<World, ComposeError> {
    World::new("example", vec![counter_system()?])
}

/// The leveling sandbox: a single character system.
pub fn game_world() -> Result<World, ComposeError> {
    World::new("game", vec![character_system()?])
}
