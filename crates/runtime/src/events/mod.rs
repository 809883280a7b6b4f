//! Topic-based event bus for runtime notifications.
//!
//! Events are published after the fact; they never drive spell resolution.
//! Consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LearnEvent, SpellEvent};
