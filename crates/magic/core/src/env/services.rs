//! Side-effect collaborators: physics, projectiles, doors, bodies, audio, chat.

use crate::state::{EntityId, SoundSpecifier, Vector2};

use super::WorldError;

pub trait Physics {
    /// Linear velocity of `entity` in map space (zero if it has no body).
    fn map_linear_velocity(&self, entity: EntityId) -> Vector2;

    fn apply_linear_impulse(&mut self, entity: EntityId, impulse: Vector2)
    -> Result<(), WorldError>;
}

/// Takes ownership of a spawned projectile's flight.
pub trait Projectiles {
    fn shoot(
        &mut self,
        projectile: EntityId,
        direction: Vector2,
        inherited_velocity: Vector2,
        shooter: EntityId,
    ) -> Result<(), WorldError>;
}

pub trait Doors {
    fn set_bolts_down(&mut self, door: EntityId, bolted: bool);

    /// Begins opening; returns false if the door refused (welded, powered off).
    fn start_opening(&mut self, door: EntityId) -> bool;
}

pub trait Bodies {
    /// Forcibly dismembers `body` and returns every resulting entity
    /// (organs, limbs, dropped clothing).
    fn gib(&mut self, body: EntityId) -> Result<Vec<EntityId>, WorldError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioParams {
    /// Volume offset in decibels.
    pub volume: f32,
}

impl AudioParams {
    pub const DEFAULT: Self = Self { volume: 0.0 };

    pub fn with_volume(volume: f32) -> Self {
        Self { volume }
    }
}

impl Default for AudioParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub trait Audio {
    /// Plays `sound` for every player in view of `source`.
    fn play_pvs(&mut self, sound: &SoundSpecifier, source: EntityId, params: AudioParams);
}

/// Channel used for in-character chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChatChannel {
    Speak,
    Whisper,
    Emote,
}

pub trait Chat {
    fn send_in_game_message(
        &mut self,
        speaker: EntityId,
        message: &str,
        channel: ChatChannel,
        hide_in_log: bool,
    );
}

pub trait Localization {
    /// Resolves a localization key; unknown keys resolve to themselves.
    fn get_string(&self, key: &str) -> String;
}
