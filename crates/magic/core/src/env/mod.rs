//! Collaborator traits the effect handlers act through.
//!
//! The entity store, the spatial-transform service, and the side-effect
//! services (physics, projectiles, doors, bodies, audio, chat) are owned by the
//! host engine. [`World`] bundles them so handlers take a single `&mut W`.
//! Randomness is injected separately through [`RngOracle`].
mod do_after;
mod error;
mod rng;
mod services;
mod store;
mod transforms;

pub use do_after::{DoAfterArgs, DoAfterCompletion, DoAfterFlags, DoAfterId, DoAfters, SpellGrant};
pub use error::WorldError;
pub use rng::{PcgRng, RngOracle, RngStream, compute_seed};
pub use services::{
    Audio, AudioParams, Bodies, Chat, ChatChannel, Doors, Localization, Physics, Projectiles,
};
pub use store::EntityStore;
pub use transforms::Transforms;

/// Every world-side collaborator a spell effect may touch.
pub trait World:
    EntityStore + Transforms + Physics + Projectiles + Doors + Bodies + Audio + Chat + Localization
{
}

impl<T> World for T where
    T: EntityStore
        + Transforms
        + Physics
        + Projectiles
        + Doors
        + Bodies
        + Audio
        + Chat
        + Localization
        + ?Sized
{
}
