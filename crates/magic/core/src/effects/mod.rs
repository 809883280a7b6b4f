//! Effect handlers, one per spell kind.
//!
//! Each handler receives the payload of its own [`crate::spell::SpellEffect`]
//! variant and an [`EffectContext`]. Handlers never see an event that was
//! already handled; [`crate::system::MagicSystem::dispatch`] filters those.
//!
//! "Nothing to do" is never an error here: empty origin lists, cross-map
//! teleports, body-less smite targets and unknown component names all resolve
//! to successful no-ops. Only collaborator failures propagate.

mod context;

pub(crate) mod change_components;
pub(crate) mod instant_spawn;
pub(crate) mod knock;
pub(crate) mod projectile;
pub(crate) mod smite;
pub(crate) mod teleport;
pub(crate) mod world_spawn;

pub(crate) use context::EffectContext;
